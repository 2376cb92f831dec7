// Period-over-period relative change.

/// `100 * (v[i] - v[i-1]) / v[i-1]` for each position.
///
/// The first position is always `None`, as is any position whose own value or
/// predecessor is missing, whose predecessor is zero, or whose result is not
/// finite. Apply at most once per pipeline.
pub fn to_relative_change(values: &[Option<f64>]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }
    std::iter::once(None)
        .chain(values.windows(2).map(|pair| {
            let previous = pair[0]?;
            let current = pair[1]?;
            if previous == 0.0 {
                return None;
            }
            let change = 100.0 * (current - previous) / previous;
            change.is_finite().then_some(change)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_changes(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len(), "Vectors differ in length");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 1e-9, "Mismatch at index {}: {} != {}", i, a, e),
                _ => assert_eq!(a, e, "Mismatch at index {}", i),
            }
        }
    }

    #[test]
    fn test_relative_change() {
        let changes = to_relative_change(&[Some(100.0), Some(110.0), Some(99.0)]);
        assert_changes(&changes, &[None, Some(10.0), Some(-10.0)]);
        assert_eq!(changes.iter().flatten().count(), 2);
    }

    #[test]
    fn test_relative_change_zero_previous() {
        let changes = to_relative_change(&[Some(0.0), Some(5.0), Some(10.0)]);
        assert_changes(&changes, &[None, None, Some(100.0)]);
    }

    #[test]
    fn test_relative_change_missing_neighbours() {
        let changes = to_relative_change(&[Some(50.0), None, Some(60.0), Some(30.0)]);
        assert_changes(&changes, &[None, None, None, Some(-50.0)]);
    }

    #[test]
    fn test_relative_change_short_inputs() {
        assert!(to_relative_change(&[]).is_empty());
        assert_eq!(to_relative_change(&[Some(3.0)]), vec![None]);
    }
}
