// Year-label canonicalization.
use shared::models::YearKey;

/// Reads the year from the last four characters of a column label.
///
/// The tables mix plain years ("2019") with decorated labels ("Avg 2019",
/// "Jan 2020"). Only labels ending in four ASCII digits are accepted; every
/// other label is dropped from alignment, so "2020 (p)" or "19" never reach a chart.
pub fn canonicalize_year(label: &str) -> Option<YearKey> {
    let tail: Vec<char> = label.chars().rev().take(4).collect();
    if tail.len() < 4 || !tail.iter().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = tail
        .iter()
        .rev()
        .fold(0u16, |acc, c| acc * 10 + (*c as u8 - b'0') as u16);
    Some(YearKey::new(year))
}
