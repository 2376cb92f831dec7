// Per-panel configuration and its builder
use crate::analytics::SeriesSource;
use crate::error::EngineError;

pub const DEFAULT_REFERENCE_TERRITORY: &str = "Barcelona";

pub struct PanelConfig {
    id: String,
    title: String,
    unit_label: String,
    reference_territory: String,
    plausible_range: Option<(f64, f64)>,
    source: Box<dyn SeriesSource>,
}

impl PanelConfig {
    pub fn builder(id: impl Into<String>, source: impl SeriesSource + 'static) -> PanelConfigBuilder {
        let id = id.into();
        PanelConfigBuilder {
            title: id.clone(),
            id,
            unit_label: "Value".to_string(),
            reference_territory: DEFAULT_REFERENCE_TERRITORY.to_string(),
            plausible_range: None,
            source: Box::new(source),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }

    pub fn reference_territory(&self) -> &str {
        &self.reference_territory
    }

    pub fn plausible_range(&self) -> Option<(f64, f64)> {
        self.plausible_range
    }

    pub fn source(&self) -> &dyn SeriesSource {
        self.source.as_ref()
    }
}

impl std::fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelConfig")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("unit_label", &self.unit_label)
            .field("reference_territory", &self.reference_territory)
            .field("plausible_range", &self.plausible_range)
            .field("source", &self.source.name())
            .finish()
    }
}

pub struct PanelConfigBuilder {
    id: String,
    title: String,
    unit_label: String,
    reference_territory: String,
    plausible_range: Option<(f64, f64)>,
    source: Box<dyn SeriesSource>,
}

impl PanelConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn unit_label(mut self, unit_label: impl Into<String>) -> Self {
        self.unit_label = unit_label.into();
        self
    }

    pub fn reference_territory(mut self, territory: impl Into<String>) -> Self {
        self.reference_territory = territory.into();
        self
    }

    /// Absolute values outside `[min, max]` flag the panel as suspicious.
    pub fn plausible_range(mut self, min: f64, max: f64) -> Self {
        self.plausible_range = Some((min, max));
        self
    }

    pub fn build(self) -> Result<PanelConfig, EngineError> {
        if self.id.trim().is_empty() {
            return Err(EngineError::ConfigError("panel id must not be empty".to_string()));
        }
        if self.reference_territory.trim().is_empty() {
            return Err(EngineError::ConfigError(format!(
                "panel '{}' has an empty reference territory",
                self.id
            )));
        }
        if let Some((min, max)) = self.plausible_range {
            if !(min <= max) {
                return Err(EngineError::ConfigError(format!(
                    "panel '{}' has an invalid plausible range [{}, {}]",
                    self.id, min, max
                )));
            }
        }
        Ok(PanelConfig {
            id: self.id,
            title: self.title,
            unit_label: self.unit_label,
            reference_territory: self.reference_territory,
            plausible_range: self.plausible_range,
            source: self.source,
        })
    }
}
