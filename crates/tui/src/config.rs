use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use worklane_core::layout::LayoutConfig;
use worklane_core::views::TimelineStyle;

/// Contents of the `--config` TOML file. Every table and key is optional.
///
/// ```toml
/// [layout]
/// adjacency_tolerance = 0.02
/// axis_interval_months = 3
///
/// [style]
/// row_height = 32.0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub layout: LayoutConfig,
    /// Geometry for SVG export. The terminal uses cell-aligned geometry.
    pub style: TimelineStyle,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("in {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.layout.validate()?;
        Ok(config)
    }
}
