//! Sizing tables: named platform dimensions, aspect ratios and DPI quality
//! presets.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformSize {
    pub width: u32,
    pub height: u32,
    pub ratio: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AspectRatio {
    pub ratio: f64,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityPreset {
    pub dpi: u32,
    pub quality: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizingTables {
    pub platform_sizes: HashMap<String, PlatformSize>,
    pub aspect_ratios: HashMap<String, AspectRatio>,
    pub quality_presets: HashMap<String, QualityPreset>,
}

static BUILTIN: Lazy<SizingTables> = Lazy::new(|| {
    SizingTables::from_yaml(include_str!("../../data/sizing.yaml"))
        .expect("built-in sizing tables are valid")
});

impl SizingTables {
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let tables: Self = serde_yaml::from_str(yaml)
            .map_err(|err| anyhow!("failed to parse sizing tables: {err}"))?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        for (name, size) in &self.platform_sizes {
            if size.width == 0 || size.height == 0 {
                bail!("platform size '{name}' has a zero dimension");
            }
        }
        for (name, ratio) in &self.aspect_ratios {
            if ratio.ratio <= 0.0 {
                bail!("aspect ratio '{name}' is not positive");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load_with_common_presets() {
        let tables = SizingTables::builtin();
        let fhd = tables
            .platform_sizes
            .get("fhd_1080p")
            .expect("fhd preset exists");
        assert_eq!((fhd.width, fhd.height), (1920, 1080));

        let square = tables.aspect_ratios.get("1:1").expect("square ratio exists");
        assert!((square.ratio - 1.0).abs() < f64::EPSILON);

        let web_high = tables
            .quality_presets
            .get("web_high")
            .expect("web_high preset exists");
        assert_eq!(web_high.dpi, 144);
    }

    #[test]
    fn validation_rejects_degenerate_dimensions() {
        let yaml = r#"
platform_sizes:
  broken: { width: 0, height: 100, ratio: "1:1", description: "broken" }
aspect_ratios: {}
quality_presets: {}
"#;
        assert!(SizingTables::from_yaml(yaml).is_err());
    }
}
