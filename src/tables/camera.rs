//! Camera settings tables: shot types, lenses, apertures, angles,
//! composition rules, lighting styles, focus techniques and movements, plus
//! the per-style quality enhancer lists.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::TagBuckets;

pub const SHOT_TYPES: &str = "shot_types";
pub const LENS_TYPES: &str = "lens_types";
pub const APERTURE_SETTINGS: &str = "aperture_settings";
pub const CAMERA_ANGLES: &str = "camera_angles";
pub const COMPOSITION_RULES: &str = "composition_rules";
pub const LIGHTING_STYLES: &str = "lighting_styles";
pub const FOCUS_TECHNIQUES: &str = "focus_techniques";
pub const CAMERA_MOVEMENTS: &str = "camera_movements";

const REQUIRED_CATEGORIES: &[&str] = &[
    SHOT_TYPES,
    LENS_TYPES,
    APERTURE_SETTINGS,
    CAMERA_ANGLES,
    COMPOSITION_RULES,
    LIGHTING_STYLES,
    FOCUS_TECHNIQUES,
    CAMERA_MOVEMENTS,
];

#[derive(Debug, Clone, Deserialize)]
pub struct CameraTables {
    settings: HashMap<String, TagBuckets>,
    quality_enhancers: HashMap<String, Vec<String>>,
}

static BUILTIN: Lazy<CameraTables> = Lazy::new(|| {
    CameraTables::from_yaml(include_str!("../../data/camera.yaml"))
        .expect("built-in camera tables are valid")
});

impl CameraTables {
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let tables: Self = serde_yaml::from_str(yaml)
            .map_err(|err| anyhow!("failed to parse camera tables: {err}"))?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        for name in REQUIRED_CATEGORIES {
            let buckets = self
                .settings
                .get(*name)
                .ok_or_else(|| anyhow!("camera settings are missing the '{name}' category"))?;
            buckets.validate(name)?;
        }
        for (style, tags) in &self.quality_enhancers {
            if tags.is_empty() {
                return Err(anyhow!("quality enhancer '{style}' has no tags"));
            }
        }
        Ok(())
    }

    /// `name` must be one of the category constants above; their presence is
    /// validated at load.
    pub(crate) fn category(&self, name: &str) -> &TagBuckets {
        self.settings
            .get(name)
            .expect("camera categories are validated at load")
    }

    pub fn quality_enhancers(&self, style: &str) -> Option<&[String]> {
        self.quality_enhancers.get(style).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_declared_key_resolves_within_its_own_bucket() {
        let tables = CameraTables::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        for name in REQUIRED_CATEGORIES {
            let buckets = tables.category(name);
            for key in buckets.keys() {
                let bucket = buckets.get(key).expect("declared key has a bucket");
                for _ in 0..4 {
                    let tag = buckets.choose(name, key, &mut rng).to_string();
                    assert!(
                        bucket.contains(&tag),
                        "tag '{tag}' outside bucket '{key}' of '{name}'"
                    );
                }
            }
        }
    }

    #[test]
    fn builtin_tables_load_and_validate() {
        let tables = CameraTables::builtin();
        for name in REQUIRED_CATEGORIES {
            assert!(tables.category(name).contains(crate::tables::AUTO));
        }
    }

    #[test]
    fn professional_quality_enhancers_are_declared_in_order() {
        let tags = CameraTables::builtin()
            .quality_enhancers("professional")
            .expect("professional enhancers exist");
        assert_eq!(tags, ["professional_photography", "high_end", "commercial_quality"]);
    }

    #[test]
    fn close_up_bucket_holds_the_expected_candidates() {
        let bucket = CameraTables::builtin()
            .category(SHOT_TYPES)
            .get("close_up")
            .expect("close_up bucket exists");
        assert!(bucket.contains(&"close_up".to_string()));
        assert!(!bucket.is_empty());
    }
}
