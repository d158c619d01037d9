//! Lighting tables: studio setups, natural conditions, equipment,
//! atmospheric moods, lighting ratios and color temperatures.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::require_key;

pub const DEFAULT_STUDIO_SETUP: &str = "three_point_classic";
pub const DEFAULT_NATURAL_CONDITION: &str = "window_natural";
pub const DEFAULT_EQUIPMENT: &str = "umbrella_reflective";
pub const DEFAULT_MOOD: &str = "natural_organic";

#[derive(Debug, Clone, Deserialize)]
pub struct StudioSetup {
    pub description: String,
    pub components: Vec<String>,
    pub tags: Vec<String>,
    pub mood: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaturalLight {
    pub description: String,
    pub characteristics: Vec<String>,
    pub tags: Vec<String>,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Equipment {
    pub description: String,
    pub characteristics: Vec<String>,
    pub tags: Vec<String>,
    pub size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightingMood {
    pub description: String,
    pub characteristics: Vec<String>,
    pub tags: Vec<String>,
    pub emotion: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightingRatio {
    pub description: String,
    pub contrast: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorTemperature {
    pub kelvin: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Selection normalized across the four config families: the description for
/// the summary plus the tag list in emission order (tags first, then
/// characteristics where the family has them).
#[derive(Debug, Clone)]
pub struct LightingSelection {
    pub description: String,
    pub tags: Vec<String>,
}

impl LightingSelection {
    pub fn from_studio(setup: &StudioSetup) -> Self {
        LightingSelection {
            description: setup.description.clone(),
            tags: setup.tags.clone(),
        }
    }

    pub fn from_natural(light: &NaturalLight) -> Self {
        let mut tags = light.tags.clone();
        tags.extend(light.characteristics.iter().cloned());
        LightingSelection {
            description: light.description.clone(),
            tags,
        }
    }

    pub fn from_equipment(equipment: &Equipment) -> Self {
        let mut tags = equipment.tags.clone();
        tags.extend(equipment.characteristics.iter().cloned());
        LightingSelection {
            description: equipment.description.clone(),
            tags,
        }
    }

    pub fn from_mood(mood: &LightingMood) -> Self {
        let mut tags = mood.tags.clone();
        tags.extend(mood.characteristics.iter().cloned());
        LightingSelection {
            description: mood.description.clone(),
            tags,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightingTables {
    pub studio_setups: HashMap<String, StudioSetup>,
    pub natural_lighting: HashMap<String, NaturalLight>,
    pub equipment_types: HashMap<String, Equipment>,
    pub lighting_moods: HashMap<String, LightingMood>,
    pub lighting_ratios: HashMap<String, LightingRatio>,
    pub color_temperatures: HashMap<String, ColorTemperature>,
}

static BUILTIN: Lazy<LightingTables> = Lazy::new(|| {
    LightingTables::from_yaml(include_str!("../../data/lighting.yaml"))
        .expect("built-in lighting tables are valid")
});

impl LightingTables {
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let tables: Self = serde_yaml::from_str(yaml)
            .map_err(|err| anyhow!("failed to parse lighting tables: {err}"))?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        require_key(&self.studio_setups, "studio_setups", DEFAULT_STUDIO_SETUP)?;
        require_key(
            &self.natural_lighting,
            "natural_lighting",
            DEFAULT_NATURAL_CONDITION,
        )?;
        require_key(&self.equipment_types, "equipment_types", DEFAULT_EQUIPMENT)?;
        require_key(&self.lighting_moods, "lighting_moods", DEFAULT_MOOD)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load_with_all_fallback_keys() {
        let tables = LightingTables::builtin();
        assert!(tables.studio_setups.contains_key(DEFAULT_STUDIO_SETUP));
        assert!(tables.natural_lighting.contains_key(DEFAULT_NATURAL_CONDITION));
        assert!(tables.equipment_types.contains_key(DEFAULT_EQUIPMENT));
        assert!(tables.lighting_moods.contains_key(DEFAULT_MOOD));
    }

    #[test]
    fn selections_emit_tags_before_characteristics() {
        let tables = LightingTables::builtin();
        let light = tables
            .natural_lighting
            .get("golden_hour")
            .expect("golden_hour exists");
        let selection = LightingSelection::from_natural(light);
        assert_eq!(selection.tags.len(), light.tags.len() + light.characteristics.len());
        assert_eq!(selection.tags[..light.tags.len()], light.tags[..]);
    }

    #[test]
    fn validation_flags_a_missing_fallback_key() {
        let yaml = r#"
studio_setups: {}
natural_lighting: {}
equipment_types: {}
lighting_moods: {}
lighting_ratios: {}
color_temperatures: {}
"#;
        assert!(LightingTables::from_yaml(yaml).is_err());
    }
}
