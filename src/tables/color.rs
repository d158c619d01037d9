//! Color palette tables: harmony schemes, mood, cultural, professional,
//! industry and seasonal palettes.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::require_key;

/// Hard safe default for every color lookup that comes up empty.
pub const DEFAULT_PALETTE: &str = "earth_natural";

#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    pub colors: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
}

/// Color-theory scheme. Schemes describe a relationship between hues rather
/// than concrete swatches, so they carry no color list of their own.
#[derive(Debug, Clone, Deserialize)]
pub struct HarmonyScheme {
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub mood: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryPalette {
    pub primary: Vec<String>,
    pub accent: Vec<String>,
    pub backgrounds: Vec<String>,
    pub contexts: Vec<String>,
    pub moods: Vec<String>,
}

/// Palette selection normalized across the table families, ready for tag
/// generation regardless of which table it came from.
#[derive(Debug, Clone)]
pub struct ResolvedPalette {
    pub colors: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
}

impl ResolvedPalette {
    pub fn from_palette(palette: &Palette) -> Self {
        ResolvedPalette {
            colors: palette.colors.clone(),
            tags: palette.tags.clone(),
            description: palette.description.clone(),
        }
    }

    pub fn from_scheme(scheme: &HarmonyScheme) -> Self {
        ResolvedPalette {
            colors: Vec::new(),
            tags: scheme.tags.clone(),
            description: scheme.description.clone(),
        }
    }

    /// Industry palettes keep a richer shape; the standard form is the
    /// primaries plus the first two accents, tagged with the industry's
    /// contexts and moods.
    pub fn from_industry(name: &str, industry: &IndustryPalette) -> Self {
        let mut colors = industry.primary.clone();
        colors.extend(industry.accent.iter().take(2).cloned());
        let mut tags = industry.contexts.clone();
        tags.extend(industry.moods.iter().cloned());
        ResolvedPalette {
            colors,
            tags,
            description: format!("{} industry colors", title_case(name)),
        }
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorTables {
    pub harmony_schemes: HashMap<String, HarmonyScheme>,
    pub mood_palettes: HashMap<String, Palette>,
    pub cultural_palettes: HashMap<String, Palette>,
    pub professional_palettes: HashMap<String, Palette>,
    pub industry_palettes: HashMap<String, IndustryPalette>,
    pub seasonal_palettes: HashMap<String, Palette>,
}

static BUILTIN: Lazy<ColorTables> = Lazy::new(|| {
    ColorTables::from_yaml(include_str!("../../data/color.yaml"))
        .expect("built-in color tables are valid")
});

impl ColorTables {
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let tables: Self = serde_yaml::from_str(yaml)
            .map_err(|err| anyhow!("failed to parse color tables: {err}"))?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        require_key(&self.mood_palettes, "mood_palettes", DEFAULT_PALETTE)
    }

    /// The universal fallback palette.
    pub fn default_palette(&self) -> ResolvedPalette {
        let palette = self
            .mood_palettes
            .get(DEFAULT_PALETTE)
            .expect("default palette is validated at load");
        ResolvedPalette::from_palette(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load_with_the_default_palette() {
        let palette = ColorTables::builtin().default_palette();
        assert_eq!(palette.description, "Natural earth colors");
        assert!(!palette.colors.is_empty());
    }

    #[test]
    fn industry_palettes_adapt_to_the_standard_shape() {
        let tables = ColorTables::builtin();
        let industry = tables
            .industry_palettes
            .get("technology")
            .expect("technology industry exists");
        let resolved = ResolvedPalette::from_industry("technology", industry);
        assert_eq!(
            resolved.colors.len(),
            industry.primary.len() + 2,
            "primaries plus two accents"
        );
        assert_eq!(
            resolved.tags.len(),
            industry.contexts.len() + industry.moods.len()
        );
        assert_eq!(resolved.description, "Technology industry colors");
    }

    #[test]
    fn harmony_schemes_carry_no_swatches() {
        let tables = ColorTables::builtin();
        let scheme = tables
            .harmony_schemes
            .get("complementary")
            .expect("complementary scheme exists");
        assert!(ResolvedPalette::from_scheme(scheme).colors.is_empty());
    }

    #[test]
    fn title_case_renders_multi_word_keys() {
        assert_eq!(title_case("real_estate"), "Real Estate");
        assert_eq!(title_case("technology"), "Technology");
    }
}
