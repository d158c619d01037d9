//! Color harmonizer: palette selection across six approaches (color theory,
//! mood, cultural, professional, industry, seasonal) with context-driven
//! defaults, plus intensity, temperature, saturation and contrast modifiers.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;

use crate::analysis::{all_matches, first_match};
use crate::assemble::{emphasize_all, join_prompt, EmphasisLevel};
use crate::nodes::{push_all, render_summary, Enhancement};
use crate::tables::color::{ColorTables, Palette, ResolvedPalette};
use crate::tables::{AUTO, NONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorApproach {
    HarmonyTheory,
    #[default]
    MoodBased,
    Cultural,
    Professional,
    Industry,
    Seasonal,
    Custom,
}

impl ColorApproach {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorApproach::HarmonyTheory => "harmony_theory",
            ColorApproach::MoodBased => "mood_based",
            ColorApproach::Cultural => "cultural",
            ColorApproach::Professional => "professional",
            ColorApproach::Industry => "industry",
            ColorApproach::Seasonal => "seasonal",
            ColorApproach::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorIntensity {
    Subtle,
    #[default]
    Moderate,
    Vibrant,
    Intense,
}

impl ColorIntensity {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorIntensity::Subtle => "subtle",
            ColorIntensity::Moderate => "moderate",
            ColorIntensity::Vibrant => "vibrant",
            ColorIntensity::Intense => "intense",
        }
    }

    /// Concrete color swatches are only named from moderate intensity up.
    fn includes_swatches(self) -> bool {
        !matches!(self, ColorIntensity::Subtle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContrastLevel {
    Low,
    #[default]
    Moderate,
    High,
    Dramatic,
}

impl ContrastLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ContrastLevel::Low => "low",
            ContrastLevel::Moderate => "moderate",
            ContrastLevel::High => "high",
            ContrastLevel::Dramatic => "dramatic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMood {
    Warm,
    Cool,
    Dramatic,
    Soft,
    Vibrant,
    Neutral,
}

impl ColorMood {
    fn as_str(self) -> &'static str {
        match self {
            ColorMood::Warm => "warm",
            ColorMood::Cool => "cool",
            ColorMood::Dramatic => "dramatic",
            ColorMood::Soft => "soft",
            ColorMood::Vibrant => "vibrant",
            ColorMood::Neutral => "neutral",
        }
    }
}

/// Existing color information detected in the base prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorContext {
    pub existing_colors: Vec<&'static str>,
    pub mood: ColorMood,
}

impl ColorContext {
    pub fn has_color_info(&self) -> bool {
        !self.existing_colors.is_empty()
    }
}

impl Default for ColorContext {
    fn default() -> Self {
        ColorContext {
            existing_colors: Vec::new(),
            mood: ColorMood::Neutral,
        }
    }
}

const COLOR_RULES: &[(&str, &[&str])] = &[
    ("red", &["red", "crimson", "scarlet", "ruby"]),
    ("blue", &["blue", "azure", "navy", "sapphire"]),
    ("green", &["green", "emerald", "forest", "jade"]),
    ("yellow", &["yellow", "golden", "amber", "citrine"]),
    ("orange", &["orange", "coral", "peach", "sunset"]),
    ("purple", &["purple", "violet", "lavender", "amethyst"]),
    ("pink", &["pink", "rose", "magenta", "blush"]),
    ("brown", &["brown", "tan", "beige", "earth"]),
    ("black", &["black", "dark", "ebony", "charcoal"]),
    ("white", &["white", "ivory", "cream", "pearl"]),
    ("gray", &["gray", "grey", "silver", "platinum"]),
];

const MOOD_RULES: &[(ColorMood, &[&str])] = &[
    (ColorMood::Warm, &["warm", "cozy", "sunny", "cheerful", "energetic"]),
    (ColorMood::Cool, &["cool", "calm", "serene", "peaceful", "crisp"]),
    (ColorMood::Dramatic, &["dramatic", "intense", "bold", "striking"]),
    (ColorMood::Soft, &["soft", "gentle", "delicate", "subtle", "muted"]),
    (ColorMood::Vibrant, &["vibrant", "bright", "vivid", "colorful", "lively"]),
];

pub fn analyze_prompt_for_colors(prompt: &str) -> ColorContext {
    let lower = prompt.to_lowercase();
    ColorContext {
        existing_colors: all_matches(&lower, COLOR_RULES),
        mood: first_match(&lower, MOOD_RULES, ColorMood::Neutral),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub color_approach: ColorApproach,
    pub color_intensity: ColorIntensity,
    pub harmony_scheme: String,
    pub mood_palette: String,
    pub cultural_palette: String,
    pub professional_palette: String,
    pub industry_palette: String,
    pub seasonal_palette: String,
    pub color_temperature: String,
    pub saturation_level: String,
    pub contrast_level: ContrastLevel,
    pub gradient_flow: bool,
    pub metallic_elements: String,
    pub accessibility_mode: bool,
    pub colorblind_friendly: bool,
    pub color_emphasis: EmphasisLevel,
    pub context_awareness: bool,
}

impl Default for ColorOptions {
    fn default() -> Self {
        ColorOptions {
            color_approach: ColorApproach::default(),
            color_intensity: ColorIntensity::default(),
            harmony_scheme: AUTO.to_string(),
            mood_palette: AUTO.to_string(),
            cultural_palette: NONE.to_string(),
            professional_palette: NONE.to_string(),
            industry_palette: NONE.to_string(),
            seasonal_palette: NONE.to_string(),
            color_temperature: AUTO.to_string(),
            saturation_level: AUTO.to_string(),
            contrast_level: ContrastLevel::default(),
            gradient_flow: false,
            metallic_elements: NONE.to_string(),
            accessibility_mode: false,
            colorblind_friendly: false,
            color_emphasis: EmphasisLevel::default(),
            context_awareness: true,
        }
    }
}

fn mood_palette_key(mood: ColorMood) -> &'static str {
    match mood {
        ColorMood::Warm => "warm_energetic",
        ColorMood::Cool => "cool_calming",
        ColorMood::Dramatic => "jewel_rich",
        ColorMood::Soft => "pastel_soft",
        ColorMood::Vibrant => "neon_electric",
        ColorMood::Neutral => "earth_natural",
    }
}

fn palette_or_default(
    table: &HashMap<String, Palette>,
    table_name: &str,
    key: &str,
    tables: &ColorTables,
) -> ResolvedPalette {
    match table.get(key) {
        Some(palette) => ResolvedPalette::from_palette(palette),
        None => {
            warn!("Unknown {table_name} option '{key}', using the default palette");
            tables.default_palette()
        }
    }
}

fn select_palette(
    tables: &ColorTables,
    options: &ColorOptions,
    context: &ColorContext,
    rng: &mut impl Rng,
) -> ResolvedPalette {
    match options.color_approach {
        ColorApproach::HarmonyTheory => {
            let scheme_key: &str = if options.harmony_scheme == AUTO {
                match context.mood {
                    ColorMood::Dramatic | ColorMood::Vibrant => "complementary",
                    ColorMood::Soft => "analogous",
                    _ => ["analogous", "complementary", "triadic"]
                        .choose(rng)
                        .copied()
                        .unwrap_or("analogous"),
                }
            } else {
                &options.harmony_scheme
            };
            match tables.harmony_schemes.get(scheme_key) {
                Some(scheme) => ResolvedPalette::from_scheme(scheme),
                None => {
                    warn!("Unknown harmony scheme '{scheme_key}', using the default palette");
                    tables.default_palette()
                }
            }
        }
        ColorApproach::MoodBased => {
            let mood_key: &str = if options.mood_palette == AUTO {
                mood_palette_key(context.mood)
            } else {
                &options.mood_palette
            };
            palette_or_default(&tables.mood_palettes, "mood palette", mood_key, tables)
        }
        ColorApproach::Cultural => {
            if options.cultural_palette == NONE {
                return tables.default_palette();
            }
            palette_or_default(
                &tables.cultural_palettes,
                "cultural palette",
                &options.cultural_palette,
                tables,
            )
        }
        ColorApproach::Professional => {
            if options.professional_palette == NONE {
                return tables.default_palette();
            }
            palette_or_default(
                &tables.professional_palettes,
                "professional palette",
                &options.professional_palette,
                tables,
            )
        }
        ColorApproach::Industry => {
            if options.industry_palette == NONE {
                return tables.default_palette();
            }
            match tables.industry_palettes.get(&options.industry_palette) {
                Some(industry) => {
                    ResolvedPalette::from_industry(&options.industry_palette, industry)
                }
                None => {
                    warn!(
                        "Unknown industry palette '{}', using the default palette",
                        options.industry_palette
                    );
                    tables.default_palette()
                }
            }
        }
        ColorApproach::Seasonal => {
            if options.seasonal_palette == NONE {
                return tables.default_palette();
            }
            palette_or_default(
                &tables.seasonal_palettes,
                "seasonal palette",
                &options.seasonal_palette,
                tables,
            )
        }
        ColorApproach::Custom => tables.default_palette(),
    }
}

fn generate_color_tags(
    palette: &ResolvedPalette,
    options: &ColorOptions,
    rng: &mut impl Rng,
) -> Vec<String> {
    let mut tags = palette.tags.clone();

    if options.color_intensity.includes_swatches() {
        let count = palette.colors.len().min(3);
        tags.extend(palette.colors.choose_multiple(rng, count).cloned());
    }

    let intensity_tags: &[&str] = match options.color_intensity {
        ColorIntensity::Subtle => &["muted", "understated", "refined"],
        ColorIntensity::Moderate => &["balanced", "harmonious", "pleasing"],
        ColorIntensity::Vibrant => &["vibrant", "rich", "saturated"],
        ColorIntensity::Intense => &["intense", "bold", "striking", "vivid"],
    };
    push_all(&mut tags, intensity_tags);

    if options.color_temperature != AUTO {
        let temperature_tags: &[&str] = match options.color_temperature.as_str() {
            "warm" => &["warm_tones", "cozy_warmth", "golden_glow"],
            "cool" => &["cool_tones", "refreshing", "crisp_coolness"],
            "neutral" => &["neutral_balance", "even_temperature"],
            "mixed" => &["temperature_contrast", "warm_cool_balance"],
            _ => &[],
        };
        push_all(&mut tags, temperature_tags);
    }

    if options.saturation_level != AUTO {
        let saturation_tags: &[&str] = match options.saturation_level.as_str() {
            "desaturated" => &["desaturated", "muted_colors", "faded"],
            "moderate" => &["balanced_saturation", "natural_colors"],
            "saturated" => &["saturated_colors", "rich_hues"],
            "vivid" => &["vivid_colors", "pure_hues", "chromatic"],
            _ => &[],
        };
        push_all(&mut tags, saturation_tags);
    }

    let contrast_tags: &[&str] = match options.contrast_level {
        ContrastLevel::Low => &["low_contrast", "subtle_variation", "gentle"],
        ContrastLevel::Moderate => &["balanced_contrast", "harmonious"],
        ContrastLevel::High => &["high_contrast", "dramatic_difference"],
        ContrastLevel::Dramatic => &["extreme_contrast", "bold_opposition", "striking"],
    };
    push_all(&mut tags, contrast_tags);

    if options.gradient_flow {
        push_all(&mut tags, &["color_gradient", "flowing_colors", "smooth_transition"]);
    }

    match options.metallic_elements.as_str() {
        NONE => {}
        "mixed" => push_all(&mut tags, &["metallic_accents", "mixed_metals", "lustrous"]),
        metal => {
            tags.push(format!("{metal}_accents"));
            push_all(&mut tags, &["metallic_finish", "reflective"]);
        }
    }

    if options.accessibility_mode {
        push_all(&mut tags, &["high_contrast", "accessible_colors", "readable"]);
    }
    if options.colorblind_friendly {
        push_all(&mut tags, &["colorblind_safe", "universal_colors", "inclusive_palette"]);
    }

    tags
}

/// Harmonizes `base_prompt` with the built-in color tables.
pub fn harmonize_colors(
    base_prompt: &str,
    options: &ColorOptions,
    rng: &mut impl Rng,
) -> Enhancement {
    harmonize_colors_using(ColorTables::builtin(), base_prompt, options, rng)
}

pub fn harmonize_colors_using(
    tables: &ColorTables,
    base_prompt: &str,
    options: &ColorOptions,
    rng: &mut impl Rng,
) -> Enhancement {
    let context = if options.context_awareness {
        analyze_prompt_for_colors(base_prompt)
    } else {
        ColorContext::default()
    };

    let palette = select_palette(tables, options, &context, rng);
    let color_tags = generate_color_tags(&palette, options, rng);
    let emphasized = emphasize_all(&color_tags, options.color_emphasis);

    let mut summary_parts = vec![
        format!("Approach: {}", options.color_approach.as_str()),
        format!("Palette: {}", palette.description),
        format!("Intensity: {}", options.color_intensity.as_str()),
    ];
    if context.has_color_info() {
        summary_parts.push(format!(
            "Detected Colors: {}",
            context.existing_colors.join(", ")
        ));
    }
    if context.mood != ColorMood::Neutral {
        summary_parts.push(format!("Mood Context: {}", context.mood.as_str()));
    }

    let mut technical = Vec::new();
    if options.color_temperature != AUTO {
        technical.push(format!("Color Temperature: {}", options.color_temperature));
    }
    if options.saturation_level != AUTO {
        technical.push(format!("Saturation Level: {}", options.saturation_level));
    }
    technical.push(format!("Contrast Level: {}", options.contrast_level.as_str()));
    summary_parts.push(format!("Technical: {}", technical.join(", ")));

    if options.color_emphasis != EmphasisLevel::Medium {
        summary_parts.push(format!("Emphasis: {}", options.color_emphasis));
    }
    summary_parts.push(format!("Color Tags Added: {}", color_tags.len()));

    Enhancement {
        prompt: join_prompt(base_prompt, &emphasized),
        summary: render_summary("Color harmony applied:", &summary_parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn detects_colors_and_mood_from_the_prompt() {
        let context = analyze_prompt_for_colors("a crimson dress under golden, dramatic light");
        assert_eq!(context.existing_colors, vec!["red", "yellow"]);
        assert_eq!(context.mood, ColorMood::Dramatic);
        assert!(context.has_color_info());
    }

    #[test]
    fn neutral_prompt_keeps_default_context() {
        let context = analyze_prompt_for_colors("an empty street");
        assert!(context.existing_colors.is_empty());
        assert_eq!(context.mood, ColorMood::Neutral);
    }

    #[test]
    fn mood_based_auto_follows_the_detected_mood() {
        let tables = ColorTables::builtin();
        let context = analyze_prompt_for_colors("a warm cozy kitchen");
        let mut rng = StdRng::seed_from_u64(2);
        let palette = select_palette(tables, &ColorOptions::default(), &context, &mut rng);
        let expected = tables
            .mood_palettes
            .get("warm_energetic")
            .expect("warm palette exists");
        assert_eq!(palette.description, expected.description);
    }

    #[test]
    fn unknown_palette_keys_degrade_to_earth_natural() {
        let tables = ColorTables::builtin();
        let options = ColorOptions {
            color_approach: ColorApproach::Cultural,
            cultural_palette: "atlantean_glow".to_string(),
            ..ColorOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let palette = select_palette(tables, &options, &ColorContext::default(), &mut rng);
        assert_eq!(palette.description, "Natural earth colors");
    }

    #[test]
    fn subtle_intensity_names_no_swatches() {
        let tables = ColorTables::builtin();
        let options = ColorOptions {
            color_intensity: ColorIntensity::Subtle,
            ..ColorOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let palette = select_palette(tables, &options, &ColorContext::default(), &mut rng);
        let tags = generate_color_tags(&palette, &options, &mut rng);
        for color in &palette.colors {
            assert!(!tags.contains(color), "swatch {color} leaked into subtle tags");
        }
        assert!(tags.contains(&"muted".to_string()));
    }

    #[test]
    fn moderate_intensity_samples_up_to_three_swatches() {
        let tables = ColorTables::builtin();
        let options = ColorOptions::default();
        let mut rng = StdRng::seed_from_u64(4);
        let palette = select_palette(tables, &options, &ColorContext::default(), &mut rng);
        let tags = generate_color_tags(&palette, &options, &mut rng);
        let sampled = tags
            .iter()
            .filter(|tag| palette.colors.contains(tag))
            .count();
        assert_eq!(sampled, 3.min(palette.colors.len()));
    }

    #[test]
    fn harmony_approach_emits_scheme_tags_without_swatches() {
        let options = ColorOptions {
            color_approach: ColorApproach::HarmonyTheory,
            harmony_scheme: "complementary".to_string(),
            ..ColorOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let result = harmonize_colors("a bold poster", &options, &mut rng);
        assert!(result.prompt.contains("complementary_colors"));
        assert!(result.summary.contains("Palette: Colors opposite on the color wheel"));
    }

    #[test]
    fn metallic_elements_add_suffix_tags() {
        let options = ColorOptions {
            metallic_elements: "gold".to_string(),
            ..ColorOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let result = harmonize_colors("a ring on velvet", &options, &mut rng);
        assert!(result.prompt.contains("gold_accents"));
        assert!(result.prompt.contains("metallic_finish"));
    }

    #[test]
    fn summary_reports_the_tag_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = harmonize_colors("plain scene", &ColorOptions::default(), &mut rng);
        let count_line = result
            .summary
            .lines()
            .last()
            .expect("summary has lines");
        assert!(count_line.starts_with("- Color Tags Added: "));
    }
}
