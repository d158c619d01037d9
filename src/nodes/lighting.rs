//! Lighting designer: studio, natural, equipment and mood driven setups with
//! ratio, temperature, atmosphere and shadow/highlight modifiers. Selection
//! is fully deterministic: the lighting tables map each key to a single
//! configuration, so no random draw is involved.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{all_matches, first_match};
use crate::assemble::{emphasize_all, join_prompt, EmphasisLevel};
use crate::nodes::{push_all, push_owned, render_summary, Enhancement};
use crate::tables::lighting::{
    LightingSelection, LightingTables, DEFAULT_EQUIPMENT, DEFAULT_MOOD,
    DEFAULT_NATURAL_CONDITION, DEFAULT_STUDIO_SETUP,
};
use crate::tables::{lookup_or, AUTO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingApproach {
    StudioProfessional,
    NaturalConditions,
    EquipmentSimulation,
    #[default]
    MoodAtmospheric,
    TechnicalControl,
    CreativeArtistic,
}

impl LightingApproach {
    pub fn as_str(self) -> &'static str {
        match self {
            LightingApproach::StudioProfessional => "studio_professional",
            LightingApproach::NaturalConditions => "natural_conditions",
            LightingApproach::EquipmentSimulation => "equipment_simulation",
            LightingApproach::MoodAtmospheric => "mood_atmospheric",
            LightingApproach::TechnicalControl => "technical_control",
            LightingApproach::CreativeArtistic => "creative_artistic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingQuality {
    Soft,
    #[default]
    Moderate,
    Dramatic,
    Cinematic,
}

impl LightingQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            LightingQuality::Soft => "soft",
            LightingQuality::Moderate => "moderate",
            LightingQuality::Dramatic => "dramatic",
            LightingQuality::Cinematic => "cinematic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereDensity {
    Clear,
    LightHaze,
    #[default]
    Atmospheric,
    Moody,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensFlare {
    #[default]
    None,
    Subtle,
    Moderate,
    Dramatic,
}

impl LensFlare {
    fn as_str(self) -> &'static str {
        match self {
            LensFlare::None => "none",
            LensFlare::Subtle => "subtle",
            LensFlare::Moderate => "moderate",
            LensFlare::Dramatic => "dramatic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingContrast {
    Low,
    #[default]
    Moderate,
    High,
    Extreme,
}

impl LightingContrast {
    pub fn as_str(self) -> &'static str {
        match self {
            LightingContrast::Low => "low",
            LightingContrast::Moderate => "moderate",
            LightingContrast::High => "high",
            LightingContrast::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeContext {
    Sunrise,
    Sunset,
    Night,
    Day,
    Unknown,
}

impl TimeContext {
    fn as_str(self) -> &'static str {
        match self {
            TimeContext::Sunrise => "sunrise",
            TimeContext::Sunset => "sunset",
            TimeContext::Night => "night",
            TimeContext::Day => "day",
            TimeContext::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEnvironment {
    Indoor,
    Outdoor,
    Urban,
    Natural,
    Unknown,
}

impl LightEnvironment {
    fn as_str(self) -> &'static str {
        match self {
            LightEnvironment::Indoor => "indoor",
            LightEnvironment::Outdoor => "outdoor",
            LightEnvironment::Urban => "urban",
            LightEnvironment::Natural => "natural",
            LightEnvironment::Unknown => "unknown",
        }
    }
}

/// Lighting cues detected in the base prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingContext {
    pub lighting_types: Vec<&'static str>,
    pub time: TimeContext,
    pub environment: LightEnvironment,
}

impl LightingContext {
    fn mentions(&self, lighting_type: &str) -> bool {
        self.lighting_types.iter().any(|detected| *detected == lighting_type)
    }
}

impl Default for LightingContext {
    fn default() -> Self {
        LightingContext {
            lighting_types: Vec::new(),
            time: TimeContext::Unknown,
            environment: LightEnvironment::Unknown,
        }
    }
}

const LIGHT_TYPE_RULES: &[(&str, &[&str])] = &[
    ("studio", &["studio", "professional", "controlled"]),
    ("natural", &["sunlight", "daylight", "outdoor", "natural"]),
    ("dramatic", &["dramatic", "moody", "cinematic", "intense"]),
    ("soft", &["soft", "gentle", "diffused", "even"]),
    ("warm", &["warm", "golden", "sunset", "cozy"]),
    ("cool", &["cool", "blue", "morning", "crisp"]),
    ("artificial", &["neon", "led", "fluorescent", "artificial"]),
];

const TIME_RULES: &[(TimeContext, &[&str])] = &[
    (TimeContext::Sunrise, &["sunrise", "dawn", "early morning"]),
    (TimeContext::Sunset, &["sunset", "dusk", "golden hour"]),
    (TimeContext::Night, &["night", "evening", "dark"]),
    (TimeContext::Day, &["day", "daylight", "noon", "afternoon"]),
];

const ENVIRONMENT_RULES: &[(LightEnvironment, &[&str])] = &[
    (LightEnvironment::Indoor, &["indoor", "inside", "studio", "room"]),
    (LightEnvironment::Outdoor, &["outdoor", "outside", "landscape", "nature"]),
    (LightEnvironment::Urban, &["city", "street", "urban", "building"]),
    (LightEnvironment::Natural, &["forest", "beach", "mountain", "field"]),
];

pub fn analyze_prompt_for_lighting(prompt: &str) -> LightingContext {
    let lower = prompt.to_lowercase();
    LightingContext {
        lighting_types: all_matches(&lower, LIGHT_TYPE_RULES),
        time: first_match(&lower, TIME_RULES, TimeContext::Unknown),
        environment: first_match(&lower, ENVIRONMENT_RULES, LightEnvironment::Unknown),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LightingOptions {
    pub lighting_approach: LightingApproach,
    pub lighting_quality: LightingQuality,
    pub studio_setup: String,
    pub natural_condition: String,
    pub primary_equipment: String,
    pub lighting_mood: String,
    pub lighting_ratio: String,
    pub color_temperature: String,
    pub atmosphere_density: AtmosphereDensity,
    pub practical_lights: bool,
    pub lens_flare: LensFlare,
    pub light_rays: bool,
    pub volumetric_lighting: bool,
    pub shadow_control: String,
    pub highlight_control: String,
    pub lighting_contrast: LightingContrast,
    pub lighting_emphasis: EmphasisLevel,
    pub context_awareness: bool,
}

impl Default for LightingOptions {
    fn default() -> Self {
        LightingOptions {
            lighting_approach: LightingApproach::default(),
            lighting_quality: LightingQuality::default(),
            studio_setup: AUTO.to_string(),
            natural_condition: AUTO.to_string(),
            primary_equipment: AUTO.to_string(),
            lighting_mood: AUTO.to_string(),
            lighting_ratio: AUTO.to_string(),
            color_temperature: AUTO.to_string(),
            atmosphere_density: AtmosphereDensity::default(),
            practical_lights: false,
            lens_flare: LensFlare::default(),
            light_rays: false,
            volumetric_lighting: false,
            shadow_control: AUTO.to_string(),
            highlight_control: AUTO.to_string(),
            lighting_contrast: LightingContrast::default(),
            lighting_emphasis: EmphasisLevel::default(),
            context_awareness: true,
        }
    }
}

fn select_lighting(
    tables: &LightingTables,
    options: &LightingOptions,
    context: &LightingContext,
) -> LightingSelection {
    match options.lighting_approach {
        LightingApproach::StudioProfessional => {
            let key: &str = if options.studio_setup == AUTO {
                if context.mentions("dramatic") {
                    "rembrandt_portrait"
                } else if context.mentions("soft") {
                    "beauty_dish_glamour"
                } else {
                    DEFAULT_STUDIO_SETUP
                }
            } else {
                &options.studio_setup
            };
            LightingSelection::from_studio(lookup_or(
                &tables.studio_setups,
                "studio setup",
                key,
                DEFAULT_STUDIO_SETUP,
            ))
        }
        LightingApproach::NaturalConditions => {
            let key: &str = if options.natural_condition == AUTO {
                match context.time {
                    TimeContext::Sunrise | TimeContext::Sunset => "golden_hour",
                    TimeContext::Night => "blue_hour",
                    TimeContext::Day => "overcast_soft",
                    TimeContext::Unknown => DEFAULT_NATURAL_CONDITION,
                }
            } else {
                &options.natural_condition
            };
            LightingSelection::from_natural(lookup_or(
                &tables.natural_lighting,
                "natural condition",
                key,
                DEFAULT_NATURAL_CONDITION,
            ))
        }
        LightingApproach::EquipmentSimulation => {
            let key: &str = if options.primary_equipment == AUTO {
                if context.mentions("soft") {
                    "softbox_large"
                } else if context.mentions("dramatic") {
                    "grid_spot"
                } else {
                    DEFAULT_EQUIPMENT
                }
            } else {
                &options.primary_equipment
            };
            LightingSelection::from_equipment(lookup_or(
                &tables.equipment_types,
                "equipment type",
                key,
                DEFAULT_EQUIPMENT,
            ))
        }
        LightingApproach::MoodAtmospheric => {
            let key: &str = if options.lighting_mood == AUTO {
                if context.mentions("dramatic") {
                    "cinematic_dramatic"
                } else if context.mentions("soft") {
                    "romantic_soft"
                } else {
                    DEFAULT_MOOD
                }
            } else {
                &options.lighting_mood
            };
            LightingSelection::from_mood(lookup_or(
                &tables.lighting_moods,
                "lighting mood",
                key,
                DEFAULT_MOOD,
            ))
        }
        LightingApproach::TechnicalControl | LightingApproach::CreativeArtistic => {
            LightingSelection::from_mood(lookup_or(
                &tables.lighting_moods,
                "lighting mood",
                DEFAULT_MOOD,
                DEFAULT_MOOD,
            ))
        }
    }
}

fn generate_lighting_tags(
    tables: &LightingTables,
    selection: &LightingSelection,
    options: &LightingOptions,
) -> Vec<String> {
    let mut tags = selection.tags.clone();

    let quality_tags: &[&str] = match options.lighting_quality {
        LightingQuality::Soft => &["soft_lighting", "gentle_illumination", "diffused"],
        LightingQuality::Moderate => &["balanced_lighting", "natural_quality", "professional"],
        LightingQuality::Dramatic => &["dramatic_lighting", "high_contrast", "cinematic"],
        LightingQuality::Cinematic => &["cinematic_lighting", "film_quality", "artistic"],
    };
    push_all(&mut tags, quality_tags);

    if options.lighting_ratio != AUTO {
        match tables.lighting_ratios.get(&options.lighting_ratio) {
            Some(ratio) => {
                tags.push(format!(
                    "lighting_ratio_{}",
                    options.lighting_ratio.replace("_to_", "_")
                ));
                tags.push(format!("{}_contrast", ratio.contrast));
            }
            None => warn!(
                "Unknown lighting ratio '{}', skipping ratio tags",
                options.lighting_ratio
            ),
        }
    }

    if options.color_temperature != AUTO {
        match tables.color_temperatures.get(&options.color_temperature) {
            Some(temperature) => push_owned(&mut tags, &temperature.tags),
            None => warn!(
                "Unknown color temperature '{}', skipping temperature tags",
                options.color_temperature
            ),
        }
    }

    let density_tags: &[&str] = match options.atmosphere_density {
        AtmosphereDensity::Clear => &[],
        AtmosphereDensity::LightHaze => &["light_haze", "subtle_atmosphere"],
        AtmosphereDensity::Atmospheric => &["atmospheric", "mood_lighting"],
        AtmosphereDensity::Moody => &["moody_atmosphere", "heavy_mood"],
        AtmosphereDensity::Heavy => &["heavy_atmosphere", "dense_mood"],
    };
    push_all(&mut tags, density_tags);

    if options.practical_lights {
        push_all(&mut tags, &["practical_lights", "ambient_sources", "environmental_lighting"]);
    }
    if options.lens_flare != LensFlare::None {
        tags.push(format!("{}_lens_flare", options.lens_flare.as_str()));
        tags.push("optical_effects".to_string());
    }
    if options.light_rays {
        push_all(&mut tags, &["light_rays", "volumetric_rays", "atmospheric_rays"]);
    }
    if options.volumetric_lighting {
        push_all(&mut tags, &["volumetric_lighting", "light_beams", "atmospheric_lighting"]);
    }

    if options.shadow_control != AUTO {
        let shadow_tags: &[&str] = match options.shadow_control.as_str() {
            "blocked" => &["blocked_shadows", "deep_blacks"],
            "detailed" => &["detailed_shadows", "shadow_information"],
            "lifted" => &["lifted_shadows", "open_shadows"],
            "artistic" => &["artistic_shadows", "creative_shadows"],
            _ => &[],
        };
        push_all(&mut tags, shadow_tags);
    }

    if options.highlight_control != AUTO {
        let highlight_tags: &[&str] = match options.highlight_control.as_str() {
            "protected" => &["protected_highlights", "detail_retention"],
            "normal" => &["natural_highlights", "balanced_exposure"],
            "blown" => &["blown_highlights", "high_key"],
            "artistic" => &["artistic_highlights", "creative_exposure"],
            _ => &[],
        };
        push_all(&mut tags, highlight_tags);
    }

    let contrast_tags: &[&str] = match options.lighting_contrast {
        LightingContrast::Low => &["low_contrast", "flat_lighting", "even_tones"],
        LightingContrast::Moderate => &["moderate_contrast", "balanced_tones"],
        LightingContrast::High => &["high_contrast", "dramatic_tones"],
        LightingContrast::Extreme => &["extreme_contrast", "artistic_contrast"],
    };
    push_all(&mut tags, contrast_tags);

    tags
}

/// Designs lighting for `base_prompt` with the built-in lighting tables.
pub fn design_lighting(base_prompt: &str, options: &LightingOptions) -> Enhancement {
    design_lighting_using(LightingTables::builtin(), base_prompt, options)
}

pub fn design_lighting_using(
    tables: &LightingTables,
    base_prompt: &str,
    options: &LightingOptions,
) -> Enhancement {
    let context = if options.context_awareness {
        analyze_prompt_for_lighting(base_prompt)
    } else {
        LightingContext::default()
    };

    let selection = select_lighting(tables, options, &context);
    let lighting_tags = generate_lighting_tags(tables, &selection, options);
    let emphasized = emphasize_all(&lighting_tags, options.lighting_emphasis);

    let mut summary_parts = vec![
        format!("Approach: {}", options.lighting_approach.as_str()),
        format!("Configuration: {}", selection.description),
        format!("Quality: {}", options.lighting_quality.as_str()),
    ];
    if !context.lighting_types.is_empty() {
        summary_parts.push(format!(
            "Detected Lighting: {}",
            context.lighting_types.join(", ")
        ));
    }
    if context.time != TimeContext::Unknown {
        summary_parts.push(format!("Time Context: {}", context.time.as_str()));
    }
    if context.environment != LightEnvironment::Unknown {
        summary_parts.push(format!("Environment: {}", context.environment.as_str()));
    }

    let mut technical = Vec::new();
    if options.lighting_ratio != AUTO {
        technical.push(format!("Lighting Ratio: {}", options.lighting_ratio));
    }
    if options.color_temperature != AUTO {
        technical.push(format!("Color Temperature: {}", options.color_temperature));
    }
    technical.push(format!(
        "Lighting Contrast: {}",
        options.lighting_contrast.as_str()
    ));
    summary_parts.push(format!("Technical: {}", technical.join(", ")));

    let mut effects = Vec::new();
    if options.practical_lights {
        effects.push("Practical Lights".to_string());
    }
    if options.lens_flare != LensFlare::None {
        effects.push(format!("Lens Flare ({})", options.lens_flare.as_str()));
    }
    if options.light_rays {
        effects.push("Light Rays".to_string());
    }
    if options.volumetric_lighting {
        effects.push("Volumetric".to_string());
    }
    if !effects.is_empty() {
        summary_parts.push(format!("Effects: {}", effects.join(", ")));
    }

    if options.lighting_emphasis != EmphasisLevel::Medium {
        summary_parts.push(format!("Emphasis: {}", options.lighting_emphasis));
    }
    summary_parts.push(format!("Lighting Tags Added: {}", lighting_tags.len()));

    Enhancement {
        prompt: join_prompt(base_prompt, &emphasized),
        summary: render_summary("Lighting design applied:", &summary_parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_lighting_cues_time_and_environment() {
        let context = analyze_prompt_for_lighting("moody sunset over the city street");
        assert!(context.mentions("dramatic"));
        assert!(context.mentions("warm"));
        assert_eq!(context.time, TimeContext::Sunset);
        assert_eq!(context.environment, LightEnvironment::Urban);
    }

    #[test]
    fn studio_auto_follows_the_dramatic_cue() {
        let tables = LightingTables::builtin();
        let options = LightingOptions {
            lighting_approach: LightingApproach::StudioProfessional,
            ..LightingOptions::default()
        };
        let context = analyze_prompt_for_lighting("an intense dramatic portrait");
        let selection = select_lighting(tables, &options, &context);
        let rembrandt = tables
            .studio_setups
            .get("rembrandt_portrait")
            .expect("rembrandt setup exists");
        assert_eq!(selection.description, rembrandt.description);
    }

    #[test]
    fn unknown_studio_setup_degrades_to_three_point() {
        let tables = LightingTables::builtin();
        let options = LightingOptions {
            lighting_approach: LightingApproach::StudioProfessional,
            studio_setup: "quadruple_rainbow".to_string(),
            ..LightingOptions::default()
        };
        let selection = select_lighting(tables, &options, &LightingContext::default());
        let classic = tables
            .studio_setups
            .get(DEFAULT_STUDIO_SETUP)
            .expect("three point setup exists");
        assert_eq!(selection.description, classic.description);
    }

    #[test]
    fn natural_auto_maps_night_to_blue_hour() {
        let tables = LightingTables::builtin();
        let options = LightingOptions {
            lighting_approach: LightingApproach::NaturalConditions,
            ..LightingOptions::default()
        };
        let context = analyze_prompt_for_lighting("a quiet night alley");
        let selection = select_lighting(tables, &options, &context);
        let blue_hour = tables
            .natural_lighting
            .get("blue_hour")
            .expect("blue_hour exists");
        assert_eq!(selection.description, blue_hour.description);
    }

    #[test]
    fn ratio_tags_use_the_compact_key_form() {
        let options = LightingOptions {
            lighting_ratio: "4_to_1".to_string(),
            ..LightingOptions::default()
        };
        let result = design_lighting("studio portrait", &options);
        assert!(result.prompt.contains("lighting_ratio_4_1"));
        assert!(result.prompt.contains("high_contrast"));
        assert!(result.summary.contains("Lighting Ratio: 4_to_1"));
    }

    #[test]
    fn creative_approach_uses_the_natural_organic_mood() {
        let tables = LightingTables::builtin();
        let options = LightingOptions {
            lighting_approach: LightingApproach::CreativeArtistic,
            ..LightingOptions::default()
        };
        let selection = select_lighting(tables, &options, &LightingContext::default());
        let organic = tables
            .lighting_moods
            .get(DEFAULT_MOOD)
            .expect("natural organic mood exists");
        assert_eq!(selection.description, organic.description);
    }

    #[test]
    fn effects_flags_append_their_tag_blocks_in_order() {
        let options = LightingOptions {
            practical_lights: true,
            lens_flare: LensFlare::Subtle,
            light_rays: true,
            volumetric_lighting: true,
            ..LightingOptions::default()
        };
        let result = design_lighting("a concert stage", &options);
        let practical = result.prompt.find("practical_lights").expect("practical present");
        let flare = result.prompt.find("subtle_lens_flare").expect("flare present");
        let rays = result.prompt.find("light_rays").expect("rays present");
        let volumetric = result
            .prompt
            .find("volumetric_lighting")
            .expect("volumetric present");
        assert!(practical < flare && flare < rays && rays < volumetric);
        assert!(result
            .summary
            .contains("Effects: Practical Lights, Lens Flare (subtle), Light Rays, Volumetric"));
    }

    #[test]
    fn same_input_always_yields_the_same_output() {
        let options = LightingOptions::default();
        let first = design_lighting("a foggy forest at dawn", &options);
        let second = design_lighting("a foggy forest at dawn", &options);
        assert_eq!(first, second);
    }
}
