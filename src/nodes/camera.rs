//! Camera enhancer: shot framing, lens, aperture, angle, composition,
//! lighting style, focus and movement tags, steered by prompt context when a
//! category is left on `auto`.

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::first_match;
use crate::assemble::{emphasize_all, join_prompt, EmphasisLevel};
use crate::nodes::{push_all, push_owned, render_summary, Enhancement};
use crate::tables::camera::{
    CameraTables, APERTURE_SETTINGS, CAMERA_ANGLES, CAMERA_MOVEMENTS, COMPOSITION_RULES,
    FOCUS_TECHNIQUES, LENS_TYPES, LIGHTING_STYLES, SHOT_TYPES,
};
use crate::tables::AUTO;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectType {
    Person,
    Environment,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    Portrait,
    FullFigure,
    Landscape,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEnvironment {
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMood {
    Neutral,
    Dramatic,
    Bright,
    Romantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Static,
    Dynamic,
}

/// Scene classification extracted from the base prompt. Defaults describe
/// the most common case for this kind of prompt: an indoor portrait of a
/// person, static, neutral mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraContext {
    pub subject_type: SubjectType,
    pub scene_type: SceneType,
    pub environment: SceneEnvironment,
    pub mood: SceneMood,
    pub activity: Activity,
}

impl Default for CameraContext {
    fn default() -> Self {
        CameraContext {
            subject_type: SubjectType::Person,
            scene_type: SceneType::Portrait,
            environment: SceneEnvironment::Indoor,
            mood: SceneMood::Neutral,
            activity: Activity::Static,
        }
    }
}

const SUBJECT_RULES: &[(SubjectType, &[&str])] = &[
    (SubjectType::Person, &["1girl", "1boy", "person", "character", "portrait"]),
    (SubjectType::Environment, &["landscape", "scenery", "nature", "building"]),
    (SubjectType::Object, &["product", "object", "item", "still_life"]),
];

const SCENE_RULES: &[(SceneType, &[&str])] = &[
    (SceneType::Portrait, &["close", "face", "head", "portrait"]),
    (SceneType::FullFigure, &["full_body", "standing", "sitting", "pose"]),
    (SceneType::Landscape, &["landscape", "wide", "environment", "scenery"]),
    (SceneType::Product, &["product", "commercial", "advertising"]),
];

const ENVIRONMENT_RULES: &[(SceneEnvironment, &[&str])] = &[
    (SceneEnvironment::Outdoor, &["outdoor", "outside", "nature", "park", "street"]),
    (SceneEnvironment::Indoor, &["indoor", "inside", "room", "office", "studio"]),
];

const MOOD_RULES: &[(SceneMood, &[&str])] = &[
    (SceneMood::Dramatic, &["dramatic", "dark", "moody", "intense"]),
    (SceneMood::Bright, &["bright", "happy", "cheerful", "light"]),
    (SceneMood::Romantic, &["romantic", "soft", "gentle", "intimate"]),
];

const ACTIVITY_RULES: &[(Activity, &[&str])] = &[
    (Activity::Dynamic, &["running", "jumping", "dancing", "moving", "action"]),
    (Activity::Static, &["sitting", "standing", "posing", "static"]),
];

/// Classifies the base prompt. Pure keyword membership, no scoring: the
/// first matching rule per dimension wins and absent matches keep the
/// documented defaults, so the same prompt always yields the same context.
pub fn analyze_prompt_context(prompt: &str) -> CameraContext {
    let lower = prompt.to_lowercase();
    let defaults = CameraContext::default();
    CameraContext {
        subject_type: first_match(&lower, SUBJECT_RULES, defaults.subject_type),
        scene_type: first_match(&lower, SCENE_RULES, defaults.scene_type),
        environment: first_match(&lower, ENVIRONMENT_RULES, defaults.environment),
        mood: first_match(&lower, MOOD_RULES, defaults.mood),
        activity: first_match(&lower, ACTIVITY_RULES, defaults.activity),
    }
}

/// How much technical metadata to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalDetail {
    Minimal,
    #[default]
    Standard,
    Detailed,
    Technical,
    Professional,
    Expert,
}

impl TechnicalDetail {
    fn is_verbose(self) -> bool {
        matches!(self, TechnicalDetail::Detailed | TechnicalDetail::Technical)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    pub photography_style: String,
    pub shot_type: String,
    pub camera_quality: String,
    pub lens_type: String,
    pub aperture: String,
    pub focus_technique: String,
    pub camera_angle: String,
    pub composition: String,
    pub camera_movement: String,
    pub lighting_style: String,
    pub iso_setting: String,
    pub shutter_speed: String,
    pub white_balance: String,
    pub technical_detail: TechnicalDetail,
    pub camera_emphasis: EmphasisLevel,
    pub context_awareness: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        CameraOptions {
            photography_style: "professional".to_string(),
            shot_type: AUTO.to_string(),
            camera_quality: "professional".to_string(),
            lens_type: AUTO.to_string(),
            aperture: AUTO.to_string(),
            focus_technique: AUTO.to_string(),
            camera_angle: AUTO.to_string(),
            composition: AUTO.to_string(),
            camera_movement: AUTO.to_string(),
            lighting_style: AUTO.to_string(),
            iso_setting: AUTO.to_string(),
            shutter_speed: AUTO.to_string(),
            white_balance: AUTO.to_string(),
            technical_detail: TechnicalDetail::default(),
            camera_emphasis: EmphasisLevel::default(),
            context_awareness: true,
        }
    }
}

/// Two-level resolution: exact key, else a context-derived bucket for the
/// categories that have one, else the category's `auto` bucket. Unknown keys
/// degrade to `auto` inside [`TagBuckets::choose`].
///
/// [`TagBuckets::choose`]: crate::tables::TagBuckets::choose
fn smart_select<'a>(
    tables: &'a CameraTables,
    category: &str,
    choice: &str,
    context: &CameraContext,
    rng: &mut impl Rng,
) -> &'a str {
    let buckets = tables.category(category);
    if choice != AUTO {
        return buckets.choose(category, choice, rng);
    }

    let bucket_key = match category {
        SHOT_TYPES => match context.scene_type {
            SceneType::Portrait => "close_up",
            SceneType::Landscape => "wide_shot",
            SceneType::Product => "medium_shot",
            SceneType::FullFigure => AUTO,
        },
        LENS_TYPES => match context.scene_type {
            SceneType::Portrait => "portrait",
            SceneType::Landscape => "wide_angle",
            _ => AUTO,
        },
        APERTURE_SETTINGS => match context.scene_type {
            SceneType::Portrait => "wide_aperture",
            SceneType::Landscape => "narrow_aperture",
            _ => AUTO,
        },
        LIGHTING_STYLES => match (context.mood, context.environment) {
            (SceneMood::Dramatic, _) => "dramatic",
            (SceneMood::Romantic, _) => "soft",
            (_, SceneEnvironment::Outdoor) => "natural",
            _ => AUTO,
        },
        _ => AUTO,
    };
    buckets.choose(category, bucket_key, rng)
}

fn iso_tags(choice: &str) -> Vec<String> {
    let tags: &[&str] = match choice {
        "low_iso_100" => &["ISO_100", "clean_image", "no_noise"],
        "medium_iso_400" => &["ISO_400", "balanced", "versatile"],
        "high_iso_1600" => &["ISO_1600", "low_light", "slight_grain"],
        "ultra_high_iso" => &["high_ISO", "extreme_low_light", "film_grain"],
        other => return vec![other.to_string()],
    };
    tags.iter().map(|tag| tag.to_string()).collect()
}

fn shutter_tags(choice: &str) -> Vec<String> {
    let tags: &[&str] = match choice {
        "fast_freeze" => &["fast_shutter", "frozen_motion", "sharp_action"],
        "medium_sharp" => &["medium_shutter", "handheld_sharp"],
        "slow_motion_blur" => &["slow_shutter", "motion_blur", "dynamic_blur"],
        "long_exposure" => &["long_exposure", "light_trails", "smooth_water"],
        other => return vec![other.to_string()],
    };
    tags.iter().map(|tag| tag.to_string()).collect()
}

fn white_balance_tags(choice: &str) -> Vec<String> {
    let tags: &[&str] = match choice {
        "daylight" => &["daylight_balanced", "natural_colors"],
        "tungsten" => &["tungsten_balanced", "warm_corrected"],
        "fluorescent" => &["fluorescent_balanced", "cool_corrected"],
        "cloudy" => &["cloudy_balanced", "slightly_warm"],
        "shade" => &["shade_balanced", "blue_corrected"],
        other => return vec![other.to_string()],
    };
    tags.iter().map(|tag| tag.to_string()).collect()
}

fn camera_quality_tags(quality: &str) -> &'static [&'static str] {
    match quality {
        "standard" => &["good_quality", "clear"],
        "professional" => &["professional_quality", "commercial_grade", "high_end"],
        "high_end" => &["premium_quality", "luxury_grade", "top_tier"],
        "cinematic" => &["cinematic_quality", "film_grade", "movie_quality"],
        _ => &["professional_quality"],
    }
}

/// Enhances `base_prompt` with the built-in camera tables.
pub fn enhance_with_camera(
    base_prompt: &str,
    options: &CameraOptions,
    rng: &mut impl Rng,
) -> Enhancement {
    enhance_with_camera_using(CameraTables::builtin(), base_prompt, options, rng)
}

pub fn enhance_with_camera_using(
    tables: &CameraTables,
    base_prompt: &str,
    options: &CameraOptions,
    rng: &mut impl Rng,
) -> Enhancement {
    let context = if options.context_awareness {
        analyze_prompt_context(base_prompt)
    } else {
        CameraContext::default()
    };
    debug!(?context, "camera context resolved");

    let mut camera_tags: Vec<String> = Vec::new();
    let mut technical_tags: Vec<String> = Vec::new();
    let mut summary_parts: Vec<String> = Vec::new();

    if options.photography_style != AUTO {
        match tables.quality_enhancers(&options.photography_style) {
            Some(style_tags) => push_owned(&mut camera_tags, style_tags),
            None => camera_tags.push(options.photography_style.clone()),
        }
        summary_parts.push(format!("Style: {}", options.photography_style));
    }

    let shot_tag = smart_select(tables, SHOT_TYPES, &options.shot_type, &context, rng);
    camera_tags.push(shot_tag.to_string());
    summary_parts.push(format!("Shot: {shot_tag}"));

    let lens_tag = smart_select(tables, LENS_TYPES, &options.lens_type, &context, rng);
    technical_tags.push(lens_tag.to_string());
    summary_parts.push(format!("Lens: {lens_tag}"));

    let aperture_tag = smart_select(tables, APERTURE_SETTINGS, &options.aperture, &context, rng);
    technical_tags.push(aperture_tag.to_string());
    summary_parts.push(format!("Aperture: {aperture_tag}"));

    let angle_tag = smart_select(tables, CAMERA_ANGLES, &options.camera_angle, &context, rng);
    camera_tags.push(angle_tag.to_string());
    summary_parts.push(format!("Angle: {angle_tag}"));

    let composition_tag =
        smart_select(tables, COMPOSITION_RULES, &options.composition, &context, rng);
    camera_tags.push(composition_tag.to_string());
    summary_parts.push(format!("Composition: {composition_tag}"));

    let lighting_tag =
        smart_select(tables, LIGHTING_STYLES, &options.lighting_style, &context, rng);
    camera_tags.push(lighting_tag.to_string());
    summary_parts.push(format!("Lighting: {lighting_tag}"));

    let focus_tag =
        smart_select(tables, FOCUS_TECHNIQUES, &options.focus_technique, &context, rng);
    technical_tags.push(focus_tag.to_string());
    summary_parts.push(format!("Focus: {focus_tag}"));

    let movement_tag =
        smart_select(tables, CAMERA_MOVEMENTS, &options.camera_movement, &context, rng);
    camera_tags.push(movement_tag.to_string());
    summary_parts.push(format!("Movement: {movement_tag}"));

    if options.technical_detail.is_verbose() {
        if options.iso_setting != AUTO {
            technical_tags.extend(iso_tags(&options.iso_setting));
            summary_parts.push(format!("ISO: {}", options.iso_setting));
        }
        if options.shutter_speed != AUTO {
            technical_tags.extend(shutter_tags(&options.shutter_speed));
            summary_parts.push(format!("Shutter: {}", options.shutter_speed));
        }
        if options.white_balance != AUTO {
            technical_tags.extend(white_balance_tags(&options.white_balance));
            summary_parts.push(format!("WB: {}", options.white_balance));
        }
    }

    push_all(&mut camera_tags, camera_quality_tags(&options.camera_quality));

    let emphasis = options.camera_emphasis;
    let mut all_tags = emphasize_all(&camera_tags, emphasis);
    all_tags.extend(emphasize_all(&technical_tags, emphasis));

    if emphasis != EmphasisLevel::Medium {
        summary_parts.push(format!("Emphasis: {emphasis}"));
    }

    Enhancement {
        prompt: join_prompt(base_prompt, &all_tags),
        summary: render_summary("Camera settings applied:", &summary_parts),
    }
}
