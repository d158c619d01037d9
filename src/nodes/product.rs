//! Product stager: commercial photography styles, marketplace platform
//! requirements, product-category and brand-positioning tags. Selection is
//! deterministic: every option maps to a single configuration.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{contains_any, first_match};
use crate::assemble::{emphasize_all, join_prompt, EmphasisLevel};
use crate::nodes::{push_all, push_owned, render_summary, Enhancement};
use crate::tables::product::{PhotographyStyle, ProductTables, DEFAULT_STYLE};
use crate::tables::{lookup_or, AUTO, NONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFocus {
    #[default]
    PrimaryProduct,
    ProductGroup,
    LifestyleContext,
    DetailMacro,
    ComparisonView,
}

impl ProductFocus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductFocus::PrimaryProduct => "primary_product",
            ProductFocus::ProductGroup => "product_group",
            ProductFocus::LifestyleContext => "lifestyle_context",
            ProductFocus::DetailMacro => "detail_macro",
            ProductFocus::ComparisonView => "comparison_view",
        }
    }

    fn tags(self) -> &'static [&'static str] {
        match self {
            ProductFocus::PrimaryProduct => {
                &["single_product_focus", "main_subject", "hero_product"]
            }
            ProductFocus::ProductGroup => &["product_group", "collection_shot", "family_view"],
            ProductFocus::LifestyleContext => {
                &["lifestyle_context", "in_use", "natural_setting"]
            }
            ProductFocus::DetailMacro => &["macro_detail", "close_up", "feature_focus"],
            ProductFocus::ComparisonView => {
                &["comparison_shot", "side_by_side", "variant_display"]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameFilling {
    Loose,
    #[default]
    Balanced,
    Tight,
    FullFrame,
}

impl FrameFilling {
    fn as_str(self) -> &'static str {
        match self {
            FrameFilling::Loose => "loose",
            FrameFilling::Balanced => "balanced",
            FrameFilling::Tight => "tight",
            FrameFilling::FullFrame => "full_frame",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageQuality {
    Standard,
    High,
    #[default]
    Professional,
    Commercial,
}

impl ImageQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::High => "high",
            ImageQuality::Professional => "professional",
            ImageQuality::Commercial => "commercial",
        }
    }

    fn tags(self) -> &'static [&'static str] {
        match self {
            ImageQuality::Standard => &["standard_quality", "basic_commercial"],
            ImageQuality::High => &["high_quality", "enhanced_detail"],
            ImageQuality::Professional => &["professional_quality", "commercial_grade"],
            ImageQuality::Commercial => &["commercial_quality", "premium_standard"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorAccuracy {
    Standard,
    #[default]
    Enhanced,
    TrueToLife,
    BrandMatched,
}

impl ColorAccuracy {
    fn tags(self) -> &'static [&'static str] {
        match self {
            ColorAccuracy::Standard => &["standard_color", "basic_accuracy"],
            ColorAccuracy::Enhanced => &["enhanced_color", "vibrant_accurate"],
            ColorAccuracy::TrueToLife => &["true_to_life_color", "natural_accurate"],
            ColorAccuracy::BrandMatched => &["brand_matched_color", "consistent_palette"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Overview,
    #[default]
    Detailed,
    Macro,
    Technical,
}

impl DetailLevel {
    fn tags(self) -> &'static [&'static str] {
        match self {
            DetailLevel::Overview => &["overview_shot", "general_view"],
            DetailLevel::Detailed => &["detailed_view", "feature_focus"],
            DetailLevel::Macro => &["macro_detail", "close_up_precision"],
            DetailLevel::Technical => &["technical_detail", "specification_view"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePreference {
    #[default]
    Clean,
    Lifestyle,
    Dramatic,
    Luxury,
}

/// Product cues detected in the base prompt. `category` holds the detected
/// family's short name, used both for the summary and (mapped onto the
/// category table keys) for automatic category tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductContext {
    pub category: Option<&'static str>,
    pub commercial_intent: bool,
    pub style_preference: StylePreference,
}

impl ProductContext {
    pub fn has_product_context(&self) -> bool {
        self.category.is_some()
    }
}

impl Default for ProductContext {
    fn default() -> Self {
        ProductContext {
            category: None,
            commercial_intent: false,
            style_preference: StylePreference::Clean,
        }
    }
}

const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("electronics", &["phone", "laptop", "camera", "headphones", "gadget", "device"]),
    ("fashion", &["clothing", "shirt", "dress", "shoes", "accessories", "fabric"]),
    ("beauty", &["makeup", "skincare", "cosmetics", "perfume", "beauty"]),
    ("home", &["furniture", "decor", "kitchen", "home", "interior"]),
    ("food", &["food", "beverage", "drink", "meal", "snack", "culinary"]),
    ("jewelry", &["jewelry", "ring", "necklace", "watch", "precious", "gold"]),
    ("sports", &["sports", "fitness", "athletic", "exercise", "gym", "outdoor"]),
    ("automotive", &["car", "auto", "vehicle", "motor", "mechanical", "parts"]),
];

/// Detected short names mapped onto the category table's keys.
fn category_table_key(category: &str) -> Option<&'static str> {
    match category {
        "electronics" => Some("electronics_tech"),
        "fashion" => Some("fashion_apparel"),
        "beauty" => Some("beauty_cosmetics"),
        "home" => Some("home_decor"),
        "food" => Some("food_beverage"),
        "jewelry" => Some("jewelry_accessories"),
        "sports" => Some("sports_fitness"),
        "automotive" => Some("automotive_parts"),
        _ => None,
    }
}

const COMMERCIAL_KEYWORDS: &[&str] = &[
    "product",
    "commercial",
    "marketing",
    "advertising",
    "sale",
    "buy",
    "purchase",
];

const STYLE_RULES: &[(StylePreference, &[&str])] = &[
    (StylePreference::Clean, &["clean", "minimal", "simple", "white"]),
    (StylePreference::Lifestyle, &["lifestyle", "natural", "contextual", "in_use"]),
    (StylePreference::Dramatic, &["dramatic", "bold", "striking", "hero"]),
    (StylePreference::Luxury, &["luxury", "premium", "elegant"]),
];

pub fn analyze_product_context(prompt: &str) -> ProductContext {
    let lower = prompt.to_lowercase();
    ProductContext {
        category: CATEGORY_RULES
            .iter()
            .find(|(_, keywords)| contains_any(&lower, keywords))
            .map(|(category, _)| *category),
        commercial_intent: contains_any(&lower, COMMERCIAL_KEYWORDS),
        style_preference: first_match(&lower, STYLE_RULES, StylePreference::Clean),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductOptions {
    pub photography_style: String,
    pub product_focus: ProductFocus,
    pub target_platform: String,
    pub mobile_optimization: bool,
    pub product_category: String,
    pub brand_positioning: String,
    pub background_style: String,
    pub lighting_setup: String,
    pub angle_perspective: String,
    pub composition_technique: String,
    pub frame_filling: FrameFilling,
    pub image_quality: ImageQuality,
    pub color_accuracy: ColorAccuracy,
    pub detail_level: DetailLevel,
    pub conversion_optimization: bool,
    pub call_to_action_space: bool,
    pub social_sharing_optimized: bool,
    pub price_point_indicator: String,
    pub product_emphasis: EmphasisLevel,
    pub context_awareness: bool,
}

impl Default for ProductOptions {
    fn default() -> Self {
        ProductOptions {
            photography_style: DEFAULT_STYLE.to_string(),
            product_focus: ProductFocus::default(),
            target_platform: NONE.to_string(),
            mobile_optimization: true,
            product_category: AUTO.to_string(),
            brand_positioning: AUTO.to_string(),
            background_style: AUTO.to_string(),
            lighting_setup: AUTO.to_string(),
            angle_perspective: AUTO.to_string(),
            composition_technique: AUTO.to_string(),
            frame_filling: FrameFilling::default(),
            image_quality: ImageQuality::default(),
            color_accuracy: ColorAccuracy::default(),
            detail_level: DetailLevel::default(),
            conversion_optimization: true,
            call_to_action_space: false,
            social_sharing_optimized: false,
            price_point_indicator: AUTO.to_string(),
            product_emphasis: EmphasisLevel::default(),
            context_awareness: true,
        }
    }
}

fn select_style_key<'a>(options: &'a ProductOptions, context: &ProductContext) -> &'a str {
    if options.photography_style != AUTO {
        return &options.photography_style;
    }
    if context.commercial_intent {
        return DEFAULT_STYLE;
    }
    match context.style_preference {
        StylePreference::Luxury => "luxury_premium",
        StylePreference::Dramatic => "hero_dramatic",
        _ => DEFAULT_STYLE,
    }
}

fn generate_product_tags(
    tables: &ProductTables,
    style: &PhotographyStyle,
    context: &ProductContext,
    options: &ProductOptions,
) -> Vec<String> {
    let mut tags = style.tags.clone();
    push_owned(&mut tags, &style.characteristics);

    if options.target_platform != NONE {
        match tables.platform_specs.get(&options.target_platform) {
            Some(platform) => {
                push_owned(&mut tags, &platform.tags);
                push_owned(&mut tags, &platform.requirements);
                if platform.background != "flexible" {
                    tags.push(format!("{}_background", platform.background));
                }
            }
            None => warn!(
                "Unknown target platform '{}', skipping platform tags",
                options.target_platform
            ),
        }
    }

    let category_key: Option<&str> = if options.product_category == AUTO {
        context.category.and_then(category_table_key)
    } else {
        Some(options.product_category.as_str())
    };
    if let Some(key) = category_key {
        match tables.product_categories.get(key) {
            Some(category) => {
                push_owned(&mut tags, &category.tags);
                push_owned(&mut tags, &category.focus_points);
                push_owned(&mut tags, &category.lighting_needs);
            }
            None => warn!("Unknown product category '{key}', skipping category tags"),
        }
    }

    if options.brand_positioning != AUTO {
        match tables.brand_positioning.get(&options.brand_positioning) {
            Some(brand) => {
                push_owned(&mut tags, &brand.tags);
                push_owned(&mut tags, &brand.characteristics);
                tags.push(format!("{}_style", brand.visual_style));
            }
            None => warn!(
                "Unknown brand positioning '{}', skipping brand tags",
                options.brand_positioning
            ),
        }
    }

    if options.background_style != AUTO {
        tags.push(format!("{}_background", options.background_style));
    }
    if options.lighting_setup != AUTO {
        tags.push(format!("{}_lighting", options.lighting_setup));
    }
    if options.angle_perspective != AUTO {
        tags.push(format!("{}_angle", options.angle_perspective));
    }

    if options.composition_technique != AUTO {
        match tables.composition_techniques.get(&options.composition_technique) {
            Some(composition) => push_owned(&mut tags, &composition.tags),
            None => warn!(
                "Unknown composition technique '{}', skipping composition tags",
                options.composition_technique
            ),
        }
    }

    tags.push(format!("{}_framing", options.frame_filling.as_str()));
    push_all(&mut tags, options.image_quality.tags());
    push_all(&mut tags, options.color_accuracy.tags());
    push_all(&mut tags, options.detail_level.tags());

    if options.conversion_optimization {
        push_all(&mut tags, &["conversion_optimized", "sales_focused", "purchase_intent"]);
    }
    if options.mobile_optimization {
        push_all(&mut tags, &["mobile_optimized", "responsive", "touch_friendly"]);
    }
    if options.call_to_action_space {
        push_all(&mut tags, &["cta_space", "text_ready", "marketing_layout"]);
    }
    if options.social_sharing_optimized {
        push_all(&mut tags, &["social_ready", "sharing_optimized", "viral_potential"]);
    }

    if options.price_point_indicator != AUTO {
        let price_tags: &[&str] = match options.price_point_indicator.as_str() {
            "budget" => &["budget_friendly", "value_focused", "accessible"],
            "mid_range" => &["mid_range", "balanced_value", "mainstream"],
            "premium" => &["premium_product", "high_value", "quality_focused"],
            "luxury" => &["luxury_product", "exclusive", "premium_tier"],
            _ => &[],
        };
        push_all(&mut tags, price_tags);
    }

    tags
}

/// Stages `base_prompt` as product photography with the built-in tables.
pub fn stage_product(base_prompt: &str, options: &ProductOptions) -> Enhancement {
    stage_product_using(ProductTables::builtin(), base_prompt, options)
}

pub fn stage_product_using(
    tables: &ProductTables,
    base_prompt: &str,
    options: &ProductOptions,
) -> Enhancement {
    let context = if options.context_awareness {
        analyze_product_context(base_prompt)
    } else {
        ProductContext::default()
    };

    let style_key = select_style_key(options, &context);
    let style = lookup_or(
        &tables.photography_styles,
        "photography style",
        style_key,
        DEFAULT_STYLE,
    );

    let mut product_tags = generate_product_tags(tables, style, &context, options);
    push_all(&mut product_tags, options.product_focus.tags());

    let emphasized = emphasize_all(&product_tags, options.product_emphasis);

    let mut summary_parts = vec![
        format!("Style: {}", options.photography_style),
        format!("Configuration: {}", style.description),
        format!("Focus: {}", options.product_focus.as_str()),
    ];
    if let Some(category) = context.category {
        summary_parts.push(format!("Category: {category}"));
    }
    if context.commercial_intent {
        summary_parts.push("Commercial Intent: Detected".to_string());
    }

    if options.target_platform != NONE {
        summary_parts.push(format!("Platform: {}", options.target_platform));
        if let Some(platform) = tables.platform_specs.get(&options.target_platform) {
            summary_parts.push(format!("Aspect Ratio: {}", platform.aspect_ratio));
        }
    }
    if options.brand_positioning != AUTO {
        summary_parts.push(format!("Brand Positioning: {}", options.brand_positioning));
    }
    summary_parts.push(format!(
        "Quality Standard: {}",
        options.image_quality.as_str()
    ));

    let mut technical = Vec::new();
    if options.background_style != AUTO {
        technical.push(format!("Background Style: {}", options.background_style));
    }
    if options.lighting_setup != AUTO {
        technical.push(format!("Lighting Setup: {}", options.lighting_setup));
    }
    if options.angle_perspective != AUTO {
        technical.push(format!("Angle Perspective: {}", options.angle_perspective));
    }
    if !technical.is_empty() {
        summary_parts.push(format!("Technical: {}", technical.join(", ")));
    }

    let mut commercial = Vec::new();
    if options.conversion_optimization {
        commercial.push("Conversion Optimized");
    }
    if options.mobile_optimization {
        commercial.push("Mobile Ready");
    }
    if options.social_sharing_optimized {
        commercial.push("Social Ready");
    }
    if !commercial.is_empty() {
        summary_parts.push(format!("Commercial: {}", commercial.join(", ")));
    }

    if options.product_emphasis != EmphasisLevel::Medium {
        summary_parts.push(format!("Emphasis: {}", options.product_emphasis));
    }
    summary_parts.push(format!("Product Tags Added: {}", product_tags.len()));

    Enhancement {
        prompt: join_prompt(base_prompt, &emphasized),
        summary: render_summary("Product photography optimized:", &summary_parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_category_intent_and_style() {
        let context = analyze_product_context("luxury watch product shot on velvet");
        assert_eq!(context.category, Some("jewelry"));
        assert!(context.commercial_intent);
        assert_eq!(context.style_preference, StylePreference::Luxury);
        assert!(context.has_product_context());
    }

    #[test]
    fn auto_style_with_commercial_intent_stays_clean_minimal() {
        let options = ProductOptions {
            photography_style: AUTO.to_string(),
            ..ProductOptions::default()
        };
        let context = analyze_product_context("product advertising for a phone");
        assert_eq!(select_style_key(&options, &context), DEFAULT_STYLE);
    }

    #[test]
    fn auto_style_follows_a_luxury_cue() {
        let options = ProductOptions {
            photography_style: AUTO.to_string(),
            ..ProductOptions::default()
        };
        // No commercial keyword, so the style preference decides.
        let context = analyze_product_context("an elegant perfume bottle");
        assert_eq!(select_style_key(&options, &context), "luxury_premium");
    }

    #[test]
    fn detected_category_contributes_its_table_tags() {
        let result = stage_product("a sleek laptop on a desk", &ProductOptions::default());
        // electronics maps onto the electronics_tech category entry.
        assert!(result.prompt.contains("tech_product"));
        assert!(result.summary.contains("Category: electronics"));
    }

    #[test]
    fn platform_spec_appends_background_requirement() {
        let options = ProductOptions {
            target_platform: "amazon_ecommerce".to_string(),
            ..ProductOptions::default()
        };
        let result = stage_product("a water bottle", &options);
        assert!(result.prompt.contains("amazon_compliant"));
        assert!(result.prompt.contains("pure_white_background"));
        assert!(result.summary.contains("Platform: amazon_ecommerce"));
        assert!(result.summary.contains("Aspect Ratio: 1:1"));
    }

    #[test]
    fn unknown_style_degrades_to_clean_minimal() {
        let options = ProductOptions {
            photography_style: "holographic_dreamscape".to_string(),
            ..ProductOptions::default()
        };
        let result = stage_product("a mug", &options);
        assert!(result
            .summary
            .contains("Configuration: Clean minimal product photography"));
    }

    #[test]
    fn focus_tags_come_last_before_assembly() {
        let result = stage_product("a mug", &ProductOptions::default());
        let tags: Vec<&str> = result.prompt.split(", ").collect();
        assert_eq!(
            &tags[tags.len() - 3..],
            &["single_product_focus", "main_subject", "hero_product"]
        );
    }

    #[test]
    fn frame_filling_and_quality_tags_are_always_present() {
        let options = ProductOptions {
            frame_filling: FrameFilling::FullFrame,
            image_quality: ImageQuality::Commercial,
            ..ProductOptions::default()
        };
        let result = stage_product("a chair", &options);
        assert!(result.prompt.contains("full_frame_framing"));
        assert!(result.prompt.contains("commercial_quality"));
        assert!(result.summary.contains("Quality Standard: commercial"));
    }
}
