//! Size optimizer: resolves target pixel dimensions from named platform
//! presets or custom values, corrects aspect ratio, and derives resolution,
//! ratio, quality and platform tags. Both returned dimensions are always
//! exact multiples of 8.

use serde::Deserialize;
use tracing::warn;

use crate::assemble::{emphasize_all, join_prompt, EmphasisLevel};
use crate::nodes::{push_all, render_summary};
use crate::tables::sizing::SizingTables;
use crate::tables::AUTO;

/// Preset name selecting custom dimensions instead of a platform entry.
pub const CUSTOM: &str = "custom";

pub const MIN_DIMENSION: u32 = 64;
pub const MAX_DIMENSION: u32 = 16384;
const DEFAULT_DIMENSION: u32 = 1024;
const RATIO_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationTarget {
    Quality,
    FileSize,
    #[default]
    Balanced,
    Performance,
    Bandwidth,
    Storage,
}

impl OptimizationTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizationTarget::Quality => "quality",
            OptimizationTarget::FileSize => "file_size",
            OptimizationTarget::Balanced => "balanced",
            OptimizationTarget::Performance => "performance",
            OptimizationTarget::Bandwidth => "bandwidth",
            OptimizationTarget::Storage => "storage",
        }
    }

    fn tags(self) -> &'static [&'static str] {
        match self {
            OptimizationTarget::Quality => &["maximum_quality", "detail_enhanced", "crisp"],
            OptimizationTarget::FileSize => &["size_optimized", "efficient", "compressed"],
            OptimizationTarget::Performance => {
                &["performance_optimized", "fast_processing", "efficient_rendering"]
            }
            // Bandwidth and storage share the balanced profile.
            OptimizationTarget::Balanced
            | OptimizationTarget::Bandwidth
            | OptimizationTarget::Storage => &["balanced_quality", "optimized", "professional"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizeOptions {
    pub size_preset: String,
    pub optimization_target: OptimizationTarget,
    pub custom_width: u32,
    pub custom_height: u32,
    pub aspect_ratio: String,
    pub maintain_aspect: bool,
    pub quality_preset: String,
    pub platform_optimization: bool,
    pub add_size_tags: bool,
    pub size_emphasis: EmphasisLevel,
}

impl Default for SizeOptions {
    fn default() -> Self {
        SizeOptions {
            size_preset: "fhd_1080p".to_string(),
            optimization_target: OptimizationTarget::default(),
            custom_width: DEFAULT_DIMENSION,
            custom_height: DEFAULT_DIMENSION,
            aspect_ratio: AUTO.to_string(),
            maintain_aspect: true,
            quality_preset: "web_high".to_string(),
            platform_optimization: true,
            add_size_tags: true,
            size_emphasis: EmphasisLevel::default(),
        }
    }
}

/// Output of the size optimizer. `width` and `height` are multiples of 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingResult {
    pub prompt: String,
    pub summary: String,
    pub width: u32,
    pub height: u32,
}

fn clamp_dimension(value: u32) -> u32 {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        warn!("Dimension {value} outside {MIN_DIMENSION}..={MAX_DIMENSION}, clamping");
    }
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

const fn floor_to_multiple_of_8(value: u32) -> u32 {
    value / 8 * 8
}

fn calculate_optimal_size(tables: &SizingTables, options: &SizeOptions) -> (u32, u32) {
    let (base_width, base_height) = if options.size_preset == CUSTOM {
        let width = clamp_dimension(options.custom_width);
        let mut height = clamp_dimension(options.custom_height);

        if options.aspect_ratio != AUTO && options.maintain_aspect {
            match tables.aspect_ratios.get(&options.aspect_ratio) {
                Some(target) => {
                    let current = f64::from(width) / f64::from(height);
                    if (current - target.ratio).abs() > RATIO_EPSILON {
                        // Width is authoritative; only the height is adjusted.
                        height = clamp_dimension((f64::from(width) / target.ratio) as u32);
                    }
                }
                None => warn!(
                    "Unknown aspect ratio '{}', keeping original proportions",
                    options.aspect_ratio
                ),
            }
        }
        (width, height)
    } else {
        match tables.platform_sizes.get(&options.size_preset) {
            Some(size) => (size.width, size.height),
            None => {
                warn!(
                    "Unknown size preset '{}', using {DEFAULT_DIMENSION}x{DEFAULT_DIMENSION}",
                    options.size_preset
                );
                (DEFAULT_DIMENSION, DEFAULT_DIMENSION)
            }
        }
    };

    (
        floor_to_multiple_of_8(base_width),
        floor_to_multiple_of_8(base_height),
    )
}

fn generate_size_tags(
    tables: &SizingTables,
    width: u32,
    height: u32,
    options: &SizeOptions,
) -> Vec<String> {
    let mut tags = Vec::new();

    let pixel_count = u64::from(width) * u64::from(height);
    let tier_tags: &[&str] = if pixel_count >= 7680 * 4320 {
        &["8K_resolution", "ultra_high_definition", "maximum_detail"]
    } else if pixel_count >= 3840 * 2160 {
        &["4K_resolution", "ultra_high_definition", "crisp_detail"]
    } else if pixel_count >= 2560 * 1440 {
        &["QHD_resolution", "high_definition", "sharp_detail"]
    } else if pixel_count >= 1920 * 1080 {
        &["full_HD", "1080p", "high_definition"]
    } else if pixel_count >= 1280 * 720 {
        &["HD_resolution", "720p", "standard_definition"]
    } else {
        &["standard_resolution", "optimized_size"]
    };
    push_all(&mut tags, tier_tags);

    let ratio = f64::from(width) / f64::from(height);
    let ratio_tags: &[&str] = if (ratio - 1.0).abs() < 0.1 {
        &["square_format"]
    } else if ratio > 2.0 {
        &["ultrawide", "panoramic", "cinematic_width"]
    } else if ratio > 1.5 {
        &["widescreen", "landscape_format"]
    } else if ratio > 1.0 {
        &["landscape_orientation"]
    } else if ratio < 0.7 {
        &["portrait_orientation", "vertical_format", "mobile_friendly"]
    } else {
        &["portrait_format"]
    };
    push_all(&mut tags, ratio_tags);

    match tables.quality_presets.get(&options.quality_preset) {
        Some(preset) => {
            let quality_tags: &[&str] = if preset.dpi >= 600 {
                &["premium_quality", "print_ready", "archival_grade"]
            } else if preset.dpi >= 300 {
                &["print_quality", "professional_grade", "high_resolution"]
            } else if preset.dpi >= 144 {
                &["retina_display", "high_DPI", "screen_optimized"]
            } else {
                &["web_optimized", "fast_loading"]
            };
            push_all(&mut tags, quality_tags);
        }
        None => {
            warn!(
                "Unknown quality preset '{}', using standard quality tags",
                options.quality_preset
            );
            push_all(&mut tags, &["standard_quality", "balanced_optimization"]);
        }
    }

    if options.platform_optimization && options.size_preset != CUSTOM {
        let preset = options.size_preset.as_str();
        if preset.contains("instagram") {
            push_all(&mut tags, &["instagram_optimized", "social_media_ready"]);
        } else if preset.contains("print") {
            push_all(&mut tags, &["print_optimized", "CMYK_ready"]);
        } else if preset.contains("product") {
            push_all(&mut tags, &["ecommerce_ready", "product_showcase"]);
        } else if ["youtube", "website", "blog"].iter().any(|p| preset.contains(p)) {
            push_all(&mut tags, &["web_optimized", "digital_display"]);
        }
    }

    tags
}

/// Optimizes sizing for `base_prompt` with the built-in sizing tables.
pub fn optimize_sizing(base_prompt: &str, options: &SizeOptions) -> SizingResult {
    optimize_sizing_using(SizingTables::builtin(), base_prompt, options)
}

pub fn optimize_sizing_using(
    tables: &SizingTables,
    base_prompt: &str,
    options: &SizeOptions,
) -> SizingResult {
    let (width, height) = calculate_optimal_size(tables, options);

    let size_tags = if options.add_size_tags {
        generate_size_tags(tables, width, height, options)
    } else {
        Vec::new()
    };

    let mut optimization_tags = Vec::new();
    push_all(&mut optimization_tags, options.optimization_target.tags());

    let emphasis = options.size_emphasis;
    let mut all_tags = emphasize_all(&size_tags, emphasis);
    all_tags.extend(emphasize_all(&optimization_tags, emphasis));

    let mut summary_parts = vec![
        format!("Dimensions: {width} x {height}"),
        format!("Aspect Ratio: {:.3}:1", f64::from(width) / f64::from(height)),
    ];

    if options.size_preset != CUSTOM {
        match tables.platform_sizes.get(&options.size_preset) {
            Some(size) => {
                summary_parts.push(format!("Platform: {}", size.description));
                summary_parts.push(format!("Standard Ratio: {}", size.ratio));
            }
            None => {
                summary_parts.push(format!("Platform: {} (preset not found)", options.size_preset))
            }
        }
    }

    match tables.quality_presets.get(&options.quality_preset) {
        Some(preset) => summary_parts.push(format!(
            "Quality: {} ({} DPI)",
            preset.description, preset.dpi
        )),
        None => summary_parts.push(format!(
            "Quality: {} (preset not found)",
            options.quality_preset
        )),
    }
    summary_parts.push(format!(
        "Optimization: {}",
        options.optimization_target.as_str()
    ));

    if emphasis != EmphasisLevel::Medium {
        summary_parts.push(format!("Emphasis: {emphasis}"));
    }
    if !all_tags.is_empty() {
        summary_parts.push(format!("Tags Added: {}", all_tags.len()));
    }

    SizingResult {
        prompt: join_prompt(base_prompt, &all_tags),
        summary: render_summary("Size optimization applied:", &summary_parts),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(width: u32, height: u32) -> SizeOptions {
        SizeOptions {
            size_preset: CUSTOM.to_string(),
            custom_width: width,
            custom_height: height,
            ..SizeOptions::default()
        }
    }

    #[test]
    fn dimensions_are_always_multiples_of_8() {
        for (width, height) in [(64, 64), (100, 100), (1063, 638), (16384, 16383), (999, 77)] {
            let result = optimize_sizing("image", &custom(width, height));
            assert_eq!(result.width % 8, 0, "width for {width}x{height}");
            assert_eq!(result.height % 8, 0, "height for {width}x{height}");
            assert!(result.width >= 64 && result.height >= 64);
        }
    }

    #[test]
    fn aspect_correction_recomputes_height_from_width() {
        let options = SizeOptions {
            aspect_ratio: "1:1".to_string(),
            maintain_aspect: true,
            ..custom(1000, 500)
        };
        let result = optimize_sizing("image", &options);
        assert_eq!((result.width, result.height), (1000, 1000));
    }

    #[test]
    fn matching_ratio_within_epsilon_is_left_alone() {
        let options = SizeOptions {
            aspect_ratio: "1:1".to_string(),
            maintain_aspect: true,
            ..custom(1000, 1000)
        };
        let result = optimize_sizing("image", &options);
        assert_eq!((result.width, result.height), (1000, 1000));
    }

    #[test]
    fn disabled_maintain_aspect_keeps_custom_proportions() {
        let options = SizeOptions {
            aspect_ratio: "1:1".to_string(),
            maintain_aspect: false,
            ..custom(1000, 500)
        };
        let result = optimize_sizing("image", &options);
        assert_eq!((result.width, result.height), (1000, 496));
    }

    #[test]
    fn unknown_aspect_ratio_keeps_original_proportions() {
        let options = SizeOptions {
            aspect_ratio: "7:99".to_string(),
            maintain_aspect: true,
            ..custom(1000, 500)
        };
        let result = optimize_sizing("image", &options);
        assert_eq!((result.width, result.height), (1000, 496));
    }

    #[test]
    fn unknown_preset_defaults_to_1024_square() {
        let options = SizeOptions {
            size_preset: "holodeck_wall".to_string(),
            ..SizeOptions::default()
        };
        let result = optimize_sizing("image", &options);
        assert_eq!((result.width, result.height), (1024, 1024));
        assert!(result.summary.contains("Platform: holodeck_wall (preset not found)"));
    }

    #[test]
    fn out_of_range_custom_dimensions_are_clamped() {
        let result = optimize_sizing("image", &custom(10, 20000));
        assert_eq!(result.width, 64);
        assert_eq!(result.height, 16384);
    }

    #[test]
    fn uhd_4k_classifies_as_4k_not_qhd() {
        let result = optimize_sizing("image", &custom(3840, 2160));
        assert!(result.prompt.contains("4K_resolution"));
        assert!(!result.prompt.contains("QHD_resolution"));
    }

    #[test]
    fn qhd_classifies_as_qhd_not_4k() {
        let result = optimize_sizing("image", &custom(2560, 1440));
        assert!(result.prompt.contains("QHD_resolution"));
        assert!(!result.prompt.contains("4K_resolution"));
    }

    #[test]
    fn just_below_hd_pixel_count_is_standard_resolution() {
        let result = optimize_sizing("image", &custom(1272, 720));
        assert!(result.prompt.contains("standard_resolution"));
    }

    #[test]
    fn ratio_tags_follow_the_threshold_ladder() {
        let ultrawide = optimize_sizing("image", &custom(2560, 1080));
        assert!(ultrawide.prompt.contains("ultrawide"));

        let widescreen = optimize_sizing("image", &custom(1920, 1080));
        assert!(widescreen.prompt.contains("widescreen"));

        let portrait = optimize_sizing("image", &custom(1080, 1920));
        assert!(portrait.prompt.contains("portrait_orientation"));

        let near_portrait = optimize_sizing("image", &custom(800, 1000));
        assert!(near_portrait.prompt.contains("portrait_format"));

        let square = optimize_sizing("image", &custom(1024, 1024));
        assert!(square.prompt.contains("square_format"));
    }

    #[test]
    fn quality_preset_tags_follow_dpi_bands() {
        let options = SizeOptions {
            quality_preset: "print_standard".to_string(),
            ..SizeOptions::default()
        };
        let result = optimize_sizing("image", &options);
        assert!(result.prompt.contains("print_quality"));
        assert!(result.summary.contains("(300 DPI)"));
    }

    #[test]
    fn unknown_quality_preset_uses_standard_tags() {
        let options = SizeOptions {
            quality_preset: "imaginary_dpi".to_string(),
            ..SizeOptions::default()
        };
        let result = optimize_sizing("image", &options);
        assert!(result.prompt.contains("standard_quality"));
        assert!(result.summary.contains("Quality: imaginary_dpi (preset not found)"));
    }

    #[test]
    fn instagram_presets_add_social_tags() {
        let options = SizeOptions {
            size_preset: "instagram_story".to_string(),
            ..SizeOptions::default()
        };
        let result = optimize_sizing("selfie", &options);
        assert_eq!((result.width, result.height), (1080, 1920));
        assert!(result.prompt.contains("instagram_optimized"));
    }

    #[test]
    fn optimization_target_controls_the_trailing_tags() {
        let options = SizeOptions {
            optimization_target: OptimizationTarget::Quality,
            add_size_tags: false,
            ..SizeOptions::default()
        };
        let result = optimize_sizing("image", &options);
        assert_eq!(
            result.prompt,
            "image, maximum_quality, detail_enhanced, crisp"
        );
    }

    #[test]
    fn bandwidth_and_storage_share_the_balanced_profile() {
        assert_eq!(
            OptimizationTarget::Bandwidth.tags(),
            OptimizationTarget::Balanced.tags()
        );
        assert_eq!(
            OptimizationTarget::Storage.tags(),
            OptimizationTarget::Balanced.tags()
        );
    }

    #[test]
    fn fhd_default_reports_platform_and_ratio_lines() {
        let result = optimize_sizing("image", &SizeOptions::default());
        assert_eq!((result.width, result.height), (1920, 1080));
        assert!(result.summary.contains("Platform: Full HD 1080p"));
        assert!(result.summary.contains("Standard Ratio: 16:9"));
        assert!(result.summary.contains("Aspect Ratio: 1.778:1"));
    }
}
