//! Product photography tables: styles, marketplace platform specs, product
//! categories, brand positioning and composition techniques.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::require_key;

pub const DEFAULT_STYLE: &str = "clean_minimal";

#[derive(Debug, Clone, Deserialize)]
pub struct PhotographyStyle {
    pub description: String,
    pub characteristics: Vec<String>,
    pub tags: Vec<String>,
    pub use_case: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformSpec {
    pub requirements: Vec<String>,
    pub tags: Vec<String>,
    pub aspect_ratio: String,
    pub background: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCategory {
    pub focus_points: Vec<String>,
    pub tags: Vec<String>,
    pub lighting_needs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandPositioning {
    pub characteristics: Vec<String>,
    pub tags: Vec<String>,
    pub visual_style: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompositionTechnique {
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductTables {
    pub photography_styles: HashMap<String, PhotographyStyle>,
    pub platform_specs: HashMap<String, PlatformSpec>,
    pub product_categories: HashMap<String, ProductCategory>,
    pub brand_positioning: HashMap<String, BrandPositioning>,
    pub composition_techniques: HashMap<String, CompositionTechnique>,
}

static BUILTIN: Lazy<ProductTables> = Lazy::new(|| {
    ProductTables::from_yaml(include_str!("../../data/product.yaml"))
        .expect("built-in product tables are valid")
});

impl ProductTables {
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let tables: Self = serde_yaml::from_str(yaml)
            .map_err(|err| anyhow!("failed to parse product tables: {err}"))?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        require_key(&self.photography_styles, "photography_styles", DEFAULT_STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load_with_the_default_style() {
        let tables = ProductTables::builtin();
        let style = tables
            .photography_styles
            .get(DEFAULT_STYLE)
            .expect("default style exists");
        assert_eq!(style.use_case, "e-commerce");
    }

    #[test]
    fn amazon_platform_spec_requires_a_pure_white_background() {
        let spec = ProductTables::builtin()
            .platform_specs
            .get("amazon_ecommerce")
            .expect("amazon spec exists");
        assert_eq!(spec.background, "pure_white");
        assert_eq!(spec.aspect_ratio, "1:1");
    }
}
