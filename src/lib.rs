//! Data-driven prompt enhancers for image-generation hosts.
//!
//! Five independent, stateless components (camera, color, lighting, product
//! and sizing) each append curated descriptive tags to a base prompt. Tags
//! are drawn from static lookup tables (embedded YAML under `data/`),
//! optionally steered by lightweight keyword analysis of the input string.
//! Every entry point is a pure synchronous function: same inputs (and, where
//! applicable, RNG state) always produce the same output, and unknown option
//! keys degrade to safe defaults instead of failing.
//!
//! ```
//! use prompt_studio::{enhance_with_camera, CameraOptions};
//!
//! let mut rng = rand::thread_rng();
//! let result = enhance_with_camera("1girl, standing", &CameraOptions::default(), &mut rng);
//! assert!(result.prompt.starts_with("1girl, standing, "));
//! ```

mod analysis;
pub mod assemble;
pub mod nodes;
pub mod tables;

pub use assemble::{apply_emphasis, EmphasisLevel, UnknownEmphasisLevel};
pub use nodes::camera::{enhance_with_camera, enhance_with_camera_using, CameraOptions};
pub use nodes::color::{harmonize_colors, harmonize_colors_using, ColorOptions};
pub use nodes::lighting::{design_lighting, design_lighting_using, LightingOptions};
pub use nodes::product::{stage_product, stage_product_using, ProductOptions};
pub use nodes::sizing::{optimize_sizing, optimize_sizing_using, SizeOptions, SizingResult};
pub use nodes::Enhancement;
