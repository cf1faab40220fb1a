//! Text segmentation and rule checking for legislative PDFs.
pub mod clean;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod refine;
pub mod rules;
pub mod sections;
pub mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{ExtractError, RefineError};
pub use model::{DocumentAnalysis, RuleResult, RuleStatus, SectionKey, SectionMap};
pub use pipeline::{analyze_text, process};
pub use refine::{RefineSettings, RefinedAnalysis, Refiner};
