// Document layout: font-metric measurement and cursor-based pagination.
// The pagination pass is pure — rendering and file output live in `export`.

pub mod font_metrics;
pub mod paginate;

// Re-export the public API consumed by other modules (markdown, export, handlers).
pub use font_metrics::{default_page_config, get_metrics, FontFace, PageConfig};
pub use paginate::{paginate, PlanArtifact};
