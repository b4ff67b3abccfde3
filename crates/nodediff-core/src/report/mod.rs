//! Report rendering for comparison results.

pub mod human_summary;

pub use human_summary::{render_human_summary, suggestions, QualityGrade, SummaryOptions};
