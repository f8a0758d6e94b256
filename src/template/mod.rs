//! Template preparation for correlation.

mod plan;

pub use plan::TemplatePlan;
