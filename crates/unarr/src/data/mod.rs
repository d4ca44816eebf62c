//! Immutable option and result types.

pub mod options;
pub mod report;

pub use options::{DefaultTarget, ExtractOptions, ListOptions, ProgressFn, ResponseShape};
pub use report::{ExtractReport, ExtractResponse, Listing};
