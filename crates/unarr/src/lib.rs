//! Run the `unar` and `lsar` command-line tools and turn what they print
//! into typed results.
//!
//! # Architecture
//!
//! - [`data`] - Options and result types
//! - [`core`] - Pure transformations: argument vectors, the streaming
//!   `unar` output interpreter, `lsar` listing parsers
//! - `effects` - The [`Unarchiver`], which launches the tools and
//!   aggregates their output into one terminal result per call
//!
//! Extraction is streamed: each extracted entry is reported through
//! [`ExtractOptions::on_progress`] while `unar` is still running. Listing
//! buffers the whole `lsar` output.

pub mod core;
pub mod data;
mod effects;
mod error;

pub use self::core::{FailureMarker, OutputGrammar};
pub use data::{
    DefaultTarget, ExtractOptions, ExtractReport, ExtractResponse, ListOptions, Listing,
    ProgressFn, ResponseShape,
};
pub use effects::Unarchiver;
pub use error::{Error, Result};
pub use unarr_platform::ToolPaths;
