//! Pure transformations: command lines in, typed results out.

pub mod args;
pub mod grammar;
pub mod interpreter;
pub mod lines;
pub mod listing;

pub use args::{ArgumentVector, ExtractRequest, ListRequest, build_extract, build_list};
pub use grammar::{FailureMarker, OutputGrammar};
pub use interpreter::{Event, Interpreter, Phase};
pub use lines::LineBuffer;
pub use listing::{is_entry_line, parse_json_listing, parse_listing};
