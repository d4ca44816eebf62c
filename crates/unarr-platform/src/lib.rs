//! Process launching and tool lookup for the unarr workspace.
//!
//! - `command` - Builder over `tokio::process::Command`
//! - `process` - Streaming child handle (stdout/stderr chunks, exit)
//! - `resolver` - Tool path resolution, done once at startup
//! - `dir` - User directories

pub use command::Command;
pub use error::{Error, Result};
pub use process::{ProcessEvent, ProcessHandle};
pub use resolver::{
    ChainResolver, EnvResolver, FixedResolver, PathResolver, SiblingResolver,
    ToolPaths, ToolResolver,
};

pub mod command;
pub mod dir;
mod error;
pub mod process;
pub mod resolver;
