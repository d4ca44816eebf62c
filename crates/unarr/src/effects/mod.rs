//! Operations that run the archive tools.

mod completion;
mod extract;
mod list;
mod unarchiver;

pub use unarchiver::Unarchiver;
