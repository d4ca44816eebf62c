pub mod tracker;

pub use tracker::{EntryTracker, EntryTrackerBuilder, Tracker, TrackerBuilder};
