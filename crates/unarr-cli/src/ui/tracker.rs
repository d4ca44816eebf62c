use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

pub trait TrackerBuilder<T: Tracker<U>, U> {
    fn build(self) -> T;
}

pub trait Tracker<Inc> {
    fn step(&self, step: Inc) -> &Self;
    fn finish(self);
}

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>10.cyan.bold} [{elapsed_precise}] {pos:>5} {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Spinner counting extracted entries, showing the latest one.
///
/// Cheap to clone; clones drive the same spinner, so one can live inside the
/// progress callback while the caller keeps another to finish it.
#[derive(Clone)]
pub struct EntryTracker {
    pb: ProgressBar,
    finish: Option<String>,
}

impl<'a> Tracker<&'a str> for EntryTracker {
    fn step(&self, entry: &'a str) -> &Self {
        self.pb.inc(1);
        self.pb.set_message(entry.to_string());
        self
    }

    fn finish(self) {
        match self.finish {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish_and_clear(),
        }
    }
}

impl EntryTracker {
    /// Drop the spinner without a final message, e.g. on failure.
    pub fn abandon(self) {
        self.pb.finish_and_clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntryTrackerBuilder {
    prefix: Option<String>,
    finish: Option<String>,
    hidden: bool,
}

impl EntryTrackerBuilder {
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_finish(mut self, finish: &str) -> Self {
        self.finish = Some(finish.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl<'a> TrackerBuilder<EntryTracker, &'a str> for EntryTrackerBuilder {
    fn build(self) -> EntryTracker {
        let pb = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let pb = match SPINNER_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };

        if let Some(prefix) = self.prefix {
            pb.set_prefix(prefix);
        }
        if !self.hidden {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        EntryTracker {
            pb,
            finish: self.finish,
        }
    }
}
