//! Incremental interpreter for `unar` stdout.
//!
//! ```text
//! AwaitingType ──banner──▶ TypeKnown ──entry──▶ Extracting ──"Successfully"──▶ Completed
//!      │                       │                    │                             │
//!      └───────────────────────┴──── failure marker ┴─────────────────────────────┴──▶ Failed
//! ```
//!
//! `Failed` is absorbing: once reached, further input is ignored.

use tracing::{debug, trace};

use super::grammar::{FailureMarker, OutputGrammar};
use super::lines::LineBuffer;
use crate::data::ExtractReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    AwaitingType,
    TypeKnown,
    Extracting,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    TypeDetected(String),
    FileExtracted(String),
    DirectoryResolved(String),
    Failed(FailureMarker),
}

#[derive(Debug, Default)]
pub struct Interpreter {
    grammar: OutputGrammar,
    lines: LineBuffer,
    phase: Phase,
    archive_type: String,
    files: Vec<String>,
    directory: String,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grammar(grammar: OutputGrammar) -> Self {
        Self {
            grammar,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    pub fn archive_type(&self) -> &str {
        &self.archive_type
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Consume one raw stdout chunk.
    ///
    /// Failure markers are searched in the chunk as a whole before any line
    /// handling, and take precedence over everything else in it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        if self.is_failed() || chunk.is_empty() {
            return events;
        }

        let text = String::from_utf8_lossy(chunk);
        trace!(chunk = %text, "unar stdout");
        if let Some(marker) = self.grammar.failure(&text) {
            self.fail(marker, &mut events);
            return events;
        }

        self.lines.push(chunk);
        while let Some(line) = self.lines.next_complete_line() {
            self.line(&line, &mut events);
            if self.is_failed() {
                break;
            }
        }
        events
    }

    /// End of stream: an unterminated last line still counts.
    pub fn finish(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.is_failed() {
            return events;
        }
        if let Some(line) = self.lines.finish() {
            self.line(&line, &mut events);
        }
        events
    }

    pub fn report(&self) -> ExtractReport {
        ExtractReport {
            archive_type: self.archive_type.clone(),
            files: self.files.clone(),
            directory: self.directory.clone(),
        }
    }

    pub fn into_report(self) -> ExtractReport {
        ExtractReport {
            archive_type: self.archive_type,
            files: self.files,
            directory: self.directory,
        }
    }

    fn fail(&mut self, marker: FailureMarker, events: &mut Vec<Event>) {
        debug!(?marker, from = ?self.phase, "unar reported failure");
        self.phase = Phase::Failed;
        events.push(Event::Failed(marker));
    }

    fn line(&mut self, line: &str, events: &mut Vec<Event>) {
        if line.trim().is_empty() {
            return;
        }
        if let Some(marker) = self.grammar.failure(line) {
            self.fail(marker, events);
            return;
        }

        match self.phase {
            Phase::AwaitingType if self.grammar.is_confirmation(line) => {
                // No banner: the first line already reports an entry.
                self.phase = Phase::TypeKnown;
                self.body(line, events);
            }
            Phase::AwaitingType => {
                self.archive_type = line.to_string();
                self.phase = Phase::TypeKnown;
                debug!(archive_type = %self.archive_type, "archive type detected");
                events.push(Event::TypeDetected(self.archive_type.clone()));
            }
            Phase::TypeKnown | Phase::Extracting | Phase::Completed => self.body(line, events),
            Phase::Failed => {}
        }
    }

    fn body(&mut self, line: &str, events: &mut Vec<Event>) {
        if self.grammar.is_completed(line) {
            if self.phase != Phase::Completed {
                if let Some(dir) = self.grammar.directory(line) {
                    self.directory = dir.to_string();
                    debug!(directory = %self.directory, "destination resolved");
                    events.push(Event::DirectoryResolved(self.directory.clone()));
                }
                self.phase = Phase::Completed;
            }
            return;
        }

        if let Some(name) = self.grammar.entry_name(line) {
            self.files.push(name.to_string());
            events.push(Event::FileExtracted(name.to_string()));
            if self.phase == Phase::TypeKnown {
                self.phase = Phase::Extracting;
            }
        }
    }
}
