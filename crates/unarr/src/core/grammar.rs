//! Markers of the human readable `unar` output.
//!
//! `unar` 1.x prints
//!
//! ```text
//! attr.7z: 7-Zip
//!   attr/normal file.txt  (0 B)... OK.
//!   attr/read-only file.txt  (0 B)... OK.
//! Successfully extracted to "tmp/attr".
//! ```
//!
//! The format is not a contract of the tool, so every marker lives here and
//! can be replaced as a whole.

/// Failure the tool only reports as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMarker {
    NoFilesExtracted,
    OpeningFileFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputGrammar {
    /// Per-entry confirmation; a first line carrying it is not a type banner.
    pub confirmation: &'static str,
    /// Start of the final destination line.
    pub completed: &'static str,
    /// Opens the quoted destination inside the completed line.
    pub directory_open: &'static str,
    pub directory_close: char,
    /// Separates indentation, entry name and size on an entry line.
    pub field_separator: &'static str,
    pub no_files_extracted: &'static str,
    pub opening_file_failed: &'static str,
}

impl Default for OutputGrammar {
    fn default() -> Self {
        Self::UNAR_1
    }
}

impl OutputGrammar {
    pub const UNAR_1: Self = Self {
        confirmation: "OK.",
        completed: "Successfully",
        directory_open: "to \"",
        directory_close: '"',
        field_separator: "  ",
        no_files_extracted: "No files extracted",
        opening_file_failed: "Opening file failed",
    };

    /// Case-sensitive, anywhere in `text`.
    pub fn failure(&self, text: &str) -> Option<FailureMarker> {
        if text.contains(self.no_files_extracted) {
            Some(FailureMarker::NoFilesExtracted)
        } else if text.contains(self.opening_file_failed) {
            Some(FailureMarker::OpeningFileFailed)
        } else {
            None
        }
    }

    pub fn is_confirmation(&self, line: &str) -> bool {
        line.contains(self.confirmation)
    }

    pub fn is_completed(&self, line: &str) -> bool {
        line.contains(self.completed)
    }

    /// Text between `to "` and the next `"`. Unterminated quotes run to the
    /// end of the line.
    pub fn directory<'a>(&self, line: &'a str) -> Option<&'a str> {
        let (_, rest) = line.split_once(self.directory_open)?;
        rest.split(self.directory_close).next()
    }

    /// Second field of an entry line, if present and non-empty.
    pub fn entry_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.split(self.field_separator)
            .nth(1)
            .filter(|name| !name.is_empty())
    }
}
