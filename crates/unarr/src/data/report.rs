use std::ops::Deref;
use std::path::PathBuf;

use serde::Serialize;

/// What `unar` reported while extracting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Banner printed before the first entry, e.g. `attr.7z: 7-Zip`.
    /// Empty when the tool printed none.
    #[serde(rename = "type")]
    pub archive_type: String,
    /// Extracted entries in the order the tool reported them.
    pub files: Vec<String>,
    /// Destination from the final `Successfully extracted to "..."` line.
    pub directory: String,
}

/// Successful extract result, in the shape the caller asked for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Detailed(ExtractReport),
    Directory(PathBuf),
}

impl ExtractResponse {
    pub fn directory(&self) -> PathBuf {
        match self {
            Self::Detailed(report) => PathBuf::from(&report.directory),
            Self::Directory(dir) => dir.clone(),
        }
    }
}

/// Entry names printed by `lsar`, header removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Listing(pub Vec<String>);

impl Listing {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for Listing {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl IntoIterator for Listing {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
