//! `lsar` output parsing. Works on the whole buffered stdout.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::data::Listing;
use crate::error::{Error, Result};

/// Trailing `: FORMAT` of a nested archive banner, e.g. `inner.tar: TAR`.
static ARCHIVE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r": [A-Z,7]*$").expect("archive type pattern is valid"));

/// Whether an `lsar` output line can be an entry name.
pub fn is_entry_line(line: &str) -> bool {
    !line.is_empty() && !line.contains(['\r', '\n']) && !ARCHIVE_TYPE.is_match(line)
}

/// Entry names from plain `lsar` output. The first retained line is the
/// archive banner and is dropped.
pub fn parse_listing(stdout: &str) -> Result<Listing> {
    let mut retained = stdout
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| is_entry_line(line));

    let Some(header) = retained.next() else {
        return Err(Error::EmptyArchiveOrNoMatch(String::new()));
    };

    let files: Vec<String> = retained.map(str::to_string).collect();
    if files.is_empty() {
        return Err(Error::EmptyArchiveOrNoMatch(header.to_string()));
    }
    Ok(Listing(files))
}

#[derive(Deserialize)]
struct LsarDocument {
    #[serde(rename = "lsarContents", default)]
    contents: Vec<LsarEntry>,
}

#[derive(Deserialize)]
struct LsarEntry {
    #[serde(rename = "XADFileName")]
    name: Option<String>,
}

/// Entry names from `lsar -j` / `lsar -ja` output.
pub fn parse_json_listing(stdout: &str) -> Result<Listing> {
    let document: LsarDocument = serde_json::from_str(stdout)?;
    let files: Vec<String> = document
        .contents
        .into_iter()
        .filter_map(|entry| entry.name)
        .filter(|name| !name.is_empty())
        .collect();

    if files.is_empty() {
        return Err(Error::EmptyArchiveOrNoMatch(String::new()));
    }
    Ok(Listing(files))
}
