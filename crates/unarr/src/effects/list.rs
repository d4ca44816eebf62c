use std::path::Path;

use tracing::{debug, info};

use super::unarchiver::Unarchiver;
use crate::core::{ListRequest, build_list, parse_json_listing, parse_listing};
use crate::data::{ListOptions, Listing};
use crate::error::{Error, Result};

impl Unarchiver {
    /// List the entries of `archive` (or `options.archive` when `archive` is
    /// empty). `lsar` runs to completion before its output is parsed.
    pub async fn list(&self, archive: impl AsRef<Path>, options: ListOptions) -> Result<Listing> {
        let request = ListRequest::resolve(Some(archive.as_ref()), options)?;
        let argv = build_list(&self.tools.lsar, &request);
        if request.options.quiet {
            debug!(cmd = %argv.display(), "listing");
        } else {
            info!(cmd = %argv.display(), "listing");
        }

        let output = Self::command(&argv).output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let detail = stdout.trim();
            return Err(Error::Subprocess(if detail.is_empty() {
                format!("lsar {}", output.status)
            } else {
                format!("lsar {}: {detail}", output.status)
            }));
        }
        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Subprocess(stderr.trim_end().to_string()));
        }

        if request.options.wants_json() {
            parse_json_listing(&stdout)
        } else {
            parse_listing(&stdout)
        }
    }
}
