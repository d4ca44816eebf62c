use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use unarr_platform::{ProcessEvent, ProcessHandle};

use super::completion::Completion;
use super::unarchiver::Unarchiver;
use crate::core::{Event, ExtractRequest, Interpreter, build_extract};
use crate::data::{ExtractOptions, ExtractReport, ExtractResponse, ProgressFn, ResponseShape};
use crate::error::{Error, Result};

impl Unarchiver {
    /// Extract `archive` (or `options.archive` when `archive` is empty).
    ///
    /// `options.on_progress` is called once per extracted file, in output
    /// order, before this future resolves. Files reported before a failure
    /// are not retracted; the error is the only result.
    pub async fn extract(
        &self,
        archive: impl AsRef<Path>,
        options: ExtractOptions,
    ) -> Result<ExtractReport> {
        let request = ExtractRequest::resolve(Some(archive.as_ref()), options)?;
        self.run_extract(&request).await
    }

    /// Like [`Unarchiver::extract`], shaped by `options.response`.
    pub async fn extract_response(
        &self,
        archive: impl AsRef<Path>,
        options: ExtractOptions,
    ) -> Result<ExtractResponse> {
        let request = ExtractRequest::resolve(Some(archive.as_ref()), options)?;
        let report = self.run_extract(&request).await?;

        Ok(match request.options.response {
            ResponseShape::Detailed => ExtractResponse::Detailed(report),
            ResponseShape::DirectoryOnly if report.directory.is_empty() => {
                ExtractResponse::Directory(request.target_dir.clone())
            }
            ResponseShape::DirectoryOnly => ExtractResponse::Directory(PathBuf::from(report.directory)),
        })
    }

    async fn run_extract(&self, request: &ExtractRequest) -> Result<ExtractReport> {
        let log_command = !request.options.quiet;

        // Entry lines are the only progress signal, so `unar` must not be quiet.
        let mut request = request.clone();
        request.options.quiet = false;

        let argv = build_extract(&self.tools.unar, &request)?;
        if log_command {
            info!(cmd = %argv.display(), "extracting");
        } else {
            debug!(cmd = %argv.display(), "extracting");
        }

        let handle = Self::command(&argv).spawn_piped()?;
        let interpreter = Interpreter::with_grammar(self.grammar.clone());
        drive(handle, interpreter, request.options.on_progress.as_ref()).await
    }
}

/// Feed child output through the interpreter until the first terminal
/// notification, then kill the child if the operation failed.
async fn drive(
    mut handle: ProcessHandle,
    mut interpreter: Interpreter,
    on_progress: Option<&ProgressFn>,
) -> Result<ExtractReport> {
    let completion = Completion::new();

    while !completion.is_resolved() {
        let Some(event) = handle.next_event().await else {
            let tail = interpreter.finish();
            dispatch(tail, on_progress, &completion);
            completion.resolve(Ok(interpreter.report()));
            break;
        };

        match event {
            ProcessEvent::Stdout(chunk) => {
                let events = interpreter.feed(&chunk);
                dispatch(events, on_progress, &completion);
            }
            ProcessEvent::Stderr(chunk) if !chunk.is_empty() => {
                let message = String::from_utf8_lossy(&chunk).trim_end().to_string();
                debug!(stderr = %message, "unar wrote to stderr");
                completion.resolve(Err(Error::Subprocess(message)));
            }
            ProcessEvent::Stderr(_) => {}
            ProcessEvent::Exited(status) => {
                if !status.success() {
                    warn!(%status, "unar exited unsuccessfully without reporting a failure");
                }
                let tail = interpreter.finish();
                dispatch(tail, on_progress, &completion);
                completion.resolve(Ok(interpreter.report()));
            }
            ProcessEvent::Closed => {
                let tail = interpreter.finish();
                dispatch(tail, on_progress, &completion);
                completion.resolve(Ok(interpreter.report()));
            }
        }
    }

    if completion.is_failure() {
        let pid = handle.pid();
        let status = handle.terminate().await;
        debug!(?pid, ?status, "terminated unar after failure");
    }

    completion
        .into_result()
        .unwrap_or_else(|| Ok(interpreter.into_report()))
}

fn dispatch(events: Vec<Event>, on_progress: Option<&ProgressFn>, completion: &Completion<ExtractReport>) {
    for event in events {
        match event {
            Event::FileExtracted(file) => {
                if let Some(callback) = on_progress {
                    callback(&file);
                }
            }
            Event::Failed(marker) => {
                debug!(?marker, "extraction failed");
                completion.resolve(Err(Error::NoFilesExtracted));
            }
            Event::TypeDetected(_) | Event::DirectoryResolved(_) => {}
        }
    }
}
