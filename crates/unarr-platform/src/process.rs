//! Streaming child process handle.
//!
//! A spawned child is owned by a supervisor task. Output is read in raw
//! chunks as it arrives and forwarded, together with the exit notification,
//! through a single ordered channel:
//!
//! `Stdout`/`Stderr`* → `Exited` → `Closed`
//!
//! `Exited` is only sent once the child has been reaped and both pipes have
//! reached end of file, so no output chunk ever follows it.

use std::process::ExitStatus;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 8 * 1024;
/// Chunks buffered ahead of the consumer before the pumps stop reading.
const EVENT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// Raw bytes read from the child's stdout. No line alignment.
    Stdout(Vec<u8>),
    /// Raw bytes read from the child's stderr.
    Stderr(Vec<u8>),
    /// The child has been reaped.
    Exited(ExitStatus),
    /// Both output streams are closed. Always the last event.
    Closed,
}

#[derive(Debug)]
pub struct ProcessHandle {
    program: String,
    pid: Option<u32>,
    events: mpsc::Receiver<ProcessEvent>,
    kill: Option<oneshot::Sender<()>>,
}

impl ProcessHandle {
    pub(crate) fn start(program: String, mut child: Child) -> Result<Self> {
        let stdout = child.stdout.take().ok_or_else(|| Error::MissingPipe {
            cmd: program.clone(),
            stream: "stdout",
        })?;
        let stderr = child.stderr.take().ok_or_else(|| Error::MissingPipe {
            cmd: program.clone(),
            stream: "stderr",
        })?;

        let pid = child.id();
        let (tx, events) = mpsc::channel(EVENT_CAPACITY);
        let (kill, kill_rx) = oneshot::channel();

        debug!(program = %program, ?pid, "spawned child process");
        tokio::spawn(supervise(program.clone(), child, stdout, stderr, tx, kill_rx));

        Ok(Self {
            program,
            pid,
            events,
            kill: Some(kill),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Next notification from the child, `None` once everything was delivered.
    pub async fn next_event(&mut self) -> Option<ProcessEvent> {
        self.events.recv().await
    }

    /// Request a forced kill. Events keep flowing until `Closed`.
    pub fn kill(&mut self) {
        if let Some(kill) = self.kill.take() {
            let _ = kill.send(());
        }
    }

    /// Kill the child and wait until it has been reaped.
    ///
    /// Pending output is discarded. Returns the exit status when the
    /// supervisor observed one.
    pub async fn terminate(mut self) -> Option<ExitStatus> {
        self.kill();

        let mut status = None;
        while let Some(event) = self.events.recv().await {
            if let ProcessEvent::Exited(exit) = event {
                status = Some(exit);
            }
        }
        status
    }
}

async fn supervise<O, E>(
    program: String,
    mut child: Child,
    stdout: O,
    stderr: E,
    tx: mpsc::Sender<ProcessEvent>,
    mut kill_rx: oneshot::Receiver<()>,
) where
    O: AsyncRead + Unpin + Send + 'static,
    E: AsyncRead + Unpin + Send + 'static,
{
    let out = tokio::spawn(pump(stdout, tx.clone(), ProcessEvent::Stdout));
    let err = tokio::spawn(pump(stderr, tx.clone(), ProcessEvent::Stderr));

    // A dropped handle also resolves `kill_rx`, which kills the child.
    let status = tokio::select! {
        status = child.wait() => status,
        _ = &mut kill_rx => {
            debug!(program = %program, "killing child process");
            if let Err(e) = child.start_kill() {
                debug!(program = %program, error = %e, "kill failed, child already gone");
            }
            child.wait().await
        }
    };

    let _ = tokio::join!(out, err);

    match status {
        Ok(status) => {
            debug!(program = %program, %status, "child process exited");
            let _ = tx.send(ProcessEvent::Exited(status)).await;
        }
        Err(e) => warn!(program = %program, error = %e, "failed to wait for child process"),
    }
    let _ = tx.send(ProcessEvent::Closed).await;
}

async fn pump<R>(mut reader: R, tx: mpsc::Sender<ProcessEvent>, wrap: fn(Vec<u8>) -> ProcessEvent)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                trace!(bytes = n, "child output chunk");
                if tx.send(wrap(buf[..n].to_vec())).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(error = %e, "reading child output failed");
                break;
            }
        }
    }
}
