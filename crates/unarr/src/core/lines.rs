//! Reassembles complete lines from arbitrarily split output chunks.

/// Byte buffer that hands out a line only once its terminator has arrived.
///
/// Lines end at `\n`; one trailing `\r` is dropped. Decoding happens per
/// complete line, so a multi-byte character split across two chunks is
/// decoded intact.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    pending: Vec<u8>,
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Next terminated line, without its terminator.
    pub fn next_complete_line(&mut self) -> Option<String> {
        let offset = self.pending[self.scanned..]
            .iter()
            .position(|&b| b == b'\n');

        let Some(offset) = offset else {
            self.scanned = self.pending.len();
            return None;
        };

        let end = self.scanned + offset;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        self.scanned = 0;

        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Unterminated bytes still waiting for a line end.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Flush the unterminated tail at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.pending.is_empty() {
            return None;
        }
        let mut tail = std::mem::take(&mut self.pending);
        if tail.last() == Some(&b'\r') {
            tail.pop();
        }
        Some(String::from_utf8_lossy(&tail).into_owned())
    }
}
