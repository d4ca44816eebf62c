use once_cell::unsync::OnceCell;

use crate::error::Result;

/// Single-assignment slot for the terminal result of one operation.
///
/// Exit, close and failure notifications may all race to finish an
/// operation; only the first one to arrive is recorded.
pub(crate) struct Completion<T> {
    slot: OnceCell<Result<T>>,
}

impl<T> Completion<T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Record `result` unless a result is already present. Returns whether
    /// this call won.
    pub(crate) fn resolve(&self, result: Result<T>) -> bool {
        self.slot.set(result).is_ok()
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    pub(crate) fn is_failure(&self) -> bool {
        matches!(self.slot.get(), Some(Err(_)))
    }

    pub(crate) fn into_result(self) -> Option<Result<T>> {
        self.slot.into_inner()
    }
}
