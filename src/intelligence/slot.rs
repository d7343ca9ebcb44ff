//! In-flight tracking for collaborator requests.
//!
//! Requests are fire-and-forget with no cancellation: issuing a second one
//! while the first is outstanding lets both run to completion, and whichever
//! response resolves last owns the displayed result. One slot per UI
//! context.

use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct SlotState {
    loading: bool,
    latest: Option<String>,
}

/// Last-write-wins holder for the most recent collaborator response.
#[derive(Debug, Clone, Default)]
pub struct ResponseSlot {
    state: Arc<Mutex<SlotState>>,
}

impl ResponseSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started and clear the displayed result.
    pub fn begin(&self) {
        let mut state = self.state.lock();
        state.loading = true;
        state.latest = None;
    }

    /// Record a finished response. Overwrites whatever resolved earlier.
    pub fn complete(&self, text: impl Into<String>) {
        let mut state = self.state.lock();
        state.loading = false;
        state.latest = Some(text.into());
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn latest(&self) -> Option<String> {
        self.state.lock().latest.clone()
    }
}
