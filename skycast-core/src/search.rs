//! Session state behind the debounced place search.

use std::time::Duration;

use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Monotonic tokens: each trigger takes a new one and only the newest may apply its result.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: u64,
}

impl RequestTokens {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, token: u64) -> bool {
        token == self.latest
    }
}

/// Per-session search state: the last query actually sent, the pending
/// debounce timer and the request tokens for searches and weather fetches.
#[derive(Debug, Default)]
pub struct SearchSession {
    last_dispatched: Option<String>,
    pending: Option<JoinHandle<()>>,
    pub searches: RequestTokens,
    pub weather: RequestTokens,
}

impl SearchSession {
    /// Cancel the debounce timer, if one is running.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Install a new debounce timer, cancelling the previous one.
    pub fn replace_pending(&mut self, handle: JoinHandle<()>) {
        self.cancel_pending();
        self.pending = Some(handle);
    }

    pub fn take_pending(&mut self) -> Option<JoinHandle<()>> {
        self.pending.take()
    }

    /// Record `query` as dispatched unless it equals the previous dispatch.
    pub fn begin_dispatch(&mut self, query: &str) -> bool {
        if self.last_dispatched.as_deref() == Some(query) {
            return false;
        }
        self.last_dispatched = Some(query.to_string());
        true
    }

    /// The input was cleared: stop the timer, outdate any search in flight
    /// and forget the last dispatch so the same text can be searched again.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.searches.issue();
        self.last_dispatched = None;
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
