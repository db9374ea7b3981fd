use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{GrafctlError, Result};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    responses: VecDeque<ApiResponse>,
    requests: Vec<ApiRequest>,
}

/// In-memory transport for tests.
///
/// Answers requests from a queue of canned responses, in order, and records
/// every request it sees. Clones share the same queue and log, so a test can
/// keep a handle after moving one into a [`super::Client`].
#[derive(Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // a panicking test thread must not hide the recorded requests
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues a response with the canonical reason phrase for `status`.
    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        self.state().responses.push_back(ApiResponse {
            status,
            reason,
            body: body.into(),
        });
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) {
        self.respond(status, body.to_string());
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    pub fn pending(&self) -> usize {
        self.state().responses.len()
    }
}

impl Transport for MemoryTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state();
        state.requests.push(request.clone());
        state.responses.pop_front().ok_or_else(|| {
            GrafctlError::Transport(format!(
                "no response queued for {} {}",
                request.method, request.url
            ))
        })
    }
}
