use anyhow::Result;
use async_trait::async_trait;
use pco_admin::api::{ApiRequest, ApiResponse, Method, Transport};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    routes: Vec<(Method, String, ApiResponse)>,
    requests: Vec<ApiRequest>,
    pdf: Vec<u8>,
}

/// Replays canned envelopes by method and path and keeps every request it saw.
///
/// Clones share state, so a test can keep one handle after moving another
/// into a service.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations for the same route win
    pub fn respond(&self, method: Method, path: &str, response: ApiResponse) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .push((method, path.to_string(), response));
        self
    }

    pub fn serve_pdf(&self, bytes: &[u8]) {
        self.state.lock().unwrap().pdf = bytes.to_vec();
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        let response = state
            .routes
            .iter()
            .rev()
            .find(|(method, path, _)| *method == request.method && *path == request.path)
            .map(|(_, _, response)| response.clone())
            .unwrap_or_else(|| {
                ApiResponse::failure(format!("No route for {} {}", request.method, request.path))
            });
        state.requests.push(request);
        Ok(response)
    }

    async fn download(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        Ok(state.pdf.clone())
    }
}
