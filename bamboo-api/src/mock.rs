//! In-memory transport for tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::transport::{Request, Response, Transport};
use crate::Result;

#[derive(Default)]
struct MockState {
    responses: VecDeque<Response>,
    requests: Vec<Request>,
}

/// Replays queued responses in order and records every executed request
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: StatusCode, body: serde_json::Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, status: StatusCode, body: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Response::new(status, body));
    }

    pub(crate) fn respond_with_reason(&self, status: StatusCode, reason: &str, body: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Response::new(status, body).with_reason(reason));
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn new_request(&self, method: Method, path: &str) -> Result<Request> {
        let base = Url::parse("http://bamboo.test/rest/api/latest/")?;
        Ok(Request::new(method, base.join(path)?))
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        let path = request.url.to_string();
        state.requests.push(request);
        let response = state.responses.pop_front();
        Ok(response.unwrap_or_else(|| panic!("no response queued for {}", path)))
    }
}
