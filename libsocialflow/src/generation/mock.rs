//! Mock generation backend for testing
//!
//! A scriptable stand-in for the hosted API: queue responses or failures,
//! record every request, add latency. Available in all builds (not just
//! tests) so integration tests can drive the gateway without network access.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::error::GenerationError;
use crate::generation::{GenerationBackend, GenerationRequest};

const DEFAULT_RESPONSE: &str = "Generated post content. #mock";
const MOCK_MODEL: &str = "mock-model";

/// Mock backend with scriptable behavior
///
/// Queued responses are handed out in order; once the queue is empty every
/// call gets the fallback. Requests are recorded for verification.
pub struct MockBackend {
    queue: Mutex<VecDeque<Result<String, GenerationError>>>,
    fallback: Result<String, GenerationError>,
    delay: Duration,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockBackend {
    /// Create a mock that always returns a canned response
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Ok(DEFAULT_RESPONSE.to_string()),
            delay: Duration::from_millis(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the given text
    pub fn with_response(text: &str) -> Self {
        Self {
            fallback: Ok(text.to_string()),
            ..Self::new()
        }
    }

    /// Create a mock that always fails with the given error
    pub fn failing(error: GenerationError) -> Self {
        Self {
            fallback: Err(error),
            ..Self::new()
        }
    }

    /// Create a mock that sleeps before answering (simulates latency)
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    /// Queue a response to hand out before the fallback applies
    pub fn push_response(&self, response: Result<String, GenerationError>) {
        self.queue.lock().unwrap().push_back(response);
    }

    /// All requests seen so far, in call order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made against this backend
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let scripted = self.queue.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }

    fn model(&self) -> &str {
        MOCK_MODEL
    }
}
