//! Mock sample sources.

use crate::api::{SampleSource, SamplesPage};
use crate::error::ApiError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed script of responses, one per request, and records the
/// targets it was asked for.
///
/// Running past the end of the script panics.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<SamplesPage, ApiError>>>,
    targets: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful page.
    pub fn respond(self, page: SamplesPage) -> Self {
        self.responses.lock().unwrap().push_back(Ok(page));
        self
    }

    /// Queues a failure.
    pub fn fail(self, error: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Targets requested so far, in request order.
    pub fn requested_targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl SampleSource for ScriptedSource {
    async fn fetch_page(&self, target: &str) -> Result<SamplesPage, ApiError> {
        self.targets.lock().unwrap().push(target.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {}", target))
    }
}
