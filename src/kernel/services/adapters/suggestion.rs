//! Suggestion endpoint over HTTP, and the service that runs fetches on the
//! async runtime and reports results as [`AppMessage`]s.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::runtime::AppMessage;
use crate::kernel::services::ports::{
    BoxFuture, FetchError, FetchOutcome, SuggestionEndpoint, SuggestionRequest,
    SuggestionResponse,
};
use crate::kernel::PendingFetch;

#[derive(Clone)]
pub struct HttpSuggestionEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpSuggestionEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SuggestionEndpoint for HttpSuggestionEndpoint {
    fn fetch(&self, request: SuggestionRequest) -> BoxFuture<'static, FetchOutcome> {
        let client = self.client.clone();
        let url = self.url.clone();
        Box::pin(async move {
            let response = client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            response
                .json::<SuggestionResponse>()
                .await
                .map_err(|e| FetchError::Malformed(e.to_string()))
        })
    }
}

pub struct SuggestionService {
    runtime: tokio::runtime::Handle,
    endpoint: Arc<dyn SuggestionEndpoint>,
    tx: Sender<AppMessage>,
}

impl SuggestionService {
    pub fn new(
        runtime: tokio::runtime::Handle,
        endpoint: Arc<dyn SuggestionEndpoint>,
        tx: Sender<AppMessage>,
    ) -> Self {
        Self {
            runtime,
            endpoint,
            tx,
        }
    }

    /// Fires the request without waiting; the result arrives as
    /// `AppMessage::SuggestionFetched` tagged with the fetch generation.
    pub fn fetch(&self, pending: PendingFetch) {
        let tx = self.tx.clone();
        let endpoint = Arc::clone(&self.endpoint);
        let generation = pending.generation;
        self.runtime.spawn(async move {
            let outcome = endpoint.fetch(pending.request).await;
            let _ = tx.send(AppMessage::SuggestionFetched {
                generation,
                outcome,
            });
        });
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/suggestion.rs"]
mod tests;
