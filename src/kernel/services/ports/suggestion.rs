//! Wire contract of the code-suggestion endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::runtime::BoxFuture;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub file_content: String,
    pub cursor_line: u32,
    pub cursor_column: u32,
    pub suggestion_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("suggestion endpoint responded with status {0}")]
    Status(u16),
    #[error("malformed suggestion response: {0}")]
    Malformed(String),
    #[error("suggestion request failed: {0}")]
    Transport(String),
}

pub type FetchOutcome = Result<SuggestionResponse, FetchError>;

pub trait SuggestionEndpoint: Send + Sync {
    fn fetch(&self, request: SuggestionRequest) -> BoxFuture<'static, FetchOutcome>;
}
