//! Sandbox runtime contracts: booting an isolated runtime and writing into its
//! filesystem.

use std::sync::Arc;

use thiserror::Error;

use super::runtime::BoxFuture;

pub type Sandbox = Arc<dyn SandboxHandle>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    #[error("failed to boot sandbox: {message}")]
    Boot { message: String },
    #[error("sandbox boot was interrupted")]
    BootInterrupted,
    #[error("sandbox was destroyed before it became ready")]
    Destroyed,
}

impl SandboxError {
    pub fn boot(message: impl Into<String>) -> Self {
        SandboxError::Boot {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxFsError {
    #[error("no such directory: {0}")]
    NotFound(String),
    #[error("path is not a directory: {0}")]
    NotADirectory(String),
    #[error("invalid sandbox path: {0}")]
    InvalidPath(String),
    #[error("sandbox has been torn down")]
    TornDown,
    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for SandboxFsError {
    fn from(e: std::io::Error) -> Self {
        SandboxFsError::Io(e.to_string())
    }
}

/// A booted runtime. Paths are normalized, slash-delimited and relative to the
/// sandbox root.
pub trait SandboxHandle: Send + Sync {
    fn mkdir<'a>(&'a self, path: &'a str, recursive: bool)
        -> BoxFuture<'a, Result<(), SandboxFsError>>;

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> BoxFuture<'a, Result<(), SandboxFsError>>;

    fn teardown(&self) -> BoxFuture<'_, Result<(), SandboxFsError>>;
}

pub trait SandboxRuntime: Send + Sync {
    fn boot(&self) -> BoxFuture<'static, Result<Sandbox, SandboxError>>;
}

/// Observable state of the shared sandbox slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SandboxStatus {
    #[default]
    Empty,
    Booting,
    Ready,
    Failed {
        message: String,
    },
}

impl SandboxStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SandboxStatus::Booting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SandboxStatus::Failed { message } => Some(message),
            _ => None,
        }
    }
}
