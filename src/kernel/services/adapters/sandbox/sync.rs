//! Projects tree content into the sandbox filesystem.

use thiserror::Error;

use super::lifecycle::SandboxLifecycle;
use crate::kernel::services::ports::{SandboxError, SandboxFsError, SandboxHandle};
use crate::models::{normalize_path, split_parent, TreeNode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("sandbox unavailable: {0}")]
    Unavailable(#[from] SandboxError),
    #[error("failed to write file at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: SandboxFsError,
    },
}

impl SyncError {
    pub fn path(&self) -> Option<&str> {
        match self {
            SyncError::Write { path, .. } => Some(path),
            SyncError::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSyncReport {
    pub written: Vec<String>,
    pub failed: Vec<SyncError>,
}

impl TreeSyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone)]
pub struct SyncBridge {
    lifecycle: SandboxLifecycle,
}

impl SyncBridge {
    pub fn new(lifecycle: SandboxLifecycle) -> Self {
        Self { lifecycle }
    }

    pub fn lifecycle(&self) -> &SandboxLifecycle {
        &self.lifecycle
    }

    pub async fn write_file(&self, path: &str, content: &str) -> Result<(), SyncError> {
        let sandbox = self.lifecycle.acquire().await?;
        write_into(sandbox.as_ref(), path, content).await
    }

    /// Writes every file of `tree`. Individual failures are collected in the
    /// report; only failing to obtain a sandbox aborts the whole write.
    pub async fn write_tree(&self, tree: &TreeNode) -> Result<TreeSyncReport, SandboxError> {
        let sandbox = self.lifecycle.acquire().await?;
        let mut report = TreeSyncReport::default();
        for file in tree.files() {
            match write_into(sandbox.as_ref(), &file.path, &file.content).await {
                Ok(()) => report.written.push(file.path.clone()),
                Err(e) => report.failed.push(e),
            }
        }
        tracing::info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "project tree synced"
        );
        Ok(report)
    }
}

async fn write_into(
    sandbox: &dyn SandboxHandle,
    path: &str,
    content: &str,
) -> Result<(), SyncError> {
    let normalized = normalize_path(path);
    let wrap = |source: SandboxFsError| {
        tracing::error!(path = %path, error = %source, "failed to write file into sandbox");
        SyncError::Write {
            path: path.to_string(),
            source,
        }
    };

    let (dir, leaf) = split_parent(&normalized);
    if leaf.is_empty() {
        return Err(wrap(SandboxFsError::InvalidPath(path.to_string())));
    }
    if let Some(dir) = dir {
        sandbox.mkdir(dir, true).await.map_err(wrap)?;
    }
    sandbox.write_file(&normalized, content).await.map_err(wrap)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/sandbox/sync.rs"]
mod tests;
