//! Directory-backed sandbox: the project is materialized under a local root
//! directory that is removed again on teardown.

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::kernel::services::ports::{
    BoxFuture, Sandbox, SandboxError, SandboxFsError, SandboxHandle, SandboxRuntime,
};

static SESSION_ID: AtomicU64 = AtomicU64::new(0);

fn next_session_id() -> u64 {
    SESSION_ID.fetch_add(1, Ordering::Relaxed)
}

pub struct LocalDirSandbox {
    root: PathBuf,
}

impl LocalDirSandbox {
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, SandboxFsError> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(SandboxFsError::InvalidPath(path.to_string())),
            }
        }
        Ok(resolved)
    }
}

impl SandboxHandle for LocalDirSandbox {
    fn mkdir<'a>(
        &'a self,
        path: &'a str,
        recursive: bool,
    ) -> BoxFuture<'a, Result<(), SandboxFsError>> {
        Box::pin(async move {
            let target = self.resolve(path)?;
            let result = if recursive {
                tokio::fs::create_dir_all(&target).await
            } else {
                tokio::fs::create_dir(&target).await
            };
            result.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SandboxFsError::NotFound(path.to_string()),
                _ => SandboxFsError::from(e),
            })
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> BoxFuture<'a, Result<(), SandboxFsError>> {
        Box::pin(async move {
            let target = self.resolve(path)?;
            if target == self.root {
                return Err(SandboxFsError::InvalidPath(path.to_string()));
            }
            tokio::fs::write(&target, content.as_bytes())
                .await
                .map_err(SandboxFsError::from)
        })
    }

    fn teardown(&self) -> BoxFuture<'_, Result<(), SandboxFsError>> {
        Box::pin(async move {
            match tokio::fs::remove_dir_all(&self.root).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SandboxFsError::from(e)),
            }
        })
    }
}

/// Boots a fresh `session-<n>` directory under `base` per boot.
pub struct LocalDirRuntime {
    base: PathBuf,
}

impl LocalDirRuntime {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl SandboxRuntime for LocalDirRuntime {
    fn boot(&self) -> BoxFuture<'static, Result<Sandbox, SandboxError>> {
        let root = self
            .base
            .join(format!("session-{}-{}", std::process::id(), next_session_id()));
        Box::pin(async move {
            tokio::fs::create_dir_all(&root).await.map_err(|e| {
                SandboxError::boot(format!("cannot create {}: {e}", root.display()))
            })?;
            tracing::info!(root = %root.display(), "local sandbox root created");
            let sandbox: Sandbox = Arc::new(LocalDirSandbox { root });
            Ok(sandbox)
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/sandbox/local.rs"]
mod tests;
