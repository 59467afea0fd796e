//! In-memory sandbox runtime. Directories must exist before files are written
//! into them, matching the semantics of a real runtime filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::kernel::services::ports::{
    BoxFuture, Sandbox, SandboxError, SandboxFsError, SandboxHandle, SandboxRuntime,
};
use crate::models::{normalize_path, split_parent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOp {
    Mkdir(String),
    Write(String),
}

#[derive(Default)]
struct MemoryFs {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, String>,
    ops: Vec<FsOp>,
    torn_down: bool,
}

impl MemoryFs {
    fn dir_exists(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }

    fn mkdir(&mut self, path: &str, recursive: bool) -> Result<(), SandboxFsError> {
        if path.is_empty() {
            return Ok(());
        }
        if self.files.contains_key(path) {
            return Err(SandboxFsError::NotADirectory(path.to_string()));
        }
        if self.dirs.contains(path) {
            return if recursive {
                Ok(())
            } else {
                Err(SandboxFsError::Io(format!("directory exists: {path}")))
            };
        }

        match split_parent(path) {
            (Some(parent), _) if !self.dir_exists(parent) => {
                if !recursive {
                    return Err(SandboxFsError::NotFound(parent.to_string()));
                }
                self.mkdir(parent, true)?;
            }
            _ => {}
        }

        self.dirs.insert(path.to_string());
        self.ops.push(FsOp::Mkdir(path.to_string()));
        Ok(())
    }

    fn write_file(&mut self, path: &str, content: &str) -> Result<(), SandboxFsError> {
        let (parent, leaf) = split_parent(path);
        if leaf.is_empty() {
            return Err(SandboxFsError::InvalidPath(path.to_string()));
        }
        if let Some(parent) = parent {
            if !self.dir_exists(parent) {
                return Err(SandboxFsError::NotFound(parent.to_string()));
            }
        }
        if self.dirs.contains(path) {
            return Err(SandboxFsError::Io(format!("is a directory: {path}")));
        }
        self.files.insert(path.to_string(), content.to_string());
        self.ops.push(FsOp::Write(path.to_string()));
        Ok(())
    }
}

pub struct MemorySandbox {
    fs: Mutex<MemoryFs>,
    failing_prefixes: Vec<String>,
    teardown_delay: Option<Duration>,
}

impl MemorySandbox {
    pub fn new() -> Self {
        Self::with_failing_prefixes(Vec::new())
    }

    /// Writes under any of `prefixes` fail; used to exercise per-file errors.
    pub fn with_failing_prefixes(prefixes: Vec<String>) -> Self {
        Self {
            fs: Mutex::new(MemoryFs::default()),
            failing_prefixes: prefixes,
            teardown_delay: None,
        }
    }

    fn fs(&self) -> MutexGuard<'_, MemoryFs> {
        self.fs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read_file(&self, path: &str) -> Option<String> {
        self.fs().files.get(&normalize_path(path)).cloned()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.fs().dirs.contains(&normalize_path(path))
    }

    pub fn file_paths(&self) -> Vec<String> {
        self.fs().files.keys().cloned().collect()
    }

    pub fn ops(&self) -> Vec<FsOp> {
        self.fs().ops.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.fs().torn_down
    }

    fn check_alive(fs: &MemoryFs) -> Result<(), SandboxFsError> {
        if fs.torn_down {
            Err(SandboxFsError::TornDown)
        } else {
            Ok(())
        }
    }
}

impl Default for MemorySandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxHandle for MemorySandbox {
    fn mkdir<'a>(
        &'a self,
        path: &'a str,
        recursive: bool,
    ) -> BoxFuture<'a, Result<(), SandboxFsError>> {
        Box::pin(async move {
            let mut fs = self.fs();
            Self::check_alive(&fs)?;
            fs.mkdir(&normalize_path(path), recursive)
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> BoxFuture<'a, Result<(), SandboxFsError>> {
        Box::pin(async move {
            let path = normalize_path(path);
            if self.failing_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
                return Err(SandboxFsError::Io(format!("write rejected: {path}")));
            }
            let mut fs = self.fs();
            Self::check_alive(&fs)?;
            fs.write_file(&path, content)
        })
    }

    fn teardown(&self) -> BoxFuture<'_, Result<(), SandboxFsError>> {
        Box::pin(async move {
            if let Some(delay) = self.teardown_delay {
                tokio::time::sleep(delay).await;
            }
            let mut fs = self.fs();
            Self::check_alive(&fs)?;
            fs.torn_down = true;
            Ok(())
        })
    }
}

#[derive(Default)]
struct RuntimeState {
    boots: AtomicUsize,
    fail_boots: AtomicUsize,
    booted: Mutex<Vec<Arc<MemorySandbox>>>,
}

/// Boots [`MemorySandbox`] instances and records every boot.
#[derive(Clone, Default)]
pub struct MemorySandboxRuntime {
    state: Arc<RuntimeState>,
    boot_delay: Option<Duration>,
    teardown_delay: Option<Duration>,
    failing_prefixes: Vec<String>,
}

impl MemorySandboxRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boot_delay(mut self, delay: Duration) -> Self {
        self.boot_delay = Some(delay);
        self
    }

    /// Booted sandboxes sleep for `delay` inside `teardown`.
    pub fn with_teardown_delay(mut self, delay: Duration) -> Self {
        self.teardown_delay = Some(delay);
        self
    }

    pub fn with_failing_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.failing_prefixes = prefixes;
        self
    }

    /// The next `count` boots fail.
    pub fn fail_next_boots(&self, count: usize) {
        self.state.fail_boots.store(count, Ordering::SeqCst);
    }

    pub fn boot_count(&self) -> usize {
        self.state.boots.load(Ordering::SeqCst)
    }

    pub fn booted(&self) -> Vec<Arc<MemorySandbox>> {
        self.state
            .booted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_booted(&self) -> Option<Arc<MemorySandbox>> {
        self.booted().pop()
    }
}

impl SandboxRuntime for MemorySandboxRuntime {
    fn boot(&self) -> BoxFuture<'static, Result<Sandbox, SandboxError>> {
        let state = Arc::clone(&self.state);
        let delay = self.boot_delay;
        let prefixes = self.failing_prefixes.clone();
        let teardown_delay = self.teardown_delay;
        state.boots.fetch_add(1, Ordering::SeqCst);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let should_fail = state
                .fail_boots
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if should_fail {
                return Err(SandboxError::boot("simulated boot failure"));
            }

            let mut sandbox = MemorySandbox::with_failing_prefixes(prefixes);
            sandbox.teardown_delay = teardown_delay;
            let sandbox = Arc::new(sandbox);
            state
                .booted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Arc::clone(&sandbox));
            let sandbox: Sandbox = sandbox;
            Ok(sandbox)
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/sandbox/memory.rs"]
mod tests;
