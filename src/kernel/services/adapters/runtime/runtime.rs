use super::message::AppMessage;
use crate::kernel::services::adapters::sandbox::{SyncBridge, SyncError};
use crate::kernel::Effect;
use std::io;
use std::sync::mpsc::Sender;
use tokio::sync::mpsc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
}

impl AsyncRuntime {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Executes store effects one at a time, in submission order, so successive
/// writes of the same path land in the sandbox in the order they were made.
#[derive(Clone)]
pub struct SyncWorker {
    queue: mpsc::UnboundedSender<Effect>,
}

impl SyncWorker {
    pub fn spawn(
        runtime: &tokio::runtime::Handle,
        bridge: SyncBridge,
        tx: Sender<AppMessage>,
    ) -> Self {
        let (queue, mut rx) = mpsc::unbounded_channel::<Effect>();
        runtime.spawn(async move {
            while let Some(effect) = rx.recv().await {
                let msg = run_effect(&bridge, effect).await;
                if tx.send(msg).is_err() {
                    break;
                }
            }
        });
        Self { queue }
    }

    pub fn submit(&self, effect: Effect) -> bool {
        self.queue.send(effect).is_ok()
    }

    pub fn submit_all(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            if !self.submit(effect) {
                tracing::warn!("sync worker stopped, dropping effect");
                return;
            }
        }
    }
}

async fn run_effect(bridge: &SyncBridge, effect: Effect) -> AppMessage {
    match effect {
        Effect::SyncTree(tree) => match bridge.write_tree(&tree).await {
            Ok(report) => AppMessage::TreeSynced { report },
            Err(e) => AppMessage::SyncFailed {
                path: None,
                error: SyncError::Unavailable(e),
            },
        },
        Effect::SyncFile { path, content } => match bridge.write_file(&path, &content).await {
            Ok(()) => AppMessage::FileSynced { path },
            Err(error) => AppMessage::SyncFailed {
                path: Some(path),
                error,
            },
        },
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
