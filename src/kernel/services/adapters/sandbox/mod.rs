//! Sandbox adapters: lifecycle manager, sync bridge and runtime backends.

mod lifecycle;
mod local;
mod memory;
mod sync;

pub use lifecycle::SandboxLifecycle;
pub use local::{LocalDirRuntime, LocalDirSandbox};
pub use memory::{FsOp, MemorySandbox, MemorySandboxRuntime};
pub use sync::{SyncBridge, SyncError, TreeSyncReport};
