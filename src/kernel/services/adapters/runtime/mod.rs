//! Async runtime adapter: executes effects and sends messages back to the host.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::{AsyncRuntime, SyncWorker};
