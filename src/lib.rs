//! playground - sandbox session kernel
//!
//! Modules:
//! - models: project tree, node ids, persisted template documents
//! - kernel: explorer/open-file store, suggestion controller
//! - kernel::services: ports (contracts) and adapters (sandbox lifecycle,
//!   sync bridge, editor buffer, suggestion endpoint, persistence)

pub mod kernel;
pub mod models;
