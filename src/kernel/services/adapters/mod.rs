//! Service adapters: runtime specific implementations (IO/async).

pub mod editor;
pub mod format;
pub mod lint;
pub mod paths;
pub mod repository;
pub mod runtime;
pub mod sandbox;
pub mod session;
pub mod settings;
pub mod suggestion;

pub use editor::BufferEditor;
pub use format::WhitespaceFormatter;
pub use lint::StyleLinter;
pub use paths::{default_sandbox_base, ensure_log_dir, get_log_dir, get_projects_dir};
pub use repository::JsonProjectRepository;
pub use runtime::{AppMessage, AsyncRuntime, SyncWorker};
pub use sandbox::{
    FsOp, LocalDirRuntime, LocalDirSandbox, MemorySandbox, MemorySandboxRuntime,
    SandboxLifecycle, SyncBridge, SyncError, TreeSyncReport,
};
pub use session::EnvSessionProvider;
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
pub use suggestion::{HttpSuggestionEndpoint, SuggestionService};
