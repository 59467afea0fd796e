//! Service ports: traits + data contracts.

pub mod editor;
pub mod persistence;
pub mod runtime;
pub mod sandbox;
pub mod settings;
pub mod suggestion;

pub use editor::{
    ContentChange, Decoration, DecorationId, Diagnostic, DiagnosticSeverity, DiagnosticsProvider,
    EditorCapability, FormattingProvider, Position, TextRange,
};
pub use persistence::{
    ProjectRecord, ProjectRepository, RepositoryError, RepositoryResult, SessionProvider, User,
};
pub use runtime::BoxFuture;
pub use sandbox::{
    Sandbox, SandboxError, SandboxFsError, SandboxHandle, SandboxRuntime, SandboxStatus,
};
pub use settings::{SandboxSettings, Settings, SuggestionSettings};
pub use suggestion::{
    FetchError, FetchOutcome, SuggestionEndpoint, SuggestionRequest, SuggestionResponse,
};
