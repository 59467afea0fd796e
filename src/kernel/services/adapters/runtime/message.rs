use crate::kernel::services::adapters::sandbox::{SyncError, TreeSyncReport};
use crate::kernel::services::ports::FetchOutcome;

#[derive(Debug)]
pub enum AppMessage {
    TreeSynced {
        report: TreeSyncReport,
    },
    FileSynced {
        path: String,
    },
    SyncFailed {
        path: Option<String>,
        error: SyncError,
    },
    SuggestionFetched {
        generation: u64,
        outcome: FetchOutcome,
    },
}
