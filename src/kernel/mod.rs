//! Headless session core (state/action/effect) plus the suggestion controller.

pub mod action;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;
pub mod suggestion;

pub use action::Action;
pub use effect::Effect;
pub use state::{ExplorerState, OpenFile};
pub use store::{DispatchResult, Store};
pub use suggestion::{
    PendingFetch, Suggestion, SuggestionController, SuggestionOutcome, SuggestionPhase,
};
