//! Shared handler state.

use mindbridge_core::{ChatDispatcher, ProviderRegistry};

/// State shared by every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dispatcher: ChatDispatcher,
}

impl AppState {
    pub const fn new(dispatcher: ChatDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.dispatcher.registry()
    }
}
