use std::sync::Arc;

use patternhub_core::{LLMProvider, PatternAdvisor};
use patternhub_store::CatalogStore;

use crate::error::ApiError;

pub type Advisor = PatternAdvisor<dyn LLMProvider>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<CatalogStore>,
    advisor: Option<Arc<Advisor>>,
}

impl AppState {
    #[must_use]
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            advisor: None,
        }
    }

    #[must_use]
    pub fn with_advisor(mut self, advisor: Advisor) -> Self {
        self.advisor = Some(Arc::new(advisor));
        self
    }

    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The model-backed advisor, if an API key was configured.
    pub fn advisor(&self) -> Result<&Advisor, ApiError> {
        self.advisor.as_deref().ok_or_else(|| {
            ApiError::Unavailable(
                "no LLM provider configured; set providers.llm.api_key".to_string(),
            )
        })
    }
}
