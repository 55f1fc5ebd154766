#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod advisor;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod util;

pub use advisor::{
    CodeSnippet, PatternAdvisor, Preferences, Recommendation, RecommendationRequest,
};
pub use catalog::{
    Architecture, CatalogIndex, Category, CategoryFilter, CodeExample, Favorite,
    FavoritesProvider, FilterState, PatternProvider, PatternRecord, Selection, SessionId,
    SortKey, TaxonomyProvider, filter_and_sort, resolve_related,
};
pub use error::CatalogError;
pub use favorites::{FavoritesError, FavoritesReconciler};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Hosted language model. Calls have arbitrary latency and may fail.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse>;
    fn default_model(&self) -> &str;
}
