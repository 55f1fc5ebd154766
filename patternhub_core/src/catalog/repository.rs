use async_trait::async_trait;

use super::types::{Architecture, Category, Favorite, PatternRecord, SessionId};

/// Source of the pattern collection. All-or-nothing: a failure never yields
/// a partial list.
#[async_trait]
pub trait PatternProvider: Send + Sync {
    async fn all_patterns(&self) -> anyhow::Result<Vec<PatternRecord>>;

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<PatternRecord>>;

    async fn list_by_category(&self, category: Category) -> anyhow::Result<Vec<PatternRecord>>;
}

#[async_trait]
pub trait TaxonomyProvider: Send + Sync {
    async fn all_architectures(&self) -> anyhow::Result<Vec<Architecture>>;

    async fn find_architecture(&self, slug: &str) -> anyhow::Result<Option<Architecture>>;
}

/// Persistence of favorites per session identity.
///
/// `remove_favorite` on a pattern that is not favorited succeeds without
/// effect. `add_favorite` on an existing favorite returns the stored row.
#[async_trait]
pub trait FavoritesProvider: Send + Sync {
    async fn favorites(&self, session: &SessionId) -> anyhow::Result<Vec<Favorite>>;

    async fn add_favorite(&self, pattern_id: i64, session: &SessionId) -> anyhow::Result<Favorite>;

    async fn remove_favorite(&self, pattern_id: i64, session: &SessionId) -> anyhow::Result<()>;
}
