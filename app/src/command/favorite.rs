use std::sync::Arc;

use patternhub_config::Config;
use patternhub_core::{FavoritesReconciler, SessionId};
use tracing::info;

use super::open_store;

#[derive(Debug, Clone)]
pub struct FavoriteInput {
    pub pattern_id: i64,
    /// A fresh anonymous session is generated when absent
    pub session: Option<String>,
}

/// Toggles a pattern in a session's favorites.
#[derive(Debug, Clone, Copy)]
pub struct FavoriteStrategy;

impl super::CommandStrategy for FavoriteStrategy {
    type Input = FavoriteInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = Arc::new(open_store(&config).await?);

        let session = input.session.map_or_else(SessionId::generate, SessionId::new);
        info!("Using session {}", session);

        let favorites = FavoritesReconciler::new(store, session.clone());
        favorites.load().await?;
        let now_favorite = favorites.toggle(input.pattern_id).await?;

        if now_favorite {
            println!("Pattern {} added to favorites of {session}", input.pattern_id);
        } else {
            println!("Pattern {} removed from favorites of {session}", input.pattern_id);
        }
        println!("Favorites: {}", favorites.favorite_ids().len());
        Ok(())
    }
}
