use std::collections::HashSet;
use std::sync::Arc;

use patternhub_config::Config;
use patternhub_core::{
    FavoritesReconciler, FilterState, PatternProvider, PatternRecord, Selection, SessionId,
    SortKey, filter_and_sort,
};

use super::open_store;

#[derive(Debug, Clone, Default)]
pub struct ListInput {
    pub category: Option<String>,
    pub architectures: Vec<String>,
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub difficulty: Option<u8>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub favorites_only: bool,
    pub session: Option<String>,
}

impl ListInput {
    fn filter_state(&self) -> anyhow::Result<FilterState> {
        let sort = self
            .sort
            .as_deref()
            .map_or(Ok(SortKey::default()), str::parse)?;
        Ok(FilterState::new()
            .with_category_str(self.category.as_deref().unwrap_or_default())
            .with_architectures(selection(&self.architectures))
            .with_languages(selection(&self.languages))
            .with_frameworks(selection(&self.frameworks))
            .with_difficulty(self.difficulty)
            .with_search(self.search.clone().unwrap_or_default())
            .with_favorites_only(self.favorites_only)
            .with_sort(sort))
    }

    /// Session whose favorites `--favorites-only` reads. A blank session has none.
    fn favorites_session(&self) -> Option<SessionId> {
        if !self.favorites_only {
            return None;
        }
        self.session
            .as_deref()
            .map(SessionId::new)
            .filter(|s| !s.is_blank())
    }
}

/// Flags may repeat or carry comma-separated values.
fn selection(values: &[String]) -> Selection {
    Selection::from_csv(&values.join(","))
}

fn print_row(pattern: &PatternRecord) {
    println!(
        "{:>3}  {:<24} {:<14} {}  {}",
        pattern.id,
        pattern.slug,
        pattern.category.as_str(),
        "*".repeat(usize::from(pattern.difficulty)),
        pattern.description
    );
}

/// Prints the catalog filtered and ordered like the browse view.
#[derive(Debug, Clone, Copy)]
pub struct ListStrategy;

impl super::CommandStrategy for ListStrategy {
    type Input = ListInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let filter = input.filter_state()?;
        let config = Config::load()?;
        let store = Arc::new(open_store(&config).await?);

        let favorite_ids = match input.favorites_session() {
            Some(session) => {
                let favorites = FavoritesReconciler::new(Arc::clone(&store), session);
                favorites.load().await?;
                favorites.favorite_ids()
            }
            None => HashSet::new(),
        };

        let patterns = store.all_patterns().await?;
        let view = filter_and_sort(&patterns, &filter, &favorite_ids);
        if view.is_empty() {
            println!("No patterns match.");
            return Ok(());
        }
        for pattern in &view {
            print_row(pattern);
        }
        println!("\n{} of {} patterns", view.len(), patterns.len());
        Ok(())
    }
}
