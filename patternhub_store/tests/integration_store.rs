//! Integration tests for the relational catalog store.
//!
//! Each test opens its own in-memory SQLite database, so they run in
//! isolation and need no external services.

use std::collections::HashSet;
use std::sync::Arc;

use patternhub_core::{
    CatalogError, Category, FavoritesProvider, FavoritesReconciler, FilterState, PatternProvider,
    SessionId, SortKey, TaxonomyProvider, filter_and_sort, resolve_related,
};
use patternhub_store::{CatalogStore, SeedFile, seed};

const CATALOG: &str = include_str!("../../data/catalog.json");

async fn seeded_store() -> CatalogStore {
    let store = CatalogStore::connect("sqlite::memory:").await.unwrap();
    let seed_file = SeedFile::from_json(CATALOG).unwrap();
    seed::import(&store, &seed_file).await.unwrap();
    store
}

#[tokio::test]
async fn seed_import_is_idempotent() {
    let store = CatalogStore::connect("sqlite::memory:").await.unwrap();
    let seed_file = SeedFile::from_json(CATALOG).unwrap();

    let first = seed::import(&store, &seed_file).await.unwrap();
    assert_eq!(first.patterns_inserted, 11);
    assert_eq!(first.architectures_inserted, 3);
    assert_eq!(first.patterns_updated, 0);

    let second = seed::import(&store, &seed_file).await.unwrap();
    assert_eq!(second.patterns_inserted, 0);
    assert_eq!(second.patterns_updated, 11);

    assert_eq!(store.all_patterns().await.unwrap().len(), 11);
}

#[tokio::test]
async fn patterns_come_back_in_insertion_order() {
    let store = seeded_store().await;
    let patterns = store.all_patterns().await.unwrap();

    let slugs: Vec<&str> = patterns.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(&slugs[..3], ["singleton", "factory-method", "builder"]);
    assert!(patterns.windows(2).all(|w| w[0].id < w[1].id));

    let singleton = &patterns[0];
    assert_eq!(singleton.tags, ["instance", "global"]);
    assert_eq!(singleton.code_examples.len(), 1);
    assert_eq!(singleton.code_examples[0].language, "rust");
}

#[tokio::test]
async fn find_by_slug_and_category() {
    let store = seeded_store().await;

    let observer = store.find_by_slug("observer").await.unwrap().unwrap();
    assert_eq!(observer.category, Category::Behavioral);
    assert!(store.find_by_slug("ghost").await.unwrap().is_none());

    let structural = store.list_by_category(Category::Structural).await.unwrap();
    let names: Vec<&str> = structural.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Adapter", "Decorator", "Facade"]);
}

#[tokio::test]
async fn architectures_are_listed_and_found() {
    let store = seeded_store().await;
    let all = store.all_architectures().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].slug, "microservices");

    let mvc = store.find_architecture("mvc").await.unwrap().unwrap();
    assert_eq!(mvc.characteristics.len(), 3);
    assert!(store.find_architecture("serverless").await.unwrap().is_none());
}

#[tokio::test]
async fn engine_runs_over_loaded_collection() {
    let store = seeded_store().await;
    let patterns = store.all_patterns().await.unwrap();

    let state = FilterState::new()
        .with_category(Category::Creational)
        .with_search("INSTANCE")
        .with_sort(SortKey::Alphabetical);
    let view = filter_and_sort(&patterns, &state, &HashSet::new());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].slug, "singleton");

    // "abstract-factory" is not in the catalog and is silently skipped.
    let related = resolve_related(view[0], &patterns);
    let related: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(related, ["factory-method"]);
}

#[tokio::test]
async fn favorites_add_is_idempotent_and_remove_missing_is_ok() {
    let store = seeded_store().await;
    let session = SessionId::new("anon-42");
    let observer = store.find_by_slug("observer").await.unwrap().unwrap();

    let first = store.add_favorite(observer.id, &session).await.unwrap();
    let again = store.add_favorite(observer.id, &session).await.unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(store.favorites(&session).await.unwrap().len(), 1);

    // Other sessions do not see it.
    let other = SessionId::new("anon-7");
    assert!(store.favorites(&other).await.unwrap().is_empty());

    store.remove_favorite(observer.id, &session).await.unwrap();
    store.remove_favorite(observer.id, &session).await.unwrap();
    assert!(store.favorites(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn favorites_validate_inputs() {
    let store = seeded_store().await;

    let err = store
        .add_favorite(9_999, &SessionId::new("anon-1"))
        .await
        .unwrap_err();
    assert!(CatalogError::from_anyhow(err).is_not_found());

    let err = store.favorites(&SessionId::new("")).await.unwrap_err();
    assert!(matches!(
        CatalogError::from_anyhow(err),
        CatalogError::Validation(_)
    ));
}

#[tokio::test]
async fn reconciler_double_toggle_against_store() {
    let store = Arc::new(seeded_store().await);
    let session = SessionId::new("anon-99");
    let favorites = FavoritesReconciler::new(Arc::clone(&store), session.clone());
    favorites.load().await.unwrap();

    let (a, b) = tokio::join!(favorites.toggle(2), favorites.toggle(2));
    assert!(a.unwrap());
    assert!(!b.unwrap());
    assert!(store.favorites(&session).await.unwrap().is_empty());

    favorites.toggle(7).await.unwrap();
    let patterns = store.all_patterns().await.unwrap();
    let state = FilterState::new().with_favorites_only(true);
    let view = filter_and_sort(&patterns, &state, &favorites.favorite_ids());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, 7);
}

#[tokio::test]
async fn file_based_database_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("catalog.db").display());

    {
        let store = CatalogStore::connect(&url).await.unwrap();
        let seed_file = SeedFile::from_json(CATALOG).unwrap();
        seed::import(&store, &seed_file).await.unwrap();
    }

    let reopened = CatalogStore::connect(&url).await.unwrap();
    assert_eq!(reopened.all_patterns().await.unwrap().len(), 11);
}
