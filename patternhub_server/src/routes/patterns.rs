use std::collections::HashSet;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::get,
};
use patternhub_core::{
    Category, FavoritesProvider, FilterState, PatternProvider, PatternRecord, Selection,
    SessionId, SortKey, filter_and_sort, resolve_related,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, from_collaborator};
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// Query string of `GET /api/patterns`. Multi-valued dimensions are comma
/// separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternQuery {
    pub category: Option<String>,
    pub architecture: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub favorites_only: Option<bool>,
    pub user_id: Option<String>,
}

impl PatternQuery {
    fn selection(raw: Option<&String>) -> Selection {
        raw.map_or_else(Selection::new, |v| Selection::from_csv(v))
    }

    fn difficulty(&self) -> Result<Option<u8>, ApiError> {
        match self.difficulty.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<u8>()
                .map(Some)
                .map_err(|_| ApiError::bad_request(format!("invalid difficulty '{raw}'"))),
        }
    }

    fn sort(&self) -> Result<SortKey, ApiError> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(SortKey::default()),
            Some(raw) => raw
                .parse::<SortKey>()
                .map_err(|e| ApiError::bad_request(e.to_string())),
        }
    }

    pub fn filter_state(&self) -> Result<FilterState, ApiError> {
        Ok(FilterState::new()
            .with_category_str(self.category.as_deref().unwrap_or_default())
            .with_architectures(Self::selection(self.architecture.as_ref()))
            .with_languages(Self::selection(self.language.as_ref()))
            .with_frameworks(Self::selection(self.framework.as_ref()))
            .with_difficulty(self.difficulty()?)
            .with_search(self.search.clone().unwrap_or_default())
            .with_favorites_only(self.favorites_only.unwrap_or(false))
            .with_sort(self.sort()?))
    }
}

/// A pattern with its related patterns resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PatternDetail {
    #[serde(flatten)]
    pub pattern: PatternRecord,
    pub related: Vec<PatternRecord>,
}

/// GET /api/patterns
/// Filter and order the catalog
pub async fn list_patterns(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PatternQuery>,
) -> Result<Json<Vec<PatternRecord>>, ApiError> {
    let filter = query.filter_state()?;
    let store = state.store();
    let patterns = store.all_patterns().await.map_err(from_collaborator)?;

    // Without a session there is nothing to mark as favorite.
    let session = query
        .user_id
        .as_deref()
        .map(SessionId::new)
        .filter(|s| !s.is_blank());
    let favorite_ids: HashSet<i64> = match session {
        Some(session) if filter.favorites_only => store
            .favorites(&session)
            .await
            .map_err(from_collaborator)?
            .into_iter()
            .map(|f| f.pattern_id)
            .collect(),
        _ => HashSet::new(),
    };

    let view: Vec<PatternRecord> = filter_and_sort(&patterns, &filter, &favorite_ids)
        .into_iter()
        .cloned()
        .collect();
    debug!("Listing {} of {} patterns", view.len(), patterns.len());
    Ok(Json(view))
}

/// GET /api/patterns/{slug}
/// One pattern plus its resolved related patterns
pub async fn get_pattern(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<PatternDetail>, ApiError> {
    let patterns = state.store().all_patterns().await.map_err(from_collaborator)?;
    let pattern = patterns
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| ApiError::not_found(format!("pattern '{slug}'")))?;
    let related = resolve_related(pattern, &patterns)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(PatternDetail {
        pattern: pattern.clone(),
        related,
    }))
}

/// GET /api/patterns/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> Result<Json<Vec<PatternRecord>>, ApiError> {
    let category = category
        .parse::<Category>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let patterns = state
        .store()
        .list_by_category(category)
        .await
        .map_err(from_collaborator)?;
    Ok(Json(patterns))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/patterns", get(list_patterns))
        .route("/patterns/category/{category}", get(list_by_category))
        .route("/patterns/{slug}", get(get_pattern))
}
