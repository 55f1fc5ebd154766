use axum::{
    Router,
    extract::State,
    response::Json,
    routing::get,
};
use patternhub_core::{Architecture, TaxonomyProvider};

use crate::error::{ApiError, from_collaborator};
use crate::extract::ApiPath;
use crate::state::AppState;

/// GET /api/architectures
pub async fn list_architectures(
    State(state): State<AppState>,
) -> Result<Json<Vec<Architecture>>, ApiError> {
    let architectures = state
        .store()
        .all_architectures()
        .await
        .map_err(from_collaborator)?;
    Ok(Json(architectures))
}

/// GET /api/architectures/{slug}
pub async fn get_architecture(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Architecture>, ApiError> {
    state
        .store()
        .find_architecture(&slug)
        .await
        .map_err(from_collaborator)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("architecture '{slug}'")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/architectures", get(list_architectures))
        .route("/architectures/{slug}", get(get_architecture))
}
