use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{delete, get},
};
use patternhub_core::{Favorite, FavoritesProvider, SessionId};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, from_collaborator};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionQuery {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavorite {
    pub pattern_id: i64,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoveFavorite {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Removed {
    pub pattern_id: i64,
    pub removed: bool,
}

/// GET /api/favorites?userId=
pub async fn list_favorites(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SessionQuery>,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let favorites = state
        .store()
        .favorites(&SessionId::new(query.user_id))
        .await
        .map_err(from_collaborator)?;
    Ok(Json(favorites))
}

/// POST /api/favorites
/// Idempotent: an existing favorite is returned unchanged
pub async fn add_favorite(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AddFavorite>,
) -> Result<Json<Favorite>, ApiError> {
    let favorite = state
        .store()
        .add_favorite(payload.pattern_id, &SessionId::new(payload.user_id))
        .await
        .map_err(from_collaborator)?;
    Ok(Json(favorite))
}

/// DELETE /api/favorites/{pattern_id}
/// Removing a favorite that does not exist succeeds
pub async fn remove_favorite(
    State(state): State<AppState>,
    ApiPath(pattern_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RemoveFavorite>,
) -> Result<Json<Removed>, ApiError> {
    state
        .store()
        .remove_favorite(pattern_id, &SessionId::new(payload.user_id))
        .await
        .map_err(from_collaborator)?;
    Ok(Json(Removed {
        pattern_id,
        removed: true,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/{pattern_id}", delete(remove_favorite))
}
