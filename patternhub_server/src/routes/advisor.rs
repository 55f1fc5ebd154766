use axum::{
    Router,
    extract::State,
    response::Json,
    routing::post,
};
use patternhub_core::{
    CodeSnippet, PatternProvider, PatternRecord, Recommendation, RecommendationRequest,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, from_collaborator};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateCodeRequest {
    pub language: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExplainRequest {
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub explanation: String,
}

async fn pattern_by_slug(state: &AppState, slug: &str) -> Result<PatternRecord, ApiError> {
    state
        .store()
        .find_by_slug(slug)
        .await
        .map_err(from_collaborator)?
        .ok_or_else(|| ApiError::not_found(format!("pattern '{slug}'")))
}

/// POST /api/recommendations
/// Ask the model which catalog patterns suit a project
pub async fn recommend(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let advisor = state.advisor()?;
    let catalog = state.store().all_patterns().await.map_err(from_collaborator)?;
    let recommendations = advisor.recommend(&request, &catalog).await?;
    info!("Returning {} recommendations", recommendations.len());
    Ok(Json(recommendations))
}

/// POST /api/patterns/{slug}/generate-code
pub async fn generate_code(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<GenerateCodeRequest>,
) -> Result<Json<CodeSnippet>, ApiError> {
    let advisor = state.advisor()?;
    let pattern = pattern_by_slug(&state, &slug).await?;
    let snippet = advisor
        .generate_code(&pattern, &request.language, request.context.as_deref())
        .await?;
    Ok(Json(snippet))
}

/// POST /api/patterns/{slug}/explain
pub async fn explain(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<ExplainRequest>,
) -> Result<Json<Explanation>, ApiError> {
    let advisor = state.advisor()?;
    let pattern = pattern_by_slug(&state, &slug).await?;
    let explanation = advisor
        .explain(&pattern, request.question.as_deref())
        .await?;
    Ok(Json(Explanation { explanation }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(recommend))
        .route("/patterns/{slug}/generate-code", post(generate_code))
        .route("/patterns/{slug}/explain", post(explain))
}
