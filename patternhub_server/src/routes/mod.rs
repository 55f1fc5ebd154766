use axum::Router;

use crate::state::AppState;

pub mod advisor;
pub mod architectures;
pub mod favorites;
pub mod patterns;

/// Every API route, nested under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(patterns::router())
            .merge(architectures::router())
            .merge(favorites::router())
            .merge(advisor::router()),
    )
}
