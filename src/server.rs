//! HTTP server for restaurant recommendations

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{RecommendError, RecommendQuery, RecommendResponse, Recommender};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

fn error_status(err: &RecommendError) -> (StatusCode, &'static str) {
    match err {
        RecommendError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "Invalid query"),
        RecommendError::UnknownCuisine(_) => (StatusCode::BAD_REQUEST, "Unknown cuisine"),
        RecommendError::InsufficientCandidates { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Not enough restaurants to recommend")
        }
    }
}

/// Recommendation handler
async fn recommend_handler(
    State(recommender): State<Arc<Recommender>>,
    Json(query): Json<RecommendQuery>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Received recommend request: city='{}', cuisine='{}'",
        query.city, query.cuisine
    );

    match recommender.recommend(&query) {
        Ok(response) => {
            info!(
                "Recommendation successful: {} of {} candidates returned",
                response.recommendations.len(),
                response.candidates_found
            );
            Ok(Json(response))
        }
        Err(e) => {
            let (status, message) = error_status(&e);
            warn!("Recommendation failed: {}", e);
            Err((
                status,
                Json(ErrorResponse {
                    error: message.to_string(),
                    details: Some(e.to_string()),
                }),
            ))
        }
    }
}

async fn cities_handler(State(recommender): State<Arc<Recommender>>) -> Json<Vec<String>> {
    Json(recommender.cities().to_vec())
}

async fn cuisines_handler(State(recommender): State<Arc<Recommender>>) -> Json<Vec<String>> {
    Json(recommender.cuisines().to_vec())
}

/// Health check handler
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "tablematch".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create and configure the HTTP router
pub fn create_router(recommender: Arc<Recommender>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/cities", get(cities_handler))
        .route("/cuisines", get(cuisines_handler))
        .route("/recommend", post(recommend_handler))
        .with_state(recommender)
}

/// Run the HTTP server
pub async fn run_server(recommender: Arc<Recommender>, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting tablematch server on {}", addr);

    let app = create_router(recommender);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
