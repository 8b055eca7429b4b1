use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::food::analysis::nutrition::{parse_food_description, ParsedMacros};
use crate::food::analysis::search::{FoodDetails, FoodSearchService, SearchOutcome};
use crate::food::api::DEFAULT_MAX_RESULTS;

const MAX_RESULTS_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AppState {
    foods: Arc<FoodSearchService>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 2, max = 100))]
    q: String,
    #[validate(range(min = 1, max = 50))]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    description: String,
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Food not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ApiResponse { status: self.to_string() })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, AppError>;

/// Create and configure the API router
pub fn create_api(foods: FoodSearchService) -> Router {
    let state = AppState { foods: Arc::new(foods) };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/foods/search", get(search_handler))
        .route("/api/foods/parse", post(parse_handler))
        .route("/api/foods/:id", get(details_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse { status: "ok".to_string() })
}

async fn search_handler(
    State(state): State<AppState>,
    Query(mut params): Query<SearchParams>,
) -> ApiResult<SearchOutcome> {
    params.q = params.q.trim().to_string();
    params
        .validate()
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let max_results = params
        .max_results
        .map_or(DEFAULT_MAX_RESULTS, |n| n as usize)
        .min(MAX_RESULTS_LIMIT);

    let outcome = state.foods.search(&params.q, max_results).await;
    info!("Food search \"{}\" answered from {:?} with {} result(s)", params.q, outcome.source, outcome.foods.len());
    Ok(Json(outcome))
}

async fn details_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FoodDetails> {
    state
        .foods
        .details(&id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound(id))
}

async fn parse_handler(Json(request): Json<ParseRequest>) -> Json<ParsedMacros> {
    Json(parse_food_description(&request.description))
}
