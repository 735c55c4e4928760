use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::catalog::{self, FlowerFilter};
use crate::error::AppError;
use crate::models::FlowerWithTags;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flowers", get(search_flowers))
        .route("/flowers/recommendation", get(recommend_flower))
        .route("/flowers/{id}", get(show_flower))
}

async fn search_flowers(
    State(state): State<AppState>,
    Query(filter): Query<FlowerFilter>,
) -> Result<Json<Vec<FlowerWithTags>>, AppError> {
    let flowers = catalog::search_flowers(&state.db, &filter).await?;
    Ok(Json(flowers))
}

async fn recommend_flower(State(state): State<AppState>) -> Result<Response, AppError> {
    // No flower this month is a normal outcome, not a 404.
    let response = match catalog::recommend_flower(&state.db).await? {
        Some(flower) => Json(flower).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

async fn show_flower(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FlowerWithTags>, AppError> {
    catalog::find_flower(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}
