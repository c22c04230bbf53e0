use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::dto::AddFoodRequest;
use super::repo_types::FoodItem;
use super::services::FoodCatalog;
use crate::{error::KitchenError, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new().route("/admin/foods", get(list_foods).post(add_food))
}

#[instrument(skip(catalog))]
pub async fn list_foods(
    State(catalog): State<FoodCatalog>,
) -> Result<Json<Vec<FoodItem>>, KitchenError> {
    Ok(Json(catalog.list_foods().await?))
}

#[instrument(skip(catalog))]
pub async fn add_food(
    State(catalog): State<FoodCatalog>,
    Json(body): Json<AddFoodRequest>,
) -> Result<(StatusCode, Json<FoodItem>), KitchenError> {
    let food = catalog
        .add_food(&body.name, body.category, body.allergens, body.age_group)
        .await?;
    Ok((StatusCode::CREATED, Json(food)))
}
