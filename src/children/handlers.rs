use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{GuardianQuery, RegisterChildRequest};
use super::repo_types::Child;
use super::services::ChildRegistry;
use crate::{error::KitchenError, state::AppState};

pub fn child_routes() -> Router<AppState> {
    Router::new().route("/children", get(list_children).post(register_child))
}

#[instrument(skip(registry))]
pub async fn register_child(
    State(registry): State<ChildRegistry>,
    Json(body): Json<RegisterChildRequest>,
) -> Result<(StatusCode, Json<Child>), KitchenError> {
    let child = registry
        .register_child(&body.guardian_email, &body.full_name, body.age_group)
        .await?;
    Ok((StatusCode::CREATED, Json(child)))
}

#[instrument(skip(registry))]
pub async fn list_children(
    State(registry): State<ChildRegistry>,
    Query(q): Query<GuardianQuery>,
) -> Result<Json<Vec<Child>>, KitchenError> {
    Ok(Json(registry.list_children(&q.guardian_email).await?))
}
