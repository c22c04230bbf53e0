use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{DeleteOrderRequest, DeleteOrderResponse, OrderResult, PlaceOrderRequest};
use super::repo_types::Order;
use super::services::OrderPlanner;
use crate::{
    calendar::parse_date, error::KitchenError, menus::dto::DateQuery, state::AppState,
};

pub fn order_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/orders",
        get(orders_for_date).post(place_order).delete(delete_order),
    )
}

#[instrument(skip(planner))]
pub async fn place_order(
    State(planner): State<OrderPlanner>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResult>), KitchenError> {
    let result = planner
        .place_order(
            body.date,
            &body.service_point,
            &body.guardian_email,
            &body.child_full_name,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[instrument(skip(planner))]
pub async fn delete_order(
    State(planner): State<OrderPlanner>,
    body: Option<Json<DeleteOrderRequest>>,
) -> Result<Json<DeleteOrderResponse>, KitchenError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let date = match body.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_date(raw)?),
        _ => None,
    };
    let deleted = planner
        .delete_order(date, body.child_name.as_deref())
        .await?;
    Ok(Json(DeleteOrderResponse { deleted }))
}

#[instrument(skip(planner))]
pub async fn orders_for_date(
    State(planner): State<OrderPlanner>,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<Order>>, KitchenError> {
    let raw = q
        .date
        .as_deref()
        .ok_or_else(|| KitchenError::Validation("date is required".into()))?;
    let date = parse_date(raw)?;
    Ok(Json(planner.orders_for_date(date).await?))
}
