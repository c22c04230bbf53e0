use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{BalanceQuery, BalanceResponse, PurchaseCouponsRequest};
use super::services::CouponLedger;
use crate::{error::KitchenError, state::AppState};

pub fn coupon_routes() -> Router<AppState> {
    Router::new().route("/coupons", get(balance).post(purchase))
}

#[instrument(skip(ledger))]
pub async fn purchase(
    State(ledger): State<CouponLedger>,
    Json(body): Json<PurchaseCouponsRequest>,
) -> Result<Json<BalanceResponse>, KitchenError> {
    let balance = ledger
        .purchase(&body.guardian_email, &body.child_name, body.count)
        .await?;
    Ok(Json(BalanceResponse {
        guardian_email: body.guardian_email.trim().to_lowercase(),
        child_name: body.child_name.trim().to_string(),
        balance,
    }))
}

#[instrument(skip(ledger))]
pub async fn balance(
    State(ledger): State<CouponLedger>,
    Query(q): Query<BalanceQuery>,
) -> Result<Json<BalanceResponse>, KitchenError> {
    let balance = ledger.balance(&q.guardian_email, &q.child_name).await?;
    Ok(Json(BalanceResponse {
        guardian_email: q.guardian_email.trim().to_lowercase(),
        child_name: q.child_name.trim().to_string(),
        balance,
    }))
}
