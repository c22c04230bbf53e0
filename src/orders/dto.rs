use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::menus::MenuView;

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub date: Date,
    pub service_point: String,
    pub guardian_email: String,
    pub child_full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: Uuid,
    pub date: Date,
    pub child_name: String,
    pub guardian_email: String,
    pub service_point: String,
    pub coupon_id: Uuid,
    pub menu: MenuView,
    pub remaining_coupons: i32,
}

/// Both fields may be missing; the request is then acknowledged without effect.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteOrderRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub child_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOrderResponse {
    pub deleted: u64,
}
