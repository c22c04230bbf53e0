use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PurchaseCouponsRequest {
    pub guardian_email: String,
    pub child_name: String,
    pub count: i32,
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub guardian_email: String,
    pub child_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub guardian_email: String,
    pub child_name: String,
    pub balance: i32,
}
