use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::models::AgeGroup;

/// A lunch ordered for one child on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub date: Date,
    pub child_name: String,
    pub guardian_email: String,
    pub age_group: AgeGroup,
    pub service_point: String,
    /// The coupon reservation that paid for this order.
    pub coupon_id: Uuid,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub order_date: Date,
    pub child_name: String,
    pub guardian_email: String,
    pub age_group: String,
    pub service_point: String,
    pub coupon_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl TryFrom<OrderRow> for Order {
    type Error = anyhow::Error;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            date: r.order_date,
            child_name: r.child_name,
            guardian_email: r.guardian_email,
            age_group: r.age_group.parse()?,
            service_point: r.service_point,
            coupon_id: r.coupon_id,
            created_at: r.created_at,
        })
    }
}
