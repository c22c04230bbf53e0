use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Proof that one coupon was taken off a guardian/child balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CouponReservation {
    pub id: Uuid,
    pub guardian_email: String,
    pub child_name: String,
    pub for_date: Date,
    /// Balance left after this reservation.
    pub remaining: i32,
}
