use std::sync::Arc;

use axum::extract::FromRef;
use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use super::repo::CouponStore;
use super::repo_types::CouponReservation;
use crate::children::services::ChildRegistry;
use crate::error::KitchenError;
use crate::state::AppState;
use crate::validation::{normalize_email, require_text};

#[derive(Clone)]
pub struct CouponLedger {
    coupons: Arc<dyn CouponStore>,
    children: ChildRegistry,
}

impl FromRef<AppState> for CouponLedger {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.coupons.clone(), ChildRegistry::from_ref(state))
    }
}

impl CouponLedger {
    pub fn new(coupons: Arc<dyn CouponStore>, children: ChildRegistry) -> Self {
        Self { coupons, children }
    }

    /// Credits `count` coupons to a registered child and returns the new balance.
    pub async fn purchase(
        &self,
        guardian_email: &str,
        child_name: &str,
        count: i32,
    ) -> Result<i32, KitchenError> {
        if count <= 0 {
            return Err(KitchenError::Validation(format!(
                "coupon count must be positive, got {count}"
            )));
        }
        let child = self.children.find_child(guardian_email, child_name).await?;
        let balance = self
            .coupons
            .credit(&child.guardian_email, &child.full_name, count)
            .await?;
        info!(guardian = %child.guardian_email, child = %child.full_name, count, balance, "coupons purchased");
        Ok(balance)
    }

    /// Takes one coupon for an order on `for_date`.
    pub async fn verify_and_reserve(
        &self,
        guardian_email: &str,
        child_name: &str,
        for_date: Date,
    ) -> Result<CouponReservation, KitchenError> {
        let guardian_email = normalize_email(guardian_email)?;
        let child_name = require_text("child name", child_name)?;

        let Some(remaining) = self.coupons.try_consume(&guardian_email, &child_name).await? else {
            warn!(guardian = %guardian_email, child = %child_name, %for_date, "no available coupons");
            return Err(KitchenError::NoAvailableCoupons {
                guardian_email,
                child_name,
            });
        };

        info!(guardian = %guardian_email, child = %child_name, %for_date, remaining, "coupon reserved");
        Ok(CouponReservation {
            id: Uuid::new_v4(),
            guardian_email,
            child_name,
            for_date,
            remaining,
        })
    }

    /// Returns a reservation's coupon when the order it paid for was never
    /// recorded.
    pub async fn release(&self, reservation: &CouponReservation) -> Result<i32, KitchenError> {
        let balance = self
            .coupons
            .credit(&reservation.guardian_email, &reservation.child_name, 1)
            .await?;
        info!(
            reservation = %reservation.id,
            guardian = %reservation.guardian_email,
            child = %reservation.child_name,
            balance,
            "coupon reservation released"
        );
        Ok(balance)
    }

    pub async fn balance(&self, guardian_email: &str, child_name: &str) -> Result<i32, KitchenError> {
        let guardian_email = normalize_email(guardian_email)?;
        let child_name = require_text("child name", child_name)?;
        Ok(self.coupons.balance(&guardian_email, &child_name).await?)
    }
}
