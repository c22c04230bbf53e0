use std::sync::Arc;

use axum::extract::FromRef;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dto::OrderResult;
use super::repo::OrderStore;
use super::repo_types::Order;
use crate::children::services::ChildRegistry;
use crate::coupons::services::CouponLedger;
use crate::error::KitchenError;
use crate::menus::services::{to_presentation_view, MenuCatalog};
use crate::state::AppState;
use crate::validation::{normalize_email, require_text};

#[derive(Clone)]
pub struct OrderPlanner {
    orders: Arc<dyn OrderStore>,
    catalog: MenuCatalog,
    ledger: CouponLedger,
    children: ChildRegistry,
}

impl FromRef<AppState> for OrderPlanner {
    fn from_ref(state: &AppState) -> Self {
        Self::new(
            state.orders.clone(),
            MenuCatalog::from_ref(state),
            CouponLedger::from_ref(state),
            ChildRegistry::from_ref(state),
        )
    }
}

impl OrderPlanner {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: MenuCatalog,
        ledger: CouponLedger,
        children: ChildRegistry,
    ) -> Self {
        Self {
            orders,
            catalog,
            ledger,
            children,
        }
    }

    /// Places a lunch order, spending one coupon.
    ///
    /// The coupon is reserved before the menu is looked up, so a request for
    /// a day without a menu fails with `NotFound` after the coupon is gone.
    pub async fn place_order(
        &self,
        date: Date,
        service_point: &str,
        guardian_email: &str,
        child_full_name: &str,
    ) -> Result<OrderResult, KitchenError> {
        let guardian_email = normalize_email(guardian_email)?;
        let service_point = require_text("service point", service_point)?;
        let child = self.children.find_child(&guardian_email, child_full_name).await?;

        if self
            .orders
            .order_exists(&child.guardian_email, &child.full_name, date)
            .await?
        {
            return Err(duplicate(&child.full_name, date));
        }

        let reservation = self
            .ledger
            .verify_and_reserve(&child.guardian_email, &child.full_name, date)
            .await?;

        let menu = self.catalog.get_menu(date, child.age_group).await?;

        let order = Order {
            id: Uuid::new_v4(),
            date,
            child_name: child.full_name,
            guardian_email: child.guardian_email,
            age_group: child.age_group,
            service_point,
            coupon_id: reservation.id,
            created_at: OffsetDateTime::now_utc(),
        };
        if !self.orders.insert_order(&order).await? {
            // A concurrent placement took the slot after the duplicate check.
            warn!(child = %order.child_name, %date, reservation = %reservation.id, "lost race for order slot");
            self.ledger.release(&reservation).await?;
            return Err(duplicate(&order.child_name, date));
        }

        info!(
            order = %order.id,
            child = %order.child_name,
            %date,
            service_point = %order.service_point,
            remaining = reservation.remaining,
            "order placed"
        );
        Ok(OrderResult {
            id: order.id,
            date,
            child_name: order.child_name,
            guardian_email: order.guardian_email,
            service_point: order.service_point,
            coupon_id: order.coupon_id,
            menu: to_presentation_view(&menu),
            remaining_coupons: reservation.remaining,
        })
    }

    /// Removes the child's order for `date`. Missing or blank arguments make
    /// this a no-op. The spent coupon is not returned.
    pub async fn delete_order(
        &self,
        date: Option<Date>,
        child_name: Option<&str>,
    ) -> Result<u64, KitchenError> {
        let child_name = child_name.map(str::trim).filter(|name| !name.is_empty());
        let (Some(date), Some(child_name)) = (date, child_name) else {
            debug!("delete order without date or child; ignoring");
            return Ok(0);
        };

        let deleted = self.orders.delete_orders(child_name, date).await?;
        info!(child = %child_name, %date, deleted, "order deleted");
        Ok(deleted)
    }

    pub async fn orders_for_date(&self, date: Date) -> Result<Vec<Order>, KitchenError> {
        Ok(self.orders.list_for_date(date).await?)
    }
}

fn duplicate(child_name: &str, date: Date) -> KitchenError {
    KitchenError::Validation(format!("{child_name} already has an order for {date}"))
}
