//! In-memory stores backing `AppState::fake()`.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use async_trait::async_trait;
use time::Date;
use tokio::sync::Mutex;

use crate::children::{repo::ChildStore, repo_types::Child};
use crate::coupons::repo::CouponStore;
use crate::foods::{repo::FoodStore, repo_types::FoodItem};
use crate::menus::{repo::MenuStore, repo_types::DailyMenu};
use crate::models::AgeGroup;
use crate::orders::{repo::OrderStore, repo_types::Order};

#[derive(Default)]
pub struct MemoryFoodStore {
    foods: Mutex<BTreeMap<String, FoodItem>>,
}

#[async_trait]
impl FoodStore for MemoryFoodStore {
    async fn insert_food(&self, food: &FoodItem) -> anyhow::Result<bool> {
        let mut foods = self.foods.lock().await;
        if foods.contains_key(&food.name) {
            return Ok(false);
        }
        foods.insert(food.name.clone(), food.clone());
        Ok(true)
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<FoodItem>> {
        Ok(self.foods.lock().await.get(name).cloned())
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<FoodItem>> {
        Ok(self.foods.lock().await.values().cloned().collect())
    }

    async fn count_foods(&self) -> anyhow::Result<i64> {
        Ok(self.foods.lock().await.len() as i64)
    }
}

/// Keyed by (date, age group) so iteration follows the listing order.
#[derive(Default)]
pub struct MemoryMenuStore {
    menus: Mutex<BTreeMap<(Date, AgeGroup), DailyMenu>>,
}

#[async_trait]
impl MenuStore for MemoryMenuStore {
    async fn count_menus(&self) -> anyhow::Result<i64> {
        Ok(self.menus.lock().await.len() as i64)
    }

    async fn insert_menus(&self, menus: &[DailyMenu]) -> anyhow::Result<u64> {
        let mut stored = self.menus.lock().await;
        let mut inserted = 0;
        for menu in menus {
            let key = (menu.date, menu.age_group);
            if !stored.contains_key(&key) {
                stored.insert(key, menu.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn find_menu(
        &self,
        date: Date,
        age_group: AgeGroup,
    ) -> anyhow::Result<Option<DailyMenu>> {
        Ok(self.menus.lock().await.get(&(date, age_group)).cloned())
    }

    async fn list_between(&self, from: Date, to: Date) -> anyhow::Result<Vec<DailyMenu>> {
        if from > to {
            return Ok(Vec::new());
        }
        let menus = self.menus.lock().await;
        Ok(menus
            .range((from, AgeGroup::Young)..=(to, AgeGroup::Old))
            .map(|(_, menu)| menu.clone())
            .collect())
    }

    async fn delete_before(&self, date: Date) -> anyhow::Result<u64> {
        let mut menus = self.menus.lock().await;
        let before = menus.len();
        menus.retain(|(menu_date, _), _| *menu_date >= date);
        Ok((before - menus.len()) as u64)
    }
}

/// Keyed by (guardian email, full name).
#[derive(Default)]
pub struct MemoryChildStore {
    children: Mutex<BTreeMap<(String, String), Child>>,
}

#[async_trait]
impl ChildStore for MemoryChildStore {
    async fn insert_child(&self, child: &Child) -> anyhow::Result<bool> {
        let mut children = self.children.lock().await;
        let key = (child.guardian_email.clone(), child.full_name.clone());
        if children.contains_key(&key) {
            return Ok(false);
        }
        children.insert(key, child.clone());
        Ok(true)
    }

    async fn find_child(
        &self,
        guardian_email: &str,
        full_name: &str,
    ) -> anyhow::Result<Option<Child>> {
        let key = (guardian_email.to_string(), full_name.to_string());
        Ok(self.children.lock().await.get(&key).cloned())
    }

    async fn list_children(&self, guardian_email: &str) -> anyhow::Result<Vec<Child>> {
        Ok(self
            .children
            .lock()
            .await
            .values()
            .filter(|c| c.guardian_email == guardian_email)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryCouponStore {
    balances: Mutex<HashMap<(String, String), i32>>,
}

#[async_trait]
impl CouponStore for MemoryCouponStore {
    async fn credit(
        &self,
        guardian_email: &str,
        child_name: &str,
        count: i32,
    ) -> anyhow::Result<i32> {
        let mut balances = self.balances.lock().await;
        let balance = balances
            .entry((guardian_email.to_string(), child_name.to_string()))
            .or_insert(0);
        *balance = balance
            .checked_add(count)
            .context("coupon balance overflow")?;
        Ok(*balance)
    }

    async fn try_consume(
        &self,
        guardian_email: &str,
        child_name: &str,
    ) -> anyhow::Result<Option<i32>> {
        // Check and decrement under one lock.
        let mut balances = self.balances.lock().await;
        let key = (guardian_email.to_string(), child_name.to_string());
        match balances.get_mut(&key) {
            Some(balance) if *balance > 0 => {
                *balance -= 1;
                Ok(Some(*balance))
            }
            _ => Ok(None),
        }
    }

    async fn balance(&self, guardian_email: &str, child_name: &str) -> anyhow::Result<i32> {
        let key = (guardian_email.to_string(), child_name.to_string());
        Ok(self.balances.lock().await.get(&key).copied().unwrap_or(0))
    }
}

/// Keyed by (guardian email, child name, date), the uniqueness rule for orders.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<BTreeMap<(String, String, Date), Order>>,
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn order_exists(
        &self,
        guardian_email: &str,
        child_name: &str,
        date: Date,
    ) -> anyhow::Result<bool> {
        let key = (guardian_email.to_string(), child_name.to_string(), date);
        Ok(self.orders.lock().await.contains_key(&key))
    }

    async fn insert_order(&self, order: &Order) -> anyhow::Result<bool> {
        let mut orders = self.orders.lock().await;
        let key = (order.guardian_email.clone(), order.child_name.clone(), order.date);
        if orders.contains_key(&key) {
            return Ok(false);
        }
        orders.insert(key, order.clone());
        Ok(true)
    }

    async fn delete_orders(&self, child_name: &str, date: Date) -> anyhow::Result<u64> {
        let mut orders = self.orders.lock().await;
        let before = orders.len();
        orders.retain(|(_, name, order_date), _| !(name == child_name && *order_date == date));
        Ok((before - orders.len()) as u64)
    }

    async fn list_for_date(&self, date: Date) -> anyhow::Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .await
            .values()
            .filter(|o| o.date == date)
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            (&a.service_point, &a.child_name, &a.guardian_email).cmp(&(
                &b.service_point,
                &b.child_name,
                &b.guardian_email,
            ))
        });
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[tokio::test]
    async fn coupon_balance_never_goes_negative() {
        let store = MemoryCouponStore::default();
        assert_eq!(store.try_consume("a@b.c", "Ivan").await.unwrap(), None);
        assert_eq!(store.credit("a@b.c", "Ivan", 1).await.unwrap(), 1);
        assert_eq!(store.try_consume("a@b.c", "Ivan").await.unwrap(), Some(0));
        assert_eq!(store.try_consume("a@b.c", "Ivan").await.unwrap(), None);
        assert_eq!(store.balance("a@b.c", "Ivan").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn coupon_credit_overflow_is_an_error() {
        let store = MemoryCouponStore::default();
        store.credit("a@b.c", "Ivan", i32::MAX).await.unwrap();
        assert!(store.credit("a@b.c", "Ivan", 1).await.is_err());
        assert_eq!(store.balance("a@b.c", "Ivan").await.unwrap(), i32::MAX);
    }

    #[tokio::test]
    async fn empty_range_lists_nothing() {
        let store = MemoryMenuStore::default();
        let menus = store
            .list_between(date!(2024 - 06 - 14), date!(2024 - 06 - 10))
            .await
            .unwrap();
        assert!(menus.is_empty());
    }
}
