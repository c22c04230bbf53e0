use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;

use super::repo_types::{Order, OrderRow};

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn order_exists(
        &self,
        guardian_email: &str,
        child_name: &str,
        date: Date,
    ) -> anyhow::Result<bool>;

    /// Returns false when the child already has an order for that date.
    async fn insert_order(&self, order: &Order) -> anyhow::Result<bool>;

    /// Deletes every order on `date` for a child with this name.
    async fn delete_orders(&self, child_name: &str, date: Date) -> anyhow::Result<u64>;

    /// Orders for one day, ordered by service point then child.
    async fn list_for_date(&self, date: Date) -> anyhow::Result<Vec<Order>>;
}

#[derive(Clone)]
pub struct PgOrderStore {
    db: PgPool,
}

impl PgOrderStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn order_exists(
        &self,
        guardian_email: &str,
        child_name: &str,
        date: Date,
    ) -> anyhow::Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM orders
                 WHERE guardian_email = $1 AND child_name = $2 AND order_date = $3
            )
            "#,
        )
        .bind(guardian_email)
        .bind(child_name)
        .bind(date)
        .fetch_one(&self.db)
        .await
        .context("check existing order")?;
        Ok(exists)
    }

    async fn insert_order(&self, order: &Order) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO orders
                (id, order_date, child_name, guardian_email, age_group, service_point,
                 coupon_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (guardian_email, child_name, order_date) DO NOTHING
            "#,
        )
        .bind(order.id)
        .bind(order.date)
        .bind(&order.child_name)
        .bind(&order.guardian_email)
        .bind(order.age_group.as_str())
        .bind(&order.service_point)
        .bind(order.coupon_id)
        .bind(order.created_at)
        .execute(&self.db)
        .await
        .context("insert order")?;
        Ok(res.rows_affected() == 1)
    }

    async fn delete_orders(&self, child_name: &str, date: Date) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM orders WHERE child_name = $1 AND order_date = $2")
            .bind(child_name)
            .bind(date)
            .execute(&self.db)
            .await
            .context("delete order")?;
        Ok(res.rows_affected())
    }

    async fn list_for_date(&self, date: Date) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, order_date, child_name, guardian_email, age_group, service_point,
                   coupon_id, created_at
              FROM orders
             WHERE order_date = $1
             ORDER BY service_point, child_name, guardian_email
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("list orders for date")?;
        rows.into_iter().map(Order::try_from).collect()
    }
}
