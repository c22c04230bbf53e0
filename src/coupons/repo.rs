use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Adds `count` coupons and returns the new balance.
    async fn credit(&self, guardian_email: &str, child_name: &str, count: i32)
        -> anyhow::Result<i32>;

    /// Atomically takes one coupon. `None` when the balance is zero or absent.
    async fn try_consume(&self, guardian_email: &str, child_name: &str)
        -> anyhow::Result<Option<i32>>;

    async fn balance(&self, guardian_email: &str, child_name: &str) -> anyhow::Result<i32>;
}

#[derive(Clone)]
pub struct PgCouponStore {
    db: PgPool,
}

impl PgCouponStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CouponStore for PgCouponStore {
    async fn credit(
        &self,
        guardian_email: &str,
        child_name: &str,
        count: i32,
    ) -> anyhow::Result<i32> {
        let (remaining,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO coupon_balances (guardian_email, child_name, remaining)
            VALUES ($1, $2, $3)
            ON CONFLICT (guardian_email, child_name)
            DO UPDATE SET remaining = coupon_balances.remaining + EXCLUDED.remaining,
                          updated_at = now()
            RETURNING remaining
            "#,
        )
        .bind(guardian_email)
        .bind(child_name)
        .bind(count)
        .fetch_one(&self.db)
        .await
        .context("credit coupons")?;
        Ok(remaining)
    }

    async fn try_consume(
        &self,
        guardian_email: &str,
        child_name: &str,
    ) -> anyhow::Result<Option<i32>> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        // The UPDATE takes the row lock; a concurrent reservation waits and
        // re-checks `remaining > 0` against the committed value.
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE coupon_balances
               SET remaining = remaining - 1,
                   updated_at = now()
             WHERE guardian_email = $1
               AND child_name = $2
               AND remaining > 0
            RETURNING remaining
            "#,
        )
        .bind(guardian_email)
        .bind(child_name)
        .fetch_optional(&mut *tx)
        .await
        .context("consume coupon")?;
        tx.commit().await.context("commit tx")?;
        Ok(row.map(|(remaining,)| remaining))
    }

    async fn balance(&self, guardian_email: &str, child_name: &str) -> anyhow::Result<i32> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT remaining
              FROM coupon_balances
             WHERE guardian_email = $1 AND child_name = $2
            "#,
        )
        .bind(guardian_email)
        .bind(child_name)
        .fetch_optional(&self.db)
        .await
        .context("read coupon balance")?;
        Ok(row.map(|(remaining,)| remaining).unwrap_or(0))
    }
}
