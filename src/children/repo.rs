use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Child, ChildRow};

#[async_trait]
pub trait ChildStore: Send + Sync {
    /// Returns false when the guardian already registered a child with that name.
    async fn insert_child(&self, child: &Child) -> anyhow::Result<bool>;
    async fn find_child(&self, guardian_email: &str, full_name: &str)
        -> anyhow::Result<Option<Child>>;
    async fn list_children(&self, guardian_email: &str) -> anyhow::Result<Vec<Child>>;
}

#[derive(Clone)]
pub struct PgChildStore {
    db: PgPool,
}

impl PgChildStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChildStore for PgChildStore {
    async fn insert_child(&self, child: &Child) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO children (id, guardian_email, full_name, age_group, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (guardian_email, full_name) DO NOTHING
            "#,
        )
        .bind(child.id)
        .bind(&child.guardian_email)
        .bind(&child.full_name)
        .bind(child.age_group.as_str())
        .bind(child.created_at)
        .execute(&self.db)
        .await
        .context("insert child")?;
        Ok(res.rows_affected() == 1)
    }

    async fn find_child(
        &self,
        guardian_email: &str,
        full_name: &str,
    ) -> anyhow::Result<Option<Child>> {
        let row = sqlx::query_as::<_, ChildRow>(
            r#"
            SELECT id, guardian_email, full_name, age_group, created_at
              FROM children
             WHERE guardian_email = $1 AND full_name = $2
            "#,
        )
        .bind(guardian_email)
        .bind(full_name)
        .fetch_optional(&self.db)
        .await
        .context("find child")?;
        row.map(Child::try_from).transpose()
    }

    async fn list_children(&self, guardian_email: &str) -> anyhow::Result<Vec<Child>> {
        let rows = sqlx::query_as::<_, ChildRow>(
            r#"
            SELECT id, guardian_email, full_name, age_group, created_at
              FROM children
             WHERE guardian_email = $1
             ORDER BY full_name
            "#,
        )
        .bind(guardian_email)
        .fetch_all(&self.db)
        .await
        .context("list children")?;
        rows.into_iter().map(Child::try_from).collect()
    }
}
