use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;

use super::repo_types::{DailyMenu, DailyMenuRow};
use crate::models::AgeGroup;

#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn count_menus(&self) -> anyhow::Result<i64>;

    /// Inserts the menus, skipping any (date, age group) that already has one.
    /// Returns how many were inserted.
    async fn insert_menus(&self, menus: &[DailyMenu]) -> anyhow::Result<u64>;

    async fn find_menu(&self, date: Date, age_group: AgeGroup)
        -> anyhow::Result<Option<DailyMenu>>;

    /// Menus dated within `[from, to]`, ordered by date then age group.
    async fn list_between(&self, from: Date, to: Date) -> anyhow::Result<Vec<DailyMenu>>;

    /// Deletes every menu dated strictly before `date`.
    async fn delete_before(&self, date: Date) -> anyhow::Result<u64>;
}

const MENU_SELECT: &str = r#"
    SELECT m.id, m.menu_date, m.age_group,
           s.name AS soup_name, s.category AS soup_category,
           s.allergens AS soup_allergens, s.age_group AS soup_age_group,
           mn.name AS main_name, mn.category AS main_category,
           mn.allergens AS main_allergens, mn.age_group AS main_age_group,
           d.name AS dessert_name, d.category AS dessert_category,
           d.allergens AS dessert_allergens, d.age_group AS dessert_age_group
      FROM daily_menus m
      JOIN food_items s ON s.name = m.soup
      JOIN food_items mn ON mn.name = m.main
      JOIN food_items d ON d.name = m.dessert
"#;

#[derive(Clone)]
pub struct PgMenuStore {
    db: PgPool,
}

impl PgMenuStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn count_menus(&self) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM daily_menus")
            .fetch_one(&self.db)
            .await
            .context("count menus")?;
        Ok(count)
    }

    async fn insert_menus(&self, menus: &[DailyMenu]) -> anyhow::Result<u64> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let mut inserted = 0;
        for m in menus {
            let res = sqlx::query(
                r#"
                INSERT INTO daily_menus (id, menu_date, age_group, soup, main, dessert)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (menu_date, age_group) DO NOTHING
                "#,
            )
            .bind(m.id)
            .bind(m.date)
            .bind(m.age_group.as_str())
            .bind(&m.soup.name)
            .bind(&m.main.name)
            .bind(&m.dessert.name)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("insert menu {} {}", m.date, m.age_group.as_str()))?;
            inserted += res.rows_affected();
        }
        tx.commit().await.context("commit tx")?;
        Ok(inserted)
    }

    async fn find_menu(
        &self,
        date: Date,
        age_group: AgeGroup,
    ) -> anyhow::Result<Option<DailyMenu>> {
        let sql = format!("{MENU_SELECT} WHERE m.menu_date = $1 AND m.age_group = $2");
        let row = sqlx::query_as::<_, DailyMenuRow>(&sql)
            .bind(date)
            .bind(age_group.as_str())
            .fetch_optional(&self.db)
            .await
            .context("find menu by date and age group")?;
        row.map(DailyMenu::try_from).transpose()
    }

    async fn list_between(&self, from: Date, to: Date) -> anyhow::Result<Vec<DailyMenu>> {
        let sql = format!(
            "{MENU_SELECT} WHERE m.menu_date BETWEEN $1 AND $2 ORDER BY m.menu_date, m.age_group DESC"
        );
        let rows = sqlx::query_as::<_, DailyMenuRow>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.db)
            .await
            .context("list menus between dates")?;
        rows.into_iter().map(DailyMenu::try_from).collect()
    }

    async fn delete_before(&self, date: Date) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM daily_menus WHERE menu_date < $1")
            .bind(date)
            .execute(&self.db)
            .await
            .context("delete expired menus")?;
        Ok(res.rows_affected())
    }
}
