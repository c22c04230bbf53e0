use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{FoodItem, FoodItemRow};

#[async_trait]
pub trait FoodStore: Send + Sync {
    /// Returns false when an item with the same name already exists.
    async fn insert_food(&self, food: &FoodItem) -> anyhow::Result<bool>;
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<FoodItem>>;
    async fn list_foods(&self) -> anyhow::Result<Vec<FoodItem>>;
    async fn count_foods(&self) -> anyhow::Result<i64>;
}

#[derive(Clone)]
pub struct PgFoodStore {
    db: PgPool,
}

impl PgFoodStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodStore for PgFoodStore {
    async fn insert_food(&self, food: &FoodItem) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO food_items (name, category, allergens, age_group)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&food.name)
        .bind(food.category.as_str())
        .bind(food.allergen_names())
        .bind(food.age_group.as_str())
        .execute(&self.db)
        .await
        .context("insert food item")?;
        Ok(res.rows_affected() == 1)
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<FoodItem>> {
        let row = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT name, category, allergens, age_group
              FROM food_items
             WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await
        .context("find food item by name")?;
        row.map(FoodItem::try_from).transpose()
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT name, category, allergens, age_group
              FROM food_items
             ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list food items")?;
        rows.into_iter().map(FoodItem::try_from).collect()
    }

    async fn count_foods(&self) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_items")
            .fetch_one(&self.db)
            .await
            .context("count food items")?;
        Ok(count)
    }
}
