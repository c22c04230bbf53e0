use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::foods::repo_types::{FoodItem, FoodItemRow};
use crate::models::AgeGroup;

/// The three courses served to one age group on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyMenu {
    pub id: Uuid,
    pub date: Date,
    pub age_group: AgeGroup,
    pub soup: FoodItem,
    pub main: FoodItem,
    pub dessert: FoodItem,
}

/// A menu row joined with its three food items.
#[derive(Debug, FromRow)]
pub struct DailyMenuRow {
    pub id: Uuid,
    pub menu_date: Date,
    pub age_group: String,
    pub soup_name: String,
    pub soup_category: String,
    pub soup_allergens: Vec<String>,
    pub soup_age_group: String,
    pub main_name: String,
    pub main_category: String,
    pub main_allergens: Vec<String>,
    pub main_age_group: String,
    pub dessert_name: String,
    pub dessert_category: String,
    pub dessert_allergens: Vec<String>,
    pub dessert_age_group: String,
}

impl TryFrom<DailyMenuRow> for DailyMenu {
    type Error = anyhow::Error;

    fn try_from(r: DailyMenuRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            date: r.menu_date,
            age_group: r.age_group.parse()?,
            soup: FoodItem::try_from(FoodItemRow {
                name: r.soup_name,
                category: r.soup_category,
                allergens: r.soup_allergens,
                age_group: r.soup_age_group,
            })?,
            main: FoodItem::try_from(FoodItemRow {
                name: r.main_name,
                category: r.main_category,
                allergens: r.main_allergens,
                age_group: r.main_age_group,
            })?,
            dessert: FoodItem::try_from(FoodItemRow {
                name: r.dessert_name,
                category: r.dessert_category,
                allergens: r.dessert_allergens,
                age_group: r.dessert_age_group,
            })?,
        })
    }
}
