use serde::{Deserialize, Serialize};
use time::Date;

use crate::calendar::BusinessWeek;
use crate::models::AgeGroup;

/// Display-ready form of a daily menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuView {
    pub date: Date,
    /// Localised weekday label; absent for weekend dates.
    pub day_of_week: Option<String>,
    pub age_group_name: String,
    pub soup: FoodView,
    pub main: FoodView,
    pub dessert: FoodView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodView {
    pub name: String,
    pub category_name: String,
    pub age_group_name: String,
    /// e.g. "gluten, milk, tree nuts"
    pub allergens: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMenuRequest {
    pub date: Date,
    pub age_group: AgeGroup,
    pub soup: String,
    pub main: String,
    pub dessert: String,
}

/// `?date=YYYY-MM-DD`; today when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeedWeekResponse {
    pub created: usize,
    pub week: BusinessWeek,
}

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub deleted: u64,
    pub before: Date,
}
