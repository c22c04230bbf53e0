use std::collections::BTreeSet;

use serde::Deserialize;

use crate::models::{Allergen, Category, FoodAgeGroup};

/// Request body for adding a dish to the catalog.
#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub allergens: BTreeSet<Allergen>,
    pub age_group: FoodAgeGroup,
}
