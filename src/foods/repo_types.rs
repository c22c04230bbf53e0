use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{Allergen, Category, FoodAgeGroup};

/// A dish the kitchen can put on a menu. Names are unique and uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodItem {
    pub name: String,
    pub category: Category,
    pub allergens: BTreeSet<Allergen>,
    pub age_group: FoodAgeGroup,
}

#[derive(Debug, FromRow)]
pub struct FoodItemRow {
    pub name: String,
    pub category: String,
    pub allergens: Vec<String>,
    pub age_group: String,
}

impl TryFrom<FoodItemRow> for FoodItem {
    type Error = anyhow::Error;

    fn try_from(r: FoodItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category: r.category.parse()?,
            allergens: r
                .allergens
                .iter()
                .map(|a| a.parse::<Allergen>())
                .collect::<anyhow::Result<BTreeSet<_>>>()?,
            age_group: r.age_group.parse()?,
            name: r.name,
        })
    }
}

impl FoodItem {
    pub fn allergen_names(&self) -> Vec<String> {
        self.allergens.iter().map(|a| a.as_str().to_string()).collect()
    }
}
