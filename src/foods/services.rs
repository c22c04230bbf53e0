use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, warn};

use super::repo::FoodStore;
use super::repo_types::FoodItem;
use crate::error::KitchenError;
use crate::models::{Allergen, Category, FoodAgeGroup};
use crate::state::AppState;
use crate::validation::require_text;

use Allergen::*;
use Category::*;

type BuiltinFood = (&'static str, Category, &'static [Allergen], FoodAgeGroup);

/// Dishes installed into an empty catalog. The weekly menu seed refers to
/// these names.
pub const BUILTIN_FOODS: &[BuiltinFood] = &[
    ("СУПА С ПУЕШКО МЕСО", Soup, &[Celery], FoodAgeGroup::All),
    ("СУПА ОТ КАРТОФИ И МОРКОВИ", Soup, &[Celery, Milk], FoodAgeGroup::All),
    ("СУПА ОТ ТИКВИЧКИ СЪС ЗАСТРОЙКА", Soup, &[Gluten, Eggs, Milk], FoodAgeGroup::All),
    ("СУПА ОТ ДОМАТИ С КАРТОФИ", Soup, &[Celery], FoodAgeGroup::All),
    ("СУПА ОТ ЗЕЛЕН ФАСУЛ СЪС ЗАСТРОЙКА", Soup, &[Gluten, Eggs, Milk], FoodAgeGroup::All),
    ("ТИКВИЧКИ С ОРИЗ", Main, &[Milk], FoodAgeGroup::Old),
    ("КЮФТЕ ОТ РИБА/ ГАРНИТУРА – ПЮРЕ ОТ ЛЕЩА", Main, &[Gluten, Eggs, Fish], FoodAgeGroup::Old),
    ("КЮФТЕТА С БЯЛ СОС", Main, &[Gluten, Eggs, Milk], FoodAgeGroup::Old),
    ("ПИЛЕШКО МЕСО С КАРТОФИ", Main, &[Celery], FoodAgeGroup::Old),
    ("МЛЕЧЕН КИСЕЛ ОТ НЕКТАРИНИ", Dessert, &[Milk], FoodAgeGroup::Old),
    ("КУС-КУС С МЛЯКО И ЯЙЦА", Dessert, &[Gluten, Eggs, Milk], FoodAgeGroup::Old),
    ("МЛЯКО С ОРИЗ", Dessert, &[Milk], FoodAgeGroup::Old),
    ("ПШЕНИЦА С МЛЯКО", Dessert, &[Gluten, Milk, TreeNuts], FoodAgeGroup::Old),
    ("МЛЕЧЕН КИСЕЛ ОТ ПЪПЕШ", Dessert, &[Milk], FoodAgeGroup::Old),
    ("ЗЕЛЕНЧУКОВО ПЮРЕ С ИЗВАРА", Main, &[Milk], FoodAgeGroup::Young),
    ("ПЮРЕ ОТ РИБА И ЗЕЛЕНЧУЦИ", Main, &[Fish, Celery], FoodAgeGroup::Young),
    ("ПЮРЕ ОТ ТЕЛЕШКО С ГРАХ", Main, &[Celery], FoodAgeGroup::Young),
    ("ПЮРЕ ОТ ПИЛЕШКО СЪС ЗЕЛЕНЧУЦИ", Main, &[Celery], FoodAgeGroup::Young),
    ("ПЮРЕ КУС-КУС СЪС ЗАЕШКО МЕСО И ЗЕЛЕНЧУЦИ", Main, &[Gluten, Celery], FoodAgeGroup::Young),
    ("КИСЕЛ ОТ СЕЗОНЕН ПЛОД С ПРЕХОДНО МЛЯКО", Dessert, &[Milk], FoodAgeGroup::Young),
    ("ОРИЗ С ПЪПЕШ", Dessert, &[], FoodAgeGroup::Young),
    ("ПЛОДОВО ПЮРЕ С ИЗВАРА", Dessert, &[Milk], FoodAgeGroup::Young),
    ("КИСЕЛ ОТ ЯБЪЛКИ С ПРЕХОДНО МЛЯКО", Dessert, &[Milk], FoodAgeGroup::Young),
    ("ПЛОДОВА КАША ОТ ГРИС", Dessert, &[Gluten, Milk], FoodAgeGroup::Young),
];

#[derive(Clone)]
pub struct FoodCatalog {
    foods: Arc<dyn FoodStore>,
}

impl FromRef<AppState> for FoodCatalog {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.foods.clone())
    }
}

pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl FoodCatalog {
    pub fn new(foods: Arc<dyn FoodStore>) -> Self {
        Self { foods }
    }

    pub async fn add_food(
        &self,
        name: &str,
        category: Category,
        allergens: BTreeSet<Allergen>,
        age_group: FoodAgeGroup,
    ) -> Result<FoodItem, KitchenError> {
        let name = normalize_name(&require_text("food name", name)?);
        let food = FoodItem {
            name,
            category,
            allergens,
            age_group,
        };
        if !self.foods.insert_food(&food).await? {
            warn!(name = %food.name, "food item already exists");
            return Err(KitchenError::Validation(format!(
                "food item {:?} already exists",
                food.name
            )));
        }
        info!(name = %food.name, category = food.category.as_str(), "food item added");
        Ok(food)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<FoodItem>, KitchenError> {
        Ok(self.foods.find_by_name(&normalize_name(name)).await?)
    }

    /// Like [`get_by_name`](Self::get_by_name) but a missing item is an error.
    pub async fn require(&self, name: &str) -> Result<FoodItem, KitchenError> {
        self.get_by_name(name)
            .await?
            .ok_or_else(|| KitchenError::NotFound(format!("food item {:?}", normalize_name(name))))
    }

    pub async fn list_foods(&self) -> Result<Vec<FoodItem>, KitchenError> {
        Ok(self.foods.list_foods().await?)
    }

    /// Installs [`BUILTIN_FOODS`] when the catalog is empty. Returns how many
    /// items were inserted.
    pub async fn seed_catalog(&self) -> Result<usize, KitchenError> {
        if self.foods.count_foods().await? > 0 {
            return Ok(0);
        }
        let mut inserted = 0;
        for (name, category, allergens, age_group) in BUILTIN_FOODS {
            let food = FoodItem {
                name: (*name).to_string(),
                category: *category,
                allergens: allergens.iter().copied().collect(),
                age_group: *age_group,
            };
            if self.foods.insert_food(&food).await? {
                inserted += 1;
            }
        }
        info!(inserted, "food catalog seeded");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FoodCatalog {
        FoodCatalog::from_ref(&AppState::fake())
    }

    #[tokio::test]
    async fn seed_catalog_is_idempotent() {
        let catalog = catalog();
        assert_eq!(catalog.seed_catalog().await.unwrap(), BUILTIN_FOODS.len());
        assert_eq!(catalog.seed_catalog().await.unwrap(), 0);
        assert_eq!(catalog.list_foods().await.unwrap().len(), BUILTIN_FOODS.len());
    }

    #[test]
    fn builtin_names_are_unique_and_uppercase() {
        let names: BTreeSet<&str> = BUILTIN_FOODS.iter().map(|f| f.0).collect();
        assert_eq!(names.len(), BUILTIN_FOODS.len());
        assert!(BUILTIN_FOODS.iter().all(|f| f.0 == f.0.to_uppercase()));
    }

    #[tokio::test]
    async fn add_food_uppercases_and_rejects_duplicates() {
        let catalog = catalog();
        let food = catalog
            .add_food(
                "  леща с ориз ",
                Category::Main,
                [Allergen::Celery].into_iter().collect(),
                FoodAgeGroup::All,
            )
            .await
            .unwrap();
        assert_eq!(food.name, "ЛЕЩА С ОРИЗ");

        let found = catalog.get_by_name("леща с ориз").await.unwrap();
        assert_eq!(found, Some(food));

        let err = catalog
            .add_food("ЛЕЩА С ОРИЗ", Category::Main, BTreeSet::new(), FoodAgeGroup::All)
            .await
            .unwrap_err();
        assert!(matches!(err, KitchenError::Validation(_)));
    }

    #[tokio::test]
    async fn require_reports_missing_food() {
        let err = catalog().require("НЕСЪЩЕСТВУВАЩО").await.unwrap_err();
        assert!(matches!(err, KitchenError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let err = catalog()
            .add_food("  ", Category::Soup, BTreeSet::new(), FoodAgeGroup::All)
            .await
            .unwrap_err();
        assert!(matches!(err, KitchenError::Validation(_)));
    }
}
