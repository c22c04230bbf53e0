use std::sync::Arc;

use axum::extract::FromRef;
use time::{Date, Weekday};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dto::{FoodView, MenuView};
use super::repo::MenuStore;
use super::repo_types::DailyMenu;
use crate::calendar::{is_weekend, week_bounds};
use crate::error::KitchenError;
use crate::foods::repo_types::FoodItem;
use crate::foods::services::FoodCatalog;
use crate::models::{AgeGroup, Category};
use crate::state::AppState;

/// (soup, main, dessert) for Monday..Friday of a seeded week.
type WeekPlan = [(&'static str, &'static str, &'static str); 5];

const WEEK_PLAN: [(AgeGroup, WeekPlan); 2] = [
    (
        AgeGroup::Young,
        [
            ("СУПА С ПУЕШКО МЕСО", "ЗЕЛЕНЧУКОВО ПЮРЕ С ИЗВАРА", "КИСЕЛ ОТ СЕЗОНЕН ПЛОД С ПРЕХОДНО МЛЯКО"),
            ("СУПА ОТ КАРТОФИ И МОРКОВИ", "ПЮРЕ ОТ РИБА И ЗЕЛЕНЧУЦИ", "ОРИЗ С ПЪПЕШ"),
            ("СУПА ОТ ТИКВИЧКИ СЪС ЗАСТРОЙКА", "ПЮРЕ ОТ ТЕЛЕШКО С ГРАХ", "ПЛОДОВО ПЮРЕ С ИЗВАРА"),
            ("СУПА ОТ ДОМАТИ С КАРТОФИ", "ПЮРЕ ОТ ПИЛЕШКО СЪС ЗЕЛЕНЧУЦИ", "КИСЕЛ ОТ ЯБЪЛКИ С ПРЕХОДНО МЛЯКО"),
            ("СУПА ОТ ЗЕЛЕН ФАСУЛ СЪС ЗАСТРОЙКА", "ПЮРЕ КУС-КУС СЪС ЗАЕШКО МЕСО И ЗЕЛЕНЧУЦИ", "ПЛОДОВА КАША ОТ ГРИС"),
        ],
    ),
    (
        AgeGroup::Old,
        [
            ("СУПА С ПУЕШКО МЕСО", "ТИКВИЧКИ С ОРИЗ", "МЛЕЧЕН КИСЕЛ ОТ НЕКТАРИНИ"),
            ("СУПА ОТ КАРТОФИ И МОРКОВИ", "КЮФТЕ ОТ РИБА/ ГАРНИТУРА – ПЮРЕ ОТ ЛЕЩА", "КУС-КУС С МЛЯКО И ЯЙЦА"),
            ("СУПА ОТ ТИКВИЧКИ СЪС ЗАСТРОЙКА", "КЮФТЕТА С БЯЛ СОС", "МЛЯКО С ОРИЗ"),
            ("СУПА ОТ ДОМАТИ С КАРТОФИ", "ПИЛЕШКО МЕСО С КАРТОФИ", "ПШЕНИЦА С МЛЯКО"),
            ("СУПА ОТ ЗЕЛЕН ФАСУЛ СЪС ЗАСТРОЙКА", "ПИЛЕШКО МЕСО С КАРТОФИ", "МЛЕЧЕН КИСЕЛ ОТ ПЪПЕШ"),
        ],
    ),
];

const DAY_LABELS: [(Weekday, &str); 5] = [
    (Weekday::Monday, "Понеделник"),
    (Weekday::Tuesday, "Вторник"),
    (Weekday::Wednesday, "Сряда"),
    (Weekday::Thursday, "Четвъртък"),
    (Weekday::Friday, "Петък"),
];

#[derive(Clone)]
pub struct MenuCatalog {
    menus: Arc<dyn MenuStore>,
    foods: FoodCatalog,
}

impl FromRef<AppState> for MenuCatalog {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.menus.clone(), FoodCatalog::from_ref(state))
    }
}

impl MenuCatalog {
    pub fn new(menus: Arc<dyn MenuStore>, foods: FoodCatalog) -> Self {
        Self { menus, foods }
    }

    /// Generates both age groups' menus for the business week containing
    /// `reference`. Does nothing if any menu exists yet.
    pub async fn seed_week(&self, reference: Date) -> Result<usize, KitchenError> {
        if self.menus.count_menus().await? > 0 {
            debug!(%reference, "menus already present; skipping weekly seed");
            return Ok(0);
        }

        let week = week_bounds(reference)?;
        let mut menus = Vec::with_capacity(WEEK_PLAN.len() * 5);
        for (age_group, plan) in &WEEK_PLAN {
            for (date, (soup, main, dessert)) in week.days().zip(plan.iter()) {
                menus.push(DailyMenu {
                    id: Uuid::new_v4(),
                    date,
                    age_group: *age_group,
                    soup: self.foods.require(soup).await?,
                    main: self.foods.require(main).await?,
                    dessert: self.foods.require(dessert).await?,
                });
            }
        }

        let created = self.menus.insert_menus(&menus).await? as usize;
        info!(monday = %week.monday, friday = %week.friday, created, "weekly menus seeded");
        Ok(created)
    }

    pub async fn weekly_menu(&self, now: Date) -> Result<Vec<MenuView>, KitchenError> {
        let week = week_bounds(now)?;
        let menus = self.menus.list_between(week.monday, week.friday).await?;
        if menus.is_empty() {
            return Err(KitchenError::NotFound(format!(
                "menu for the week {}..{}",
                week.monday, week.friday
            )));
        }
        Ok(menus.iter().map(to_presentation_view).collect())
    }

    pub async fn get_menu(&self, date: Date, age_group: AgeGroup) -> Result<DailyMenu, KitchenError> {
        self.menus
            .find_menu(date, age_group)
            .await?
            .ok_or_else(|| {
                KitchenError::NotFound(format!("menu for {date} ({})", age_group.as_str()))
            })
    }

    pub async fn menus_for_date(&self, date: Date) -> Result<Vec<MenuView>, KitchenError> {
        let menus = self.menus.list_between(date, date).await?;
        if menus.is_empty() {
            return Err(KitchenError::NotFound(format!("menu for {date}")));
        }
        Ok(menus.iter().map(to_presentation_view).collect())
    }

    pub async fn add_menu(
        &self,
        date: Date,
        age_group: AgeGroup,
        soup: &str,
        main: &str,
        dessert: &str,
    ) -> Result<DailyMenu, KitchenError> {
        if is_weekend(date) {
            return Err(KitchenError::Validation(format!(
                "{date} is a {}; menus are planned for weekdays only",
                date.weekday()
            )));
        }

        let menu = DailyMenu {
            id: Uuid::new_v4(),
            date,
            age_group,
            soup: self.course(soup, Category::Soup, age_group).await?,
            main: self.course(main, Category::Main, age_group).await?,
            dessert: self.course(dessert, Category::Dessert, age_group).await?,
        };

        if self.menus.insert_menus(std::slice::from_ref(&menu)).await? == 0 {
            warn!(%date, age_group = age_group.as_str(), "menu already exists");
            return Err(KitchenError::Validation(format!(
                "a menu for {date} ({}) already exists",
                age_group.as_str()
            )));
        }
        info!(%date, age_group = age_group.as_str(), "menu added");
        Ok(menu)
    }

    /// Retention sweep: drops every menu dated before `today`.
    pub async fn purge_expired(&self, today: Date) -> Result<u64, KitchenError> {
        let deleted = self.menus.delete_before(today).await?;
        info!(%today, deleted, "expired menus purged");
        Ok(deleted)
    }

    async fn course(
        &self,
        name: &str,
        category: Category,
        age_group: AgeGroup,
    ) -> Result<FoodItem, KitchenError> {
        let food = self.foods.require(name).await?;
        if food.category != category {
            return Err(KitchenError::Validation(format!(
                "{:?} is a {} dish, not a {}",
                food.name,
                food.category.as_str(),
                category.as_str()
            )));
        }
        if !food.age_group.applies_to(age_group) {
            return Err(KitchenError::Validation(format!(
                "{:?} is not served to the {} group",
                food.name,
                age_group.as_str()
            )));
        }
        Ok(food)
    }
}

fn day_label(date: Date) -> Option<&'static str> {
    let weekday = date.weekday();
    DAY_LABELS
        .iter()
        .find(|(day, _)| *day == weekday)
        .map(|(_, label)| *label)
}

fn food_view(food: &FoodItem) -> FoodView {
    FoodView {
        name: food.name.clone(),
        category_name: food.category.as_str().to_string(),
        age_group_name: food.age_group.as_str().to_string(),
        allergens: food
            .allergens
            .iter()
            .map(|a| a.as_str().to_lowercase().replace('_', " "))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn to_presentation_view(menu: &DailyMenu) -> MenuView {
    MenuView {
        date: menu.date,
        day_of_week: day_label(menu.date).map(str::to_string),
        age_group_name: menu.age_group.as_str().to_string(),
        soup: food_view(&menu.soup),
        main: food_view(&menu.main),
        dessert: food_view(&menu.dessert),
    }
}
