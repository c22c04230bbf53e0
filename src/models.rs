use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Age band a menu is planned for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    #[serde(alias = "YOUNG", alias = "Young")]
    Young,
    #[serde(alias = "OLD", alias = "Old")]
    Old,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 2] = [AgeGroup::Young, AgeGroup::Old];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "YOUNG",
            AgeGroup::Old => "OLD",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YOUNG" => Ok(AgeGroup::Young),
            "OLD" => Ok(AgeGroup::Old),
            other => anyhow::bail!("unknown age group {other:?}"),
        }
    }
}

/// Which age groups a food item may be served to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodAgeGroup {
    Young,
    Old,
    All,
}

impl FoodAgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodAgeGroup::Young => "YOUNG",
            FoodAgeGroup::Old => "OLD",
            FoodAgeGroup::All => "ALL",
        }
    }

    pub fn applies_to(&self, group: AgeGroup) -> bool {
        matches!(
            (self, group),
            (FoodAgeGroup::All, _)
                | (FoodAgeGroup::Young, AgeGroup::Young)
                | (FoodAgeGroup::Old, AgeGroup::Old)
        )
    }
}

impl FromStr for FoodAgeGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YOUNG" => Ok(FoodAgeGroup::Young),
            "OLD" => Ok(FoodAgeGroup::Old),
            "ALL" => Ok(FoodAgeGroup::All),
            other => anyhow::bail!("unknown food age group {other:?}"),
        }
    }
}

/// Course a food item is served as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Soup,
    Main,
    Dessert,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Soup => "SOUP",
            Category::Main => "MAIN",
            Category::Dessert => "DESSERT",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOUP" => Ok(Category::Soup),
            "MAIN" => Ok(Category::Main),
            "DESSERT" => Ok(Category::Dessert),
            other => anyhow::bail!("unknown food category {other:?}"),
        }
    }
}

/// The fourteen allergens that must be declared on school meals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Allergen {
    Gluten,
    Crustaceans,
    Eggs,
    Fish,
    Peanuts,
    Soybeans,
    Milk,
    TreeNuts,
    Celery,
    Mustard,
    SesameSeeds,
    SulphurDioxide,
    Lupin,
    Molluscs,
}

impl Allergen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Allergen::Gluten => "GLUTEN",
            Allergen::Crustaceans => "CRUSTACEANS",
            Allergen::Eggs => "EGGS",
            Allergen::Fish => "FISH",
            Allergen::Peanuts => "PEANUTS",
            Allergen::Soybeans => "SOYBEANS",
            Allergen::Milk => "MILK",
            Allergen::TreeNuts => "TREE_NUTS",
            Allergen::Celery => "CELERY",
            Allergen::Mustard => "MUSTARD",
            Allergen::SesameSeeds => "SESAME_SEEDS",
            Allergen::SulphurDioxide => "SULPHUR_DIOXIDE",
            Allergen::Lupin => "LUPIN",
            Allergen::Molluscs => "MOLLUSCS",
        }
    }
}

impl FromStr for Allergen {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let allergen = match s.trim().to_ascii_uppercase().as_str() {
            "GLUTEN" => Allergen::Gluten,
            "CRUSTACEANS" => Allergen::Crustaceans,
            "EGGS" => Allergen::Eggs,
            "FISH" => Allergen::Fish,
            "PEANUTS" => Allergen::Peanuts,
            "SOYBEANS" => Allergen::Soybeans,
            "MILK" => Allergen::Milk,
            "TREE_NUTS" => Allergen::TreeNuts,
            "CELERY" => Allergen::Celery,
            "MUSTARD" => Allergen::Mustard,
            "SESAME_SEEDS" => Allergen::SesameSeeds,
            "SULPHUR_DIOXIDE" => Allergen::SulphurDioxide,
            "LUPIN" => Allergen::Lupin,
            "MOLLUSCS" => Allergen::Molluscs,
            other => anyhow::bail!("unknown allergen {other:?}"),
        };
        Ok(allergen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_age_group_applicability() {
        assert!(FoodAgeGroup::All.applies_to(AgeGroup::Young));
        assert!(FoodAgeGroup::All.applies_to(AgeGroup::Old));
        assert!(FoodAgeGroup::Young.applies_to(AgeGroup::Young));
        assert!(!FoodAgeGroup::Young.applies_to(AgeGroup::Old));
        assert!(!FoodAgeGroup::Old.applies_to(AgeGroup::Young));
    }

    #[test]
    fn stored_names_parse_back() {
        for group in AgeGroup::ALL {
            assert_eq!(group.as_str().parse::<AgeGroup>().unwrap(), group);
        }
        assert_eq!("tree_nuts".parse::<Allergen>().unwrap(), Allergen::TreeNuts);
        assert_eq!("Dessert".parse::<Category>().unwrap(), Category::Dessert);
        assert!("teen".parse::<AgeGroup>().is_err());
    }

    #[test]
    fn age_group_serializes_lowercase() {
        let json = serde_json::to_string(&AgeGroup::Young).unwrap();
        assert_eq!(json, "\"young\"");
        let parsed: AgeGroup = serde_json::from_str("\"OLD\"").unwrap();
        assert_eq!(parsed, AgeGroup::Old);
    }
}
