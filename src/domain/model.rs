use crate::utils::error::{PlannerError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use strum::{Display, EnumString, VariantArray};

/// 熱量換算成克數的校正係數，沿用資料集的慣例
pub const GRAMS_PER_CALORIE_PERCENT: f64 = 0.129598;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum DietType {
    #[strum(to_string = "Keto")]
    Keto,
    #[strum(to_string = "Organic")]
    Organic,
    #[strum(to_string = "Non-Organic", serialize = "NonOrganic")]
    NonOrganic,
    #[strum(to_string = "Vegan", serialize = "Vegetarian")]
    Vegan,
}

impl DietType {
    /// 每餐價格（Php）
    pub fn price_per_meal(self) -> u32 {
        match self {
            DietType::Vegan => 500,
            DietType::Organic => 800,
            DietType::NonOrganic => 600,
            DietType::Keto => 1000,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Objective {
    #[strum(to_string = "Weight Loss")]
    WeightLoss,
    #[strum(to_string = "Muscle Gain")]
    MuscleGain,
    #[strum(to_string = "Maintain")]
    Maintain,
}

impl Objective {
    /// 每日熱量區間（含上下界，kcal）
    pub fn calorie_band(self) -> (u32, u32) {
        match self {
            Objective::WeightLoss => (1500, 1800),
            Objective::MuscleGain => (2000, 2300),
            Objective::Maintain => (1800, 2000),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum MealFrequency {
    #[strum(to_string = "One Meal A Day")]
    OneMealADay,
    #[strum(to_string = "Two Meals A Day")]
    TwoMealsADay,
    #[strum(to_string = "Three Meals A Day")]
    ThreeMealsADay,
}

impl MealFrequency {
    /// 每日用餐時段，依時間遞增
    pub fn slot_times(self) -> Vec<NaiveTime> {
        let hours: &[u32] = match self {
            MealFrequency::OneMealADay => &[17],
            MealFrequency::TwoMealsADay => &[11, 18],
            MealFrequency::ThreeMealsADay => &[8, 12, 19],
        };
        hours
            .iter()
            .filter_map(|&h| NaiveTime::from_hms_opt(h, 0, 0))
            .collect()
    }

    pub fn meals_per_day(self) -> usize {
        match self {
            MealFrequency::OneMealADay => 1,
            MealFrequency::TwoMealsADay => 2,
            MealFrequency::ThreeMealsADay => 3,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Allergen {
    Chicken,
    Beef,
    Pork,
    Seafood,
    Meat,
}

impl Allergen {
    const MEAT_INGREDIENTS: [&'static str; 3] = ["Chicken", "Beef", "Pork"];

    /// 判斷主食材是否被此過敏原排除；Meat 為雞、牛、豬的總類
    pub fn excludes(self, main_ingredient: &str) -> bool {
        match self {
            Allergen::Meat => Self::MEAT_INGREDIENTS.contains(&main_ingredient),
            other => main_ingredient == other.to_string(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

impl CustomerProfile {
    pub const MINIMUM_AGE: u32 = 18;

    pub fn is_adult(&self) -> bool {
        self.age >= Self::MINIMUM_AGE
    }
}

/// 已確認的顧客偏好；建立後不可變
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerPreferences {
    diet_type: DietType,
    objective: Objective,
    frequency: MealFrequency,
    allergens: BTreeSet<Allergen>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl CustomerPreferences {
    pub fn new(
        diet_type: DietType,
        objective: Objective,
        frequency: MealFrequency,
        allergens: impl IntoIterator<Item = Allergen>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        if end_date <= start_date {
            return Err(PlannerError::InvalidPreferences {
                message: format!(
                    "ending date {} must be after starting date {}",
                    end_date, start_date
                ),
            });
        }

        Ok(Self {
            diet_type,
            objective,
            frequency,
            allergens: allergens.into_iter().collect(),
            start_date,
            end_date,
        })
    }

    pub fn diet_type(&self) -> DietType {
        self.diet_type
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn frequency(&self) -> MealFrequency {
        self.frequency
    }

    pub fn allergens(&self) -> &BTreeSet<Allergen> {
        &self.allergens
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn allergen_labels(&self) -> String {
        self.allergens
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealCatalogEntry {
    pub sku: String,
    pub diet_type: DietType,
    pub name: String,
    pub main_ingredient: String,
    pub carbohydrate_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
}

impl MealCatalogEntry {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.sku
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledMeal {
    pub slot: NaiveDateTime,
    pub meal: MealCatalogEntry,
    pub calories: u32,
    pub carbohydrates_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

impl ScheduledMeal {
    pub fn date(&self) -> NaiveDate {
        self.slot.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlanWarning {
    DuplicateMeals { count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    pub meals: Vec<ScheduledMeal>,
    pub total_cost: u64,
    pub warnings: Vec<PlanWarning>,
}

impl MealPlan {
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// 依日期分組，保持排程順序
    pub fn days(&self) -> Vec<(NaiveDate, &[ScheduledMeal])> {
        let mut days = Vec::new();
        let mut start = 0;
        for i in 1..=self.meals.len() {
            if i == self.meals.len() || self.meals[i].date() != self.meals[start].date() {
                days.push((self.meals[start].date(), &self.meals[start..i]));
                start = i;
            }
        }
        days
    }

    /// 重複出現的 SKU 數量（總筆數減去不重複筆數）
    pub fn duplicate_count(&self) -> usize {
        let unique: HashSet<&str> = self.meals.iter().map(|m| m.meal.sku.as_str()).collect();
        self.meals.len() - unique.len()
    }
}
