use crate::domain::model::{MealCatalogEntry, Objective, ScheduledMeal, GRAMS_PER_CALORIE_PERCENT};
use chrono::NaiveDateTime;
use rand::Rng;
use std::ops::Range;

/// 單餐熱量抽樣區間：每日區間的三分之一，上界不含
pub fn per_meal_calorie_range(objective: Objective) -> Range<u32> {
    let (min_per_day, max_per_day) = objective.calorie_band();
    (min_per_day / 3)..(max_per_day / 3)
}

pub fn macro_grams(calories: u32, percentage: f64) -> f64 {
    calories as f64 * (percentage / 100.0) * GRAMS_PER_CALORIE_PERCENT
}

pub fn schedule_meal(slot: NaiveDateTime, meal: &MealCatalogEntry, calories: u32) -> ScheduledMeal {
    ScheduledMeal {
        slot,
        meal: meal.clone(),
        calories,
        carbohydrates_g: macro_grams(calories, meal.carbohydrate_pct),
        protein_g: macro_grams(calories, meal.protein_pct),
        fat_g: macro_grams(calories, meal.fat_pct),
    }
}

/// 逐日處理已排程的餐點，每餐獨立抽取熱量。
/// 注意：不論一天幾餐，每餐都抽約三分之一日區間，並非將日總量分攤。
pub fn allocate<R: Rng>(
    objective: Objective,
    draws: &[(NaiveDateTime, &MealCatalogEntry)],
    rng: &mut R,
) -> Vec<ScheduledMeal> {
    let range = per_meal_calorie_range(objective);
    let mut meals = Vec::with_capacity(draws.len());

    for day in draws.chunk_by(|a, b| a.0.date() == b.0.date()) {
        let before = meals.len();
        for (slot, meal) in day {
            let calories = rng.random_range(range.clone());
            meals.push(schedule_meal(*slot, meal, calories));
        }

        let day_total: u32 = meals[before..].iter().map(|m| m.calories).sum();
        tracing::debug!(
            "{}: {} meals, {} kcal ({})",
            day[0].0.date(),
            day.len(),
            day_total,
            objective
        );
    }

    meals
}
