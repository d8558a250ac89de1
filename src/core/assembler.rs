use crate::core::catalog::MealCatalog;
use crate::core::{filter, macros, sampler, schedule};
use crate::domain::model::{CustomerPreferences, MealPlan, PlanWarning};
use crate::utils::error::{PlannerError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 有設定 seed 時產生可重現的計畫，否則使用系統亂數
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

pub struct PlanAssembler {
    catalog: MealCatalog,
}

impl PlanAssembler {
    pub fn new(catalog: MealCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MealCatalog {
        &self.catalog
    }

    /// 篩選 → 排程 → 抽樣 → 配置熱量 → 計算費用
    pub fn assemble<R: Rng>(&self, preferences: &CustomerPreferences, rng: &mut R) -> Result<MealPlan> {
        let candidates = filter::filter_catalog(
            self.catalog.entries(),
            preferences.diet_type(),
            preferences.allergens(),
        );

        let slots = schedule::build_schedule(
            preferences.start_date(),
            preferences.end_date(),
            preferences.frequency(),
        );
        if slots.is_empty() {
            return Err(PlannerError::InvalidPreferences {
                message: format!(
                    "no business days between {} and {}",
                    preferences.start_date(),
                    preferences.end_date()
                ),
            });
        }

        let draws = sampler::sample_meals(&candidates, &slots, rng).ok_or_else(|| {
            tracing::warn!(
                "❌ No {} meals available after allergen filtering",
                preferences.diet_type()
            );
            PlannerError::ConstraintExhaustion {
                diet_type: preferences.diet_type().to_string(),
                allergens: preferences.allergen_labels(),
            }
        })?;

        let meals = macros::allocate(preferences.objective(), &draws, rng);
        let total_cost = meals.len() as u64 * u64::from(preferences.diet_type().price_per_meal());

        let mut plan = MealPlan {
            meals,
            total_cost,
            warnings: Vec::new(),
        };

        let duplicates = plan.duplicate_count();
        if duplicates > 0 {
            tracing::warn!("⚠️ Some meals are repeated: {} total", duplicates);
            plan.warnings.push(PlanWarning::DuplicateMeals { count: duplicates });
        }

        tracing::info!(
            "✅ Assembled {} meals from {} candidates, total cost Php {}",
            plan.len(),
            candidates.len(),
            plan.total_cost
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Allergen, DietType, MealCatalogEntry, MealFrequency, Objective};
    use chrono::NaiveDate;

    fn entry(sku: &str, diet_type: DietType, ingredient: &str) -> MealCatalogEntry {
        MealCatalogEntry {
            sku: sku.to_string(),
            diet_type,
            name: format!("{} special", ingredient),
            main_ingredient: ingredient.to_string(),
            carbohydrate_pct: 30.0,
            protein_pct: 40.0,
            fat_pct: 30.0,
        }
    }

    fn assembler() -> PlanAssembler {
        let catalog = MealCatalog::from_entries(vec![
            entry("KT-1", DietType::Keto, "Beef"),
            entry("KT-2", DietType::Keto, "Pork"),
            entry("KT-3", DietType::Keto, "Seafood"),
            entry("VG-1", DietType::Vegan, "Tofu"),
            entry("VG-2", DietType::Vegan, "Chickpeas"),
        ])
        .unwrap();
        PlanAssembler::new(catalog)
    }

    fn prefs(diet_type: DietType, allergens: Vec<Allergen>) -> CustomerPreferences {
        CustomerPreferences::new(
            diet_type,
            Objective::WeightLoss,
            MealFrequency::TwoMealsADay,
            allergens,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_total_cost_is_price_times_meals() {
        let plan = assembler()
            .assemble(&prefs(DietType::Keto, vec![]), &mut rng_from_seed(Some(9)))
            .unwrap();
        // 11 個工作日 x 2 餐
        assert_eq!(plan.len(), 22);
        assert_eq!(plan.total_cost, 22 * 1000);
    }

    #[test]
    fn test_plan_respects_diet_and_allergens() {
        let plan = assembler()
            .assemble(
                &prefs(DietType::Keto, vec![Allergen::Meat]),
                &mut rng_from_seed(Some(1)),
            )
            .unwrap();
        assert!(plan
            .meals
            .iter()
            .all(|m| m.meal.diet_type == DietType::Keto && m.meal.main_ingredient == "Seafood"));
        // 只剩一道菜，必然重複
        assert_eq!(
            plan.warnings,
            vec![PlanWarning::DuplicateMeals { count: plan.len() - 1 }]
        );
    }

    #[test]
    fn test_exhausted_constraints_produce_no_plan() {
        let result = assembler().assemble(
            &prefs(DietType::Organic, vec![]),
            &mut rng_from_seed(Some(1)),
        );
        assert!(matches!(result, Err(PlannerError::ConstraintExhaustion { .. })));
    }

    #[test]
    fn test_weekend_only_range_is_rejected() {
        let prefs = CustomerPreferences::new(
            DietType::Vegan,
            Objective::Maintain,
            MealFrequency::OneMealADay,
            [],
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
        )
        .unwrap();
        let result = assembler().assemble(&prefs, &mut rng_from_seed(Some(1)));
        assert!(matches!(result, Err(PlannerError::InvalidPreferences { .. })));
    }

    #[test]
    fn test_seeded_plans_are_reproducible() {
        let a = assembler()
            .assemble(&prefs(DietType::Vegan, vec![]), &mut rng_from_seed(Some(5)))
            .unwrap();
        let b = assembler()
            .assemble(&prefs(DietType::Vegan, vec![]), &mut rng_from_seed(Some(5)))
            .unwrap();
        assert_eq!(a, b);
    }
}
