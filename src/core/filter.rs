use crate::domain::model::{Allergen, DietType, MealCatalogEntry};
use std::collections::BTreeSet;

/// 依餐點類型篩選，並排除過敏原主食材
pub fn filter_catalog<'a>(
    catalog: &'a [MealCatalogEntry],
    diet_type: DietType,
    allergens: &BTreeSet<Allergen>,
) -> Vec<&'a MealCatalogEntry> {
    let meals: Vec<&MealCatalogEntry> = catalog
        .iter()
        .filter(|entry| entry.diet_type == diet_type)
        .filter(|entry| {
            !allergens
                .iter()
                .any(|allergen| allergen.excludes(&entry.main_ingredient))
        })
        .collect();

    tracing::debug!(
        "Filtered catalog: {} of {} meals match {} without [{}]",
        meals.len(),
        catalog.len(),
        diet_type,
        allergens
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    meals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sku: &str, diet_type: DietType, ingredient: &str) -> MealCatalogEntry {
        MealCatalogEntry {
            sku: sku.to_string(),
            diet_type,
            name: format!("{} meal", ingredient),
            main_ingredient: ingredient.to_string(),
            carbohydrate_pct: 40.0,
            protein_pct: 30.0,
            fat_pct: 30.0,
        }
    }

    fn sample_catalog() -> Vec<MealCatalogEntry> {
        vec![
            entry("OR-1", DietType::Organic, "Chicken"),
            entry("OR-2", DietType::Organic, "Beef"),
            entry("OR-3", DietType::Organic, "Pork"),
            entry("OR-4", DietType::Organic, "Seafood"),
            entry("OR-5", DietType::Organic, "Lentils"),
            entry("KT-1", DietType::Keto, "Beef"),
            entry("VG-1", DietType::Vegan, "Tofu"),
        ]
    }

    #[test]
    fn test_filters_by_diet_type_only() {
        let catalog = sample_catalog();
        let meals = filter_catalog(&catalog, DietType::Organic, &BTreeSet::new());
        assert_eq!(meals.len(), 5);
        assert!(meals.iter().all(|m| m.diet_type == DietType::Organic));
    }

    #[test]
    fn test_meat_removes_chicken_beef_and_pork() {
        let catalog = sample_catalog();
        let allergens = BTreeSet::from([Allergen::Meat]);
        let meals = filter_catalog(&catalog, DietType::Organic, &allergens);
        let skus: Vec<&str> = meals.iter().map(|m| m.sku.as_str()).collect();
        assert_eq!(skus, vec!["OR-4", "OR-5"]);
    }

    #[test]
    fn test_specific_allergens_remove_exact_ingredient() {
        let catalog = sample_catalog();
        let allergens = BTreeSet::from([Allergen::Seafood, Allergen::Chicken]);
        let meals = filter_catalog(&catalog, DietType::Organic, &allergens);
        assert!(meals
            .iter()
            .all(|m| m.main_ingredient != "Seafood" && m.main_ingredient != "Chicken"));
        assert_eq!(meals.len(), 3);
    }

    #[test]
    fn test_vegan_with_meat_allergy_is_unchanged() {
        let catalog = sample_catalog();
        let allergens = BTreeSet::from([Allergen::Meat]);
        let meals = filter_catalog(&catalog, DietType::Vegan, &allergens);
        assert_eq!(meals.len(), 1);
    }

    #[test]
    fn test_can_exhaust_catalog() {
        let catalog = sample_catalog();
        let allergens = BTreeSet::from([Allergen::Beef]);
        assert!(filter_catalog(&catalog, DietType::Keto, &allergens).is_empty());
    }
}
