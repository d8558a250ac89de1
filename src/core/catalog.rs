use crate::domain::model::{DietType, MealCatalogEntry};
use crate::utils::error::{PlannerError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Type")]
    diet_type: String,
    #[serde(rename = "Meal", default)]
    name: String,
    #[serde(rename = "Main Ingredient")]
    main_ingredient: String,
    #[serde(rename = "SKU")]
    sku: String,
    #[serde(rename = "Carbohydrate (%)")]
    carbohydrate_pct: f64,
    #[serde(rename = "Protein (%)")]
    protein_pct: f64,
    #[serde(rename = "Fat (%)")]
    fat_pct: f64,
}

/// 餐點資料集；載入後唯讀
#[derive(Debug, Clone)]
pub struct MealCatalog {
    entries: Vec<MealCatalogEntry>,
}

impl MealCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| PlannerError::CatalogError {
            message: format!("cannot open {}: {}", path.display(), e),
        })?;
        let catalog = Self::from_reader(file)?;
        tracing::info!("📚 Loaded {} meals from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        let mut seen_skus = HashSet::new();

        for (index, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // 第 1 行為標題
            let line = index + 2;
            let row = row.map_err(|e| PlannerError::CatalogError {
                message: format!("row {}: {}", line, e),
            })?;
            let entry = Self::parse_row(row, line)?;

            if !seen_skus.insert(entry.sku.clone()) {
                return Err(PlannerError::CatalogError {
                    message: format!("row {}: duplicate SKU '{}'", line, entry.sku),
                });
            }
            entries.push(entry);
        }

        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<MealCatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(PlannerError::CatalogError {
                message: "raw dataset is empty".to_string(),
            });
        }
        Ok(Self { entries })
    }

    fn parse_row(row: CatalogRow, line: usize) -> Result<MealCatalogEntry> {
        let diet_type = DietType::from_str(&row.diet_type).map_err(|_| PlannerError::CatalogError {
            message: format!("row {}: unknown meal type '{}'", line, row.diet_type),
        })?;

        if row.sku.is_empty() {
            return Err(PlannerError::CatalogError {
                message: format!("row {}: SKU is empty", line),
            });
        }

        for (column, value) in [
            ("Carbohydrate (%)", row.carbohydrate_pct),
            ("Protein (%)", row.protein_pct),
            ("Fat (%)", row.fat_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::CatalogError {
                    message: format!("row {}: {} must be a non-negative number, got {}", line, column, value),
                });
            }
        }

        Ok(MealCatalogEntry {
            sku: row.sku,
            diet_type,
            name: row.name,
            main_ingredient: row.main_ingredient,
            carbohydrate_pct: row.carbohydrate_pct,
            protein_pct: row.protein_pct,
            fat_pct: row.fat_pct,
        })
    }

    pub fn entries(&self) -> &[MealCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Type,Meal,Main Ingredient,SKU,Carbohydrate (%),Protein (%),Fat (%)\n";

    #[test]
    fn test_load_catalog_from_csv() {
        let data = format!(
            "{}Keto,Steak Bowl,Beef,KT-01,5,35,60\nVegetarian,Tofu Stir Fry,Tofu,VG-01,50,25,25\n",
            HEADER
        );
        let catalog = MealCatalog::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].diet_type, DietType::Keto);
        assert_eq!(catalog.entries()[1].diet_type, DietType::Vegan);
        assert_eq!(catalog.entries()[1].name, "Tofu Stir Fry");
        assert_eq!(catalog.entries()[0].fat_pct, 60.0);
    }

    #[test]
    fn test_meal_column_is_optional() {
        let data = "Type,Main Ingredient,SKU,Carbohydrate (%),Protein (%),Fat (%)\nOrganic,Chicken,OR-01,40,35,25\n";
        let catalog = MealCatalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.entries()[0].display_name(), "OR-01");
    }

    #[test]
    fn test_empty_catalog_is_configuration_error() {
        let err = MealCatalog::from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::CatalogError { .. }));
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let data = "Type,Main Ingredient,SKU\nKeto,Beef,KT-01\n";
        assert!(MealCatalog::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_type_reports_row() {
        let data = format!("{}Paleo,Bison Burger,Bison,PL-01,10,40,50\n", HEADER);
        let err = MealCatalog::from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
        assert!(err.to_string().contains("Paleo"));
    }

    #[test]
    fn test_duplicate_sku_is_rejected() {
        let data = format!(
            "{}Keto,A,Beef,KT-01,5,35,60\nKeto,B,Pork,KT-01,5,35,60\n",
            HEADER
        );
        let err = MealCatalog::from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate SKU"));
    }

    #[test]
    fn test_negative_percentage_is_rejected() {
        let data = format!("{}Keto,A,Beef,KT-01,-5,35,60\n", HEADER);
        assert!(MealCatalog::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_is_catalog_error() {
        let err = MealCatalog::from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, PlannerError::CatalogError { .. }));
    }
}
