use crate::core::{MealPlan, ScheduledMeal};
use crate::domain::ports::PlanReport;
use crate::utils::error::{PlannerError, Result};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Meal")]
    meal: &'a str,
    #[serde(rename = "Main Ingredient")]
    main_ingredient: &'a str,
    #[serde(rename = "Calories")]
    calories: u32,
    #[serde(rename = "Carbohydrates (g)")]
    carbohydrates_g: f64,
    #[serde(rename = "Protein (g)")]
    protein_g: f64,
    #[serde(rename = "Fat (g)")]
    fat_g: f64,
    #[serde(rename = "SKU")]
    sku: &'a str,
}

impl<'a> From<&'a ScheduledMeal> for ExportRow<'a> {
    fn from(scheduled: &'a ScheduledMeal) -> Self {
        Self {
            date: scheduled.slot.format(DATE_FORMAT).to_string(),
            meal: scheduled.meal.display_name(),
            main_ingredient: &scheduled.meal.main_ingredient,
            calories: scheduled.calories,
            carbohydrates_g: scheduled.carbohydrates_g,
            protein_g: scheduled.protein_g,
            fat_g: scheduled.fat_g,
            sku: &scheduled.meal.sku,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonPlan<'a> {
    meal_type: String,
    objective: String,
    frequency: String,
    start_date: String,
    end_date: String,
    total_cost: u64,
    meals: Vec<ExportRow<'a>>,
}

fn delimited(plan: &MealPlan, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for scheduled in &plan.meals {
        writer.serialize(ExportRow::from(scheduled))?;
    }

    writer
        .into_inner()
        .map_err(|e| PlannerError::export("csv", e.error()))
}

/// 依排程順序輸出 CSV
pub fn plan_to_csv(plan: &MealPlan) -> Result<Vec<u8>> {
    delimited(plan, b',')
}

pub fn plan_to_tsv(plan: &MealPlan) -> Result<Vec<u8>> {
    delimited(plan, b'\t')
}

pub fn plan_to_json(report: &PlanReport<'_>) -> Result<Vec<u8>> {
    let json = JsonPlan {
        meal_type: report.preferences.diet_type().to_string(),
        objective: report.preferences.objective().to_string(),
        frequency: report.preferences.frequency().to_string(),
        start_date: report.preferences.start_date().to_string(),
        end_date: report.preferences.end_date().to_string(),
        total_cost: report.plan.total_cost,
        meals: report.plan.meals.iter().map(ExportRow::from).collect(),
    };
    Ok(serde_json::to_vec_pretty(&json)?)
}

/// 依格式名稱輸出，回傳（檔名, 內容）
pub fn render_table(format: &str, report: &PlanReport<'_>) -> Result<(String, Vec<u8>)> {
    let data = match format {
        "csv" => plan_to_csv(report.plan)?,
        "tsv" => plan_to_tsv(report.plan)?,
        "json" => plan_to_json(report)?,
        other => {
            return Err(PlannerError::InvalidConfigValueError {
                field: "formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format".to_string(),
            })
        }
    };
    Ok((format!("meal_plan.{}", format), data))
}
