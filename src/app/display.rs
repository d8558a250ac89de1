use crate::domain::model::{CustomerPreferences, MealPlan, PlanWarning};
use chrono::NaiveDate;
use crossterm::style::{style, Color, Stylize};
use std::fmt::Write;

/// 終端機上色能力；關閉時輸出純文字
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn ok(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    pub fn highlight(&self, text: &str) -> String {
        self.paint(text, Color::Cyan)
    }

    pub fn name(&self, text: &str) -> String {
        self.paint(text, Color::Blue)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    pub fn fail(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey)
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// 例如 "March 2, 2026"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn render_preferences(palette: &Palette, preferences: &CustomerPreferences) -> String {
    let allergies = if preferences.allergens().is_empty() {
        "None".to_string()
    } else {
        preferences.allergen_labels()
    };

    let rows = [
        ("Starting date:", long_date(preferences.start_date())),
        ("Ending date:", long_date(preferences.end_date())),
        ("Meal type:", preferences.diet_type().to_string()),
        ("Objective:", preferences.objective().to_string()),
        ("Frequency:", preferences.frequency().to_string()),
        ("Allergies:", allergies),
    ];

    let mut out = String::from("\n\n\tSUMMARY OF PREFERENCES\n");
    for (label, value) in rows {
        let _ = writeln!(out, "\t{}\t{}", label, palette.ok(&value));
    }
    out.push('\n');
    out
}

pub fn render_plan(palette: &Palette, preferences: &CustomerPreferences, plan: &MealPlan) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", palette.bold("YOUR MEAL PLAN"));
    let _ = writeln!(out, "Meal Type:\t{}", palette.highlight(&preferences.diet_type().to_string()));
    let _ = writeln!(out, "Objective:\t{}", palette.highlight(&preferences.objective().to_string()));
    let _ = writeln!(out, "Frequency:\t{}", palette.highlight(&preferences.frequency().to_string()));
    let _ = writeln!(
        out,
        "Date Covered:\t{}",
        palette.highlight(&format!(
            "{} - {}",
            long_date(preferences.start_date()),
            long_date(preferences.end_date())
        ))
    );
    let _ = writeln!(
        out,
        "Total Costs:\t{}",
        palette.highlight(&format!("Php {:.2}", plan.total_cost as f64))
    );
    out.push('\n');

    for (date, meals) in plan.days() {
        let _ = writeln!(out, "{}", palette.highlight(&long_date(date)));
        for scheduled in meals {
            let _ = writeln!(
                out,
                "\t{} ({})",
                palette.ok(scheduled.meal.display_name()),
                scheduled.meal.main_ingredient
            );
            let _ = writeln!(
                out,
                "\t  {}",
                palette.muted(&format!(
                    "{:.1} calories | {:.1}g of carbs | {:.1}g of protein | {:.1}g of fat |",
                    scheduled.calories as f64,
                    scheduled.carbohydrates_g,
                    scheduled.protein_g,
                    scheduled.fat_g
                ))
            );
        }
    }

    out
}

pub fn render_warnings(palette: &Palette, plan: &MealPlan) -> Option<String> {
    let lines: Vec<String> = plan
        .warnings
        .iter()
        .map(|warning| match warning {
            PlanWarning::DuplicateMeals { count } => palette.warning(&format!(
                "WARNING: Some meals are repeated. {} total.",
                count
            )),
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::macros::schedule_meal;
    use crate::domain::model::{DietType, MealCatalogEntry, MealFrequency, Objective};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn preferences() -> CustomerPreferences {
        CustomerPreferences::new(
            DietType::Organic,
            Objective::Maintain,
            MealFrequency::TwoMealsADay,
            [],
            date(2026, 3, 2),
            date(2026, 3, 9),
        )
        .unwrap()
    }

    fn plan() -> MealPlan {
        let entry = MealCatalogEntry {
            sku: "OR-7".to_string(),
            diet_type: DietType::Organic,
            name: "Herb Salmon".to_string(),
            main_ingredient: "Seafood".to_string(),
            carbohydrate_pct: 20.0,
            protein_pct: 40.0,
            fat_pct: 40.0,
        };
        let meals = vec![
            schedule_meal(date(2026, 3, 2).and_hms_opt(11, 0, 0).unwrap(), &entry, 600),
            schedule_meal(date(2026, 3, 2).and_hms_opt(18, 0, 0).unwrap(), &entry, 650),
            schedule_meal(date(2026, 3, 3).and_hms_opt(11, 0, 0).unwrap(), &entry, 610),
        ];
        MealPlan {
            meals,
            total_cost: 2400,
            warnings: vec![PlanWarning::DuplicateMeals { count: 2 }],
        }
    }

    #[test]
    fn test_plain_palette_does_not_emit_escape_codes() {
        let palette = Palette::plain();
        assert_eq!(palette.ok("Keto"), "Keto");
        let colored = Palette::new(true).ok("Keto");
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains("Keto"));
    }

    #[test]
    fn test_long_date_format() {
        assert_eq!(long_date(date(2026, 3, 2)), "March 2, 2026");
    }

    #[test]
    fn test_render_preferences_lists_all_fields() {
        let text = render_preferences(&Palette::plain(), &preferences());
        assert!(text.contains("Starting date:\tMarch 2, 2026"));
        assert!(text.contains("Ending date:\tMarch 9, 2026"));
        assert!(text.contains("Meal type:\tOrganic"));
        assert!(text.contains("Frequency:\tTwo Meals A Day"));
        assert!(text.contains("Allergies:\tNone"));
    }

    #[test]
    fn test_render_plan_groups_by_date() {
        let text = render_plan(&Palette::plain(), &preferences(), &plan());
        assert!(text.contains("Total Costs:\tPhp 2400.00"));
        assert_eq!(text.matches("March 2, 2026").count(), 2);
        assert_eq!(text.matches("Herb Salmon (Seafood)").count(), 3);
        assert!(text.contains("600.0 calories | 15.6g of carbs | 31.1g of protein | 31.1g of fat |"));
    }

    #[test]
    fn test_render_warnings() {
        let text = render_warnings(&Palette::plain(), &plan()).unwrap();
        assert_eq!(text, "WARNING: Some meals are repeated. 2 total.");
    }
}
