use anyhow::Result;
use chrono::NaiveDate;
use meal_planner::domain::model::{Allergen, DietType, MealFrequency, Objective};
use meal_planner::{
    ExportSettings, LocalStorage, MealCatalog, Palette, PlanAssembler, PlanExporter, Session,
    SessionOutcome, TerminalQuestionnaire,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{Cursor, Write};
use tempfile::{NamedTempFile, TempDir};

type ScriptedQuestionnaire = TerminalQuestionnaire<Cursor<Vec<u8>>, Vec<u8>>;

fn questionnaire(script: &str) -> ScriptedQuestionnaire {
    TerminalQuestionnaire::new(
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
        Palette::plain(),
        // 星期二
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
    )
}

fn shipped_assembler() -> Result<PlanAssembler> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/datasets/meal_dataset.csv");
    Ok(PlanAssembler::new(MealCatalog::from_path(path)?))
}

fn exporter(dir: &TempDir, settings: ExportSettings) -> PlanExporter<LocalStorage> {
    PlanExporter::new(LocalStorage::new(dir.path().display().to_string()), settings)
}

fn default_exporter(dir: &TempDir) -> PlanExporter<LocalStorage> {
    exporter(dir, ExportSettings::default())
}

fn run_session(
    assembler: &PlanAssembler,
    exporter: PlanExporter<LocalStorage>,
    script: &str,
) -> Result<(SessionOutcome, String)> {
    let mut session = Session::new(
        questionnaire(script),
        assembler,
        exporter,
        Palette::plain(),
        StdRng::seed_from_u64(21),
    );
    let outcome = session.run()?;
    let transcript = String::from_utf8(session.into_questionnaire().into_output())?;
    Ok((outcome, transcript))
}

#[test]
fn test_full_session_writes_plan() -> Result<()> {
    let assembler = shipped_assembler()?;
    let output = TempDir::new()?;
    // 名字、年齡、性別、目標、類型、月份、日期、期間、頻率、過敏、不修改、不產生 PDF
    let script = "Ana\n30\n2\n2\n4\n3\n16\n1\n3\n5\n2\n2\n";

    let (outcome, transcript) = run_session(&assembler, default_exporter(&output), script)?;

    let (profile, preferences, plan, exports) = match outcome {
        SessionOutcome::Completed {
            profile,
            preferences,
            plan,
            exports,
        } => (profile, preferences, plan, exports),
        other => panic!("expected a completed session, got {:?}", other),
    };

    assert_eq!(profile.name, "Ana");
    assert_eq!(preferences.objective(), Objective::MuscleGain);
    assert_eq!(preferences.diet_type(), DietType::Vegan);
    assert_eq!(preferences.frequency(), MealFrequency::ThreeMealsADay);
    assert!(preferences.allergens().contains(&Allergen::Meat));
    assert_eq!(preferences.start_date(), NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    assert_eq!(preferences.end_date(), NaiveDate::from_ymd_opt(2026, 3, 23).unwrap());

    // 3/16-3/20 加上 3/23，共 6 個工作日
    assert_eq!(plan.len(), 18);
    assert_eq!(plan.total_cost, 18 * 500);
    assert!(exports.is_success());

    let csv = std::fs::read_to_string(output.path().join("meal_plan.csv"))?;
    assert_eq!(csv.lines().count(), 19);
    assert!(csv.lines().nth(1).unwrap().starts_with("2026-03-16 08:00:00,"));

    assert!(transcript.contains("Hello, Ana!"));
    assert!(transcript.contains("SUMMARY OF PREFERENCES"));
    assert!(transcript.contains("YOUR MEAL PLAN"));
    assert!(transcript.contains("Total Costs:\tPhp 9000.00"));
    assert!(transcript.contains("Thank you for using the Meal Plan Generator"));
    Ok(())
}

#[test]
fn test_modifying_a_preference_before_confirming() -> Result<()> {
    let assembler = shipped_assembler()?;
    let output = TempDir::new()?;
    // 確認時選擇修改 → 頻率 → 一天一餐 → 不再修改
    let script = "Ana\n30\n2\n2\n4\n3\n16\n1\n3\n5\n1\n4\n1\n2\n2\n";

    let (outcome, transcript) = run_session(&assembler, default_exporter(&output), script)?;

    match outcome {
        SessionOutcome::Completed {
            preferences, plan, ..
        } => {
            assert_eq!(preferences.frequency(), MealFrequency::OneMealADay);
            assert_eq!(plan.len(), 6);
        }
        other => panic!("expected a completed session, got {:?}", other),
    }
    assert_eq!(transcript.matches("SUMMARY OF PREFERENCES").count(), 2);
    Ok(())
}

#[test]
fn test_underage_customer_is_turned_away() -> Result<()> {
    let assembler = shipped_assembler()?;
    let output = TempDir::new()?;

    let (outcome, transcript) = run_session(&assembler, default_exporter(&output), "Kid\n12\n")?;

    assert!(matches!(outcome, SessionOutcome::Underage));
    assert!(transcript.contains("you must be 18 years or older"));
    assert!(!output.path().join("meal_plan.csv").exists());
    Ok(())
}

fn keto_meat_catalog() -> Result<PlanAssembler> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "Type,Meal,Main Ingredient,SKU,Carbohydrate (%),Protein (%),Fat (%)")?;
    writeln!(file, "Keto,Steak,Beef,K1,5,35,60")?;
    writeln!(file, "Keto,Chops,Pork,K2,5,35,60")?;
    Ok(PlanAssembler::new(MealCatalog::from_path(file.path())?))
}

#[test]
fn test_exhausted_catalog_produces_no_plan_and_no_export() -> Result<()> {
    let assembler = keto_meat_catalog()?;
    let output = TempDir::new()?;
    // Keto + Meat 過敏 → 沒有餐點 → 不重試
    let script = "Bo\n40\n1\n1\n1\n3\n16\n1\n1\n5\n2\n2\n";

    let (outcome, transcript) = run_session(&assembler, default_exporter(&output), script)?;

    assert!(matches!(outcome, SessionOutcome::NoPlan));
    assert!(transcript.contains("Not enough meals in the dataset"));
    assert!(!transcript.contains("YOUR MEAL PLAN"));
    assert!(!output.path().join("meal_plan.csv").exists());
    Ok(())
}

#[test]
fn test_retry_after_exhaustion_with_new_allergies() -> Result<()> {
    let assembler = keto_meat_catalog()?;
    let output = TempDir::new()?;
    // 失敗後重試 → 修改過敏 → 清空 → 不再修改 → 不產生 PDF
    let script = "Bo\n40\n1\n1\n1\n3\n16\n1\n1\n5\n2\n1\n5\n\n2\n2\n";

    let (outcome, _) = run_session(&assembler, default_exporter(&output), script)?;

    match outcome {
        SessionOutcome::Completed {
            preferences, plan, ..
        } => {
            assert!(preferences.allergens().is_empty());
            assert_eq!(plan.len(), 6);
            assert_eq!(plan.total_cost, 6 * 1000);
        }
        other => panic!("expected a completed session, got {:?}", other),
    }
    assert!(output.path().join("meal_plan.csv").exists());
    Ok(())
}

#[test]
fn test_document_export_and_archive() -> Result<()> {
    let assembler = shipped_assembler()?;
    let output = TempDir::new()?;
    let settings = ExportSettings {
        formats: vec!["csv".to_string(), "json".to_string()],
        archive: true,
        compile_pdf: false,
    };
    // 最後一題選擇產生文件
    let script = "Ana\n30\n2\n3\n2\n3\n16\n2\n2\n\n2\n1\n";

    let (outcome, transcript) = run_session(&assembler, exporter(&output, settings), script)?;

    match outcome {
        SessionOutcome::Completed { exports, .. } => {
            assert!(exports.is_success());
            assert_eq!(exports.written.len(), 4);
        }
        other => panic!("expected a completed session, got {:?}", other),
    }
    for name in ["meal_plan.csv", "meal_plan.json", "meal_plan.zip", "meal_plan.tex"] {
        assert!(output.path().join(name).exists(), "{} missing", name);
    }
    assert!(transcript.contains("Generating PDF document..."));
    Ok(())
}
