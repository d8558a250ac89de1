use chrono::Local;
use clap::Parser;
use meal_planner::core::assembler::rng_from_seed;
use meal_planner::core::ConfigProvider;
use meal_planner::utils::error::ErrorSeverity;
use meal_planner::utils::{logger, validation::Validate};
use meal_planner::{
    CliConfig, ExportSettings, LocalStorage, MealCatalog, Palette, PlanAssembler, PlanExporter,
    PlannerError, Session, SessionOutcome, TerminalQuestionnaire, TomlConfig,
};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting meal-planner CLI");
    tracing::debug!("CLI config: {:?}", cli);

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config.with_overrides(cli.seed, cli.no_color),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            run(&config)
        }
        None => run(&cli),
    }
}

fn run<C: ConfigProvider + Validate>(config: &C) -> anyhow::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    // 資料集載入失敗時，在問卷開始前結束
    let catalog = match MealCatalog::from_path(config.catalog_path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("❌ Catalog load failed: {}", e);
            fail(&e);
        }
    };

    let assembler = PlanAssembler::new(catalog);
    let palette = Palette::new(config.color_enabled());
    let storage = LocalStorage::new(config.output_path().to_string());
    let exporter = PlanExporter::new(storage, ExportSettings::from_config(config));
    let questionnaire = TerminalQuestionnaire::new(
        io::stdin().lock(),
        io::stdout(),
        palette,
        Local::now().date_naive(),
    );

    let mut session = Session::new(
        questionnaire,
        &assembler,
        exporter,
        palette,
        rng_from_seed(config.seed()),
    );

    match session.run() {
        Ok(SessionOutcome::Completed { plan, exports, .. }) => {
            tracing::info!(
                "✅ Session completed: {} meals, {} files written, {} export failures",
                plan.len(),
                exports.written.len(),
                exports.failures.len()
            );
            Ok(())
        }
        Ok(SessionOutcome::NoPlan) => {
            tracing::info!("Session ended without a meal plan");
            Ok(())
        }
        Ok(SessionOutcome::Underage) => Ok(()),
        Err(e) if e.severity() == ErrorSeverity::Critical => {
            Err(anyhow::Error::new(e).context("meal planner session failed"))
        }
        Err(e) => {
            tracing::error!(
                "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(&e);
        }
    }
}

fn fail(e: &PlannerError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
