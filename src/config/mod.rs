pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meal-planner")]
#[command(about = "Build a personal meal plan from a meal dataset")]
pub struct CliConfig {
    #[arg(long, default_value = "datasets/meal_dataset.csv")]
    pub catalog: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle all exports into meal_plan.zip")]
    pub archive: bool,

    #[arg(long, help = "Run pdflatex on the generated document")]
    pub compile_pdf: bool,

    #[arg(long, help = "Seed for a reproducible meal plan")]
    pub seed: Option<u64>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn archive_enabled(&self) -> bool {
        self.archive
    }

    fn compile_pdf(&self) -> bool {
        self.compile_pdf
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn color_enabled(&self) -> bool {
        !self.no_color
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog", &self.catalog)?;
        validation::validate_file_extension("catalog", &self.catalog, &["csv"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        Ok(())
    }
}
