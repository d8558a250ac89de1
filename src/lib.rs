pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::export::{ExportSettings, PlanExporter};
pub use app::display::Palette;
pub use app::questionnaire::TerminalQuestionnaire;
pub use app::session::{Session, SessionOutcome};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{assembler::PlanAssembler, catalog::MealCatalog};
pub use utils::error::{PlannerError, Result};
