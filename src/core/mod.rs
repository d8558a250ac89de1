pub mod assembler;
pub mod catalog;
pub mod filter;
pub mod macros;
pub mod sampler;
pub mod schedule;

pub use crate::domain::model::{CustomerPreferences, MealCatalogEntry, MealPlan, ScheduledMeal};
pub use crate::domain::ports::{ConfigProvider, DocumentRenderer, Questionnaire, Storage};
pub use crate::utils::error::Result;
