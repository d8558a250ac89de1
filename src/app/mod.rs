pub mod display;
pub mod questionnaire;
pub mod session;
