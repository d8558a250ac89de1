use crate::domain::model::{CustomerPreferences, CustomerProfile, MealPlan};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn catalog_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn archive_enabled(&self) -> bool;
    fn compile_pdf(&self) -> bool;
    fn seed(&self) -> Option<u64>;
    fn color_enabled(&self) -> bool;
}

/// 問卷介面：回傳值皆已驗證並限制在提供的選項內
pub trait Questionnaire {
    fn say(&mut self, message: &str) -> Result<()>;
    fn ask_text(&mut self, question: &str) -> Result<String>;
    fn ask_number(&mut self, question: &str) -> Result<u32>;
    /// 回傳所選項目的索引
    fn ask_choice(&mut self, question: &str, labels: &[String]) -> Result<usize>;
    /// 回傳不重複、遞增排序的索引；空白回答代表不選
    fn ask_multi_choice(&mut self, question: &str, labels: &[String]) -> Result<Vec<usize>>;
    fn ask_date(&mut self, question: &str, future_only: bool) -> Result<NaiveDate>;
}

/// 文件輸出的唯讀視圖
pub struct PlanReport<'a> {
    pub profile: &'a CustomerProfile,
    pub preferences: &'a CustomerPreferences,
    pub plan: &'a MealPlan,
}

pub trait DocumentRenderer {
    fn extension(&self) -> &'static str;
    fn render(&self, report: &PlanReport<'_>) -> Result<Vec<u8>>;
}
