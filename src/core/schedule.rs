use crate::domain::model::MealFrequency;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

/// start 到 end（皆含）之間的週一至週五；週末起始日自動順延
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// 產生依時間排序的用餐時段，長度為工作日數乘以每日餐數
pub fn build_schedule(
    start: NaiveDate,
    end: NaiveDate,
    frequency: MealFrequency,
) -> Vec<NaiveDateTime> {
    let times = frequency.slot_times();
    let days = business_days(start, end);

    let schedule: Vec<NaiveDateTime> = days
        .iter()
        .flat_map(|day| times.iter().map(move |time| day.and_time(*time)))
        .collect();

    debug_assert_eq!(schedule.len(), days.len() * frequency.meals_per_day());
    tracing::debug!(
        "Built schedule: {} business days x {} meals = {} slots",
        days.len(),
        frequency.meals_per_day(),
        schedule.len()
    );

    schedule
}
