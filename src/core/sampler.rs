use crate::domain::model::MealCatalogEntry;
use chrono::NaiveDateTime;
use rand::prelude::IndexedRandom;
use rand::Rng;

/// 每個時段抽一筆（可重複抽取），第 i 次抽取對應第 i 個時段。
/// 候選清單為空且需要抽取時回傳 None。
pub fn sample_meals<'a, R: Rng + ?Sized>(
    candidates: &[&'a MealCatalogEntry],
    slots: &[NaiveDateTime],
    rng: &mut R,
) -> Option<Vec<(NaiveDateTime, &'a MealCatalogEntry)>> {
    if candidates.is_empty() && !slots.is_empty() {
        return None;
    }

    slots
        .iter()
        .map(|slot| candidates.choose(&mut *rng).map(|meal| (*slot, *meal)))
        .collect()
}
