use chrono::NaiveDate;
use serde::Serialize;

/// A stored record keyed by its calendar day.
pub trait DatedRecord {
    fn date(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Upsert {
    Created,
    Updated,
}

/// Replaces the record sharing `record`'s date, or appends it.
pub fn upsert_by_date<T: DatedRecord>(entries: &mut Vec<T>, record: T) -> Upsert {
    match entries.iter().position(|e| e.date() == record.date()) {
        Some(idx) => {
            entries[idx] = record;
            Upsert::Updated
        }
        None => {
            entries.push(record);
            Upsert::Created
        }
    }
}

/// Returns `true` if a record was removed.
pub fn remove_by_date<T: DatedRecord>(entries: &mut Vec<T>, date: NaiveDate) -> bool {
    let before = entries.len();
    entries.retain(|e| e.date() != date);
    entries.len() != before
}

pub fn find_by_date<T: DatedRecord>(entries: &[T], date: NaiveDate) -> Option<&T> {
    entries.iter().find(|e| e.date() == date)
}

pub fn sort_newest_first<T: DatedRecord>(entries: &mut [T]) {
    entries.sort_by_key(|e| std::cmp::Reverse(e.date()));
}
