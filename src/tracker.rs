use std::{collections::BTreeSet, ops::RangeInclusive};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    models::{ActivityLevel, TrackingDraft, TrackingEntry},
    records::{self, Upsert},
    store::{keys, Store},
};

pub const PHYSICAL_SYMPTOMS: [&str; 12] = [
    "Cramps",
    "Headache",
    "Bloating",
    "Breast tenderness",
    "Acne",
    "Fatigue",
    "Back pain",
    "Joint pain",
    "Nausea",
    "Sleep changes",
    "Appetite changes",
    "Skin changes",
];

pub const EMOTIONAL_STATES: [&str; 11] = [
    "Anxiety",
    "Mood swings",
    "Irritability",
    "Depression",
    "Emotional sensitivity",
    "Stress",
    "Calmness",
    "Joy",
    "Motivation changes",
    "Focus changes",
    "Social energy",
];

pub const ENERGY_RANGE: RangeInclusive<u8> = 1..=10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerOptions {
    pub physical_symptoms: &'static [&'static str],
    pub moods: &'static [&'static str],
    pub energy_min: u8,
    pub energy_max: u8,
    pub activities: [ActivityLevel; 4],
}

pub fn options() -> TrackerOptions {
    TrackerOptions {
        physical_symptoms: &PHYSICAL_SYMPTOMS,
        moods: &EMOTIONAL_STATES,
        energy_min: *ENERGY_RANGE.start(),
        energy_max: *ENERGY_RANGE.end(),
        activities: ActivityLevel::ALL,
    }
}

fn collect_known(values: &[String], catalogue: &[&str], kind: &str) -> Result<BTreeSet<String>> {
    let mut out = BTreeSet::new();
    for v in values {
        let v = v.trim();
        if !catalogue.contains(&v) {
            return Err(Error::validation(format!("Unknown {}: '{}'.", kind, v)));
        }
        out.insert(v.to_string());
    }
    Ok(out)
}

pub fn validate(draft: TrackingDraft, today: NaiveDate) -> Result<TrackingEntry> {
    let date = draft
        .date
        .ok_or_else(|| Error::validation("Please select a date for your tracking entry."))?;
    if date > today {
        return Err(Error::validation("Tracking entries cannot be dated in the future."));
    }

    let physical_symptoms = collect_known(&draft.physical_symptoms, &PHYSICAL_SYMPTOMS, "symptom")?;
    let moods = collect_known(&draft.moods, &EMOTIONAL_STATES, "mood")?;

    if let Some(level) = draft.energy_level {
        if !ENERGY_RANGE.contains(&level) {
            return Err(Error::validation(format!(
                "Energy level must be between {} and {}.",
                ENERGY_RANGE.start(),
                ENERGY_RANGE.end()
            )));
        }
    }

    if physical_symptoms.is_empty() && moods.is_empty() && draft.energy_level.is_none() {
        return Err(Error::validation(
            "Please select at least one symptom, mood, or energy level.",
        ));
    }

    Ok(TrackingEntry {
        date,
        physical_symptoms,
        moods,
        energy_level: draft.energy_level,
        activity: draft.activity,
    })
}

async fn load_all(store: &Store) -> Result<Vec<TrackingEntry>> {
    store.load_or_default(keys::TRACKING_HISTORY).await
}

pub async fn list(store: &Store) -> Result<Vec<TrackingEntry>> {
    let mut entries = load_all(store).await?;
    records::sort_newest_first(&mut entries);
    Ok(entries)
}

pub async fn get(store: &Store, date: NaiveDate) -> Result<TrackingEntry> {
    let entries = load_all(store).await?;
    records::find_by_date(&entries, date)
        .cloned()
        .ok_or_else(|| Error::not_found(format!("No tracking entry for {}", date)))
}

pub async fn save(
    store: &Store,
    draft: TrackingDraft,
    today: NaiveDate,
) -> Result<(Upsert, TrackingEntry)> {
    let entry = validate(draft, today)?;

    let mut entries = load_all(store).await?;
    let outcome = records::upsert_by_date(&mut entries, entry.clone());
    store.save(keys::TRACKING_HISTORY, &entries).await?;

    tracing::info!("🩺 Tracking {:?} for {}", outcome, entry.date);
    Ok((outcome, entry))
}

pub async fn delete(store: &Store, date: NaiveDate) -> Result<()> {
    let mut entries = load_all(store).await?;
    if !records::remove_by_date(&mut entries, date) {
        return Err(Error::not_found(format!("No tracking entry for {}", date)));
    }
    store.save(keys::TRACKING_HISTORY, &entries).await?;
    tracing::info!("🗑️ Tracking entry deleted for {}", date);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn draft(date: NaiveDate, symptoms: &[&str], energy: Option<u8>) -> TrackingDraft {
        TrackingDraft {
            date: Some(date),
            physical_symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            moods: vec![],
            energy_level: energy,
            activity: None,
        }
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = validate(draft(day(1), &[], None), day(10)).unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn energy_out_of_range_is_rejected() {
        assert!(validate(draft(day(1), &[], Some(0)), day(10)).is_err());
        assert!(validate(draft(day(1), &[], Some(11)), day(10)).is_err());
        assert!(validate(draft(day(1), &[], Some(10)), day(10)).is_ok());
    }

    #[test]
    fn unknown_symptom_is_rejected() {
        let err = validate(draft(day(1), &["Hiccups"], None), day(10)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn missing_date_is_rejected() {
        let d = TrackingDraft {
            energy_level: Some(5),
            ..Default::default()
        };
        assert!(validate(d, day(10)).is_err());
    }

    #[tokio::test]
    async fn same_date_overwrites_previous_tracking() {
        let store = Store::in_memory();
        save(&store, draft(day(2), &["Cramps"], Some(3)), day(10)).await.unwrap();
        let (outcome, _) = save(&store, draft(day(2), &["Headache"], Some(7)), day(10))
            .await
            .unwrap();

        assert_eq!(outcome, Upsert::Updated);
        let entries = list(&store).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].physical_symptoms.contains("Headache"));
        assert_eq!(entries[0].energy_level, Some(7));
    }

    #[tokio::test]
    async fn delete_keeps_other_days() {
        let store = Store::in_memory();
        save(&store, draft(day(2), &["Cramps"], None), day(10)).await.unwrap();
        save(&store, draft(day(3), &["Acne"], None), day(10)).await.unwrap();

        delete(&store, day(2)).await.unwrap();

        assert!(get(&store, day(2)).await.is_err());
        assert_eq!(get(&store, day(3)).await.unwrap().date, day(3));
    }
}
