use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    models::{JournalDraft, JournalEntry, Mood},
    records::{self, Upsert},
    store::{keys, Store},
};

pub const SUGGESTED_TAGS: [&str; 10] = [
    "Work",
    "Fitness",
    "Food",
    "Social",
    "Self-care",
    "Sleep",
    "Energy",
    "Creativity",
    "Symptoms",
    "Family",
];

#[derive(Debug, Serialize)]
pub struct MoodOption {
    pub name: Mood,
    pub emoji: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct JournalOptions {
    pub moods: Vec<MoodOption>,
    pub tags: &'static [&'static str],
}

pub fn options() -> JournalOptions {
    JournalOptions {
        moods: Mood::ALL
            .iter()
            .map(|&m| MoodOption {
                name: m,
                emoji: m.emoji(),
                description: m.description(),
            })
            .collect(),
        tags: &SUGGESTED_TAGS,
    }
}

/// Checks the draft in form order and returns the entry to store.
pub fn validate(draft: JournalDraft, today: NaiveDate) -> Result<JournalEntry> {
    let date = draft
        .date
        .ok_or_else(|| Error::validation("Please select a date for your journal entry."))?;
    if date > today {
        return Err(Error::validation("Journal entries cannot be dated in the future."));
    }
    let mood = draft
        .mood
        .ok_or_else(|| Error::validation("Please select how you are feeling (your mood)."))?;
    let content = draft.content.trim();
    if content.is_empty() {
        return Err(Error::validation(
            "Your journal entry cannot be empty. Please write something.",
        ));
    }

    let tags: BTreeSet<String> = draft
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(JournalEntry {
        date,
        mood,
        content: content.to_string(),
        tags,
    })
}

async fn load_all(store: &Store) -> Result<Vec<JournalEntry>> {
    store.load_or_default(keys::JOURNAL_ENTRIES).await
}

pub async fn list(store: &Store) -> Result<Vec<JournalEntry>> {
    let mut entries = load_all(store).await?;
    records::sort_newest_first(&mut entries);
    Ok(entries)
}

pub async fn get(store: &Store, date: NaiveDate) -> Result<JournalEntry> {
    let entries = load_all(store).await?;
    records::find_by_date(&entries, date)
        .cloned()
        .ok_or_else(|| Error::not_found(format!("No journal entry for {}", date)))
}

pub async fn save(
    store: &Store,
    draft: JournalDraft,
    today: NaiveDate,
) -> Result<(Upsert, JournalEntry)> {
    let entry = validate(draft, today)?;

    let mut entries = load_all(store).await?;
    let outcome = records::upsert_by_date(&mut entries, entry.clone());
    store.save(keys::JOURNAL_ENTRIES, &entries).await?;

    match outcome {
        Upsert::Created => tracing::info!("📓 Journal entry saved for {}", entry.date),
        Upsert::Updated => tracing::info!("📓 Journal entry updated for {}", entry.date),
    }
    Ok((outcome, entry))
}

pub async fn delete(store: &Store, date: NaiveDate) -> Result<()> {
    let mut entries = load_all(store).await?;
    if !records::remove_by_date(&mut entries, date) {
        return Err(Error::not_found(format!("No journal entry for {}", date)));
    }
    store.save(keys::JOURNAL_ENTRIES, &entries).await?;
    tracing::info!("🗑️ Journal entry deleted for {}", date);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn draft(date: NaiveDate, mood: Mood, content: &str) -> JournalDraft {
        JournalDraft {
            date: Some(date),
            mood: Some(mood),
            content: content.into(),
            tags: vec![],
        }
    }

    #[test]
    fn missing_date_is_reported_first() {
        let err = validate(JournalDraft::default(), day(29)).unwrap_err();
        assert_eq!(err.to_string(), "Please select a date for your journal entry.");
    }

    #[test]
    fn missing_mood_is_rejected() {
        let d = JournalDraft {
            date: Some(day(1)),
            content: "text".into(),
            ..Default::default()
        };
        let err = validate(d, day(29)).unwrap_err();
        assert!(err.to_string().contains("mood"));
    }

    #[test]
    fn blank_content_is_rejected() {
        let err = validate(draft(day(1), Mood::Calm, "   \n"), day(29)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn future_date_is_rejected() {
        assert!(validate(draft(day(30), Mood::Calm, "soon"), day(29)).is_err());
    }

    #[test]
    fn content_is_trimmed_and_tags_deduplicated() {
        let mut d = draft(day(1), Mood::Happy, "  good day  ");
        d.tags = vec!["Sleep".into(), " Sleep ".into(), "".into(), "Work".into()];
        let entry = validate(d, day(29)).unwrap();
        assert_eq!(entry.content, "good day");
        assert_eq!(entry.tags.len(), 2);
    }

    #[tokio::test]
    async fn saving_same_date_twice_keeps_one_entry() {
        let store = Store::in_memory();

        let (first, _) = save(&store, draft(day(3), Mood::Sad, "first"), day(29)).await.unwrap();
        let (second, _) = save(&store, draft(day(3), Mood::Calm, "second"), day(29)).await.unwrap();

        assert_eq!(first, Upsert::Created);
        assert_eq!(second, Upsert::Updated);
        let entries = list(&store).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "second");
        assert_eq!(entries[0].mood, Mood::Calm);
    }

    #[tokio::test]
    async fn failed_validation_writes_nothing() {
        let store = Store::in_memory();
        save(&store, draft(day(3), Mood::Sad, "kept"), day(29)).await.unwrap();

        let result = save(&store, draft(day(3), Mood::Sad, ""), day(29)).await;

        assert!(result.is_err());
        assert_eq!(get(&store, day(3)).await.unwrap().content, "kept");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = Store::in_memory();
        for d in [2, 9, 5] {
            save(&store, draft(day(d), Mood::Tired, "entry"), day(29)).await.unwrap();
        }
        let dates: Vec<_> = list(&store).await.unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(9), day(5), day(2)]);
    }

    #[tokio::test]
    async fn delete_removes_only_that_date() {
        let store = Store::in_memory();
        save(&store, draft(day(1), Mood::Happy, "one"), day(29)).await.unwrap();
        save(&store, draft(day(2), Mood::Happy, "two"), day(29)).await.unwrap();

        delete(&store, day(1)).await.unwrap();

        let entries = list(&store).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, day(2));
        assert!(matches!(delete(&store, day(1)).await, Err(Error::NotFound(_))));
    }

    #[test]
    fn options_list_every_mood() {
        let opts = options();
        assert_eq!(opts.moods.len(), 8);
        assert_eq!(opts.tags.len(), 10);
    }
}
