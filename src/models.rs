use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::DatedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Menstrual,
        Phase::Follicular,
        Phase::Ovulatory,
        Phase::Luteal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Menstrual => "menstrual",
            Phase::Follicular => "follicular",
            Phase::Ovulatory => "ovulatory",
            Phase::Luteal => "luteal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Menstrual => "Menstrual Phase",
            Phase::Follicular => "Follicular Phase",
            Phase::Ovulatory => "Ovulatory Phase",
            Phase::Luteal => "Luteal Phase",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPhase(pub String);

impl fmt::Display for UnknownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cycle phase '{}'", self.0)
    }
}

impl std::error::Error for UnknownPhase {}

impl FromStr for Phase {
    type Err = UnknownPhase;

    /// Accepts "luteal", "Luteal Phase", and "ovulation" for the ovulatory phase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_suffix(" phase").unwrap_or(&lowered).trim();
        match name {
            "menstrual" => Ok(Phase::Menstrual),
            "follicular" => Ok(Phase::Follicular),
            "ovulatory" | "ovulation" => Ok(Phase::Ovulatory),
            "luteal" => Ok(Phase::Luteal),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub start_date: NaiveDate,
    pub cycle_length: u32,
    pub days_since_lmp: i64,
    pub cycle_day: u32,
    pub phase: Phase,
    pub phase_label: &'static str,
    pub in_fertile_window: bool,
    pub period_expected_in_days: u32,
    pub next_period_estimate: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Tired,
    Loving,
    Anxious,
    Calm,
    Thoughtful,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
        Mood::Loving,
        Mood::Anxious,
        Mood::Calm,
        Mood::Thoughtful,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😔",
            Mood::Angry => "😡",
            Mood::Tired => "😴",
            Mood::Loving => "🥰",
            Mood::Anxious => "😰",
            Mood::Calm => "😌",
            Mood::Thoughtful => "🤔",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mood::Happy => "Feeling content and joyful",
            Mood::Sad => "Feeling down or low-spirited",
            Mood::Angry => "Feeling irritated or frustrated",
            Mood::Tired => "Feeling fatigued and needing rest",
            Mood::Loving => "Feeling affectionate and warm",
            Mood::Anxious => "Feeling worried or uneasy",
            Mood::Calm => "Feeling peaceful and relaxed",
            Mood::Thoughtful => "Feeling reflective or pensive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub mood: Mood,
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl DatedRecord for JournalEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Unvalidated journal input. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalDraft {
    pub date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Rest,
    Light,
    Moderate,
    Intense,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Rest,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Intense,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub physical_symptoms: BTreeSet<String>,
    #[serde(default)]
    pub moods: BTreeSet<String>,
    pub energy_level: Option<u8>,
    pub activity: Option<ActivityLevel>,
}

impl DatedRecord for TrackingEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDraft {
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub physical_symptoms: Vec<String>,
    #[serde(default)]
    pub moods: Vec<String>,
    pub energy_level: Option<u8>,
    pub activity: Option<ActivityLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_parses_labels_and_aliases() {
        assert_eq!("luteal".parse::<Phase>(), Ok(Phase::Luteal));
        assert_eq!("Menstrual Phase".parse::<Phase>(), Ok(Phase::Menstrual));
        assert_eq!("ovulation".parse::<Phase>(), Ok(Phase::Ovulatory));
        assert_eq!(" Follicular ".parse::<Phase>(), Ok(Phase::Follicular));
        assert!("winter".parse::<Phase>().is_err());
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Ovulatory).unwrap(), "\"ovulatory\"");
    }

    #[test]
    fn journal_entry_keeps_stored_shape() {
        let entry = JournalEntry {
            date: NaiveDate::from_ymd_opt(2025, 5, 29).unwrap(),
            mood: Mood::Calm,
            content: "Quiet day".into(),
            tags: ["Sleep".to_string()].into_iter().collect(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-05-29",
                "mood": "Calm",
                "content": "Quiet day",
                "tags": ["Sleep"]
            })
        );
    }

    #[test]
    fn tracking_entry_uses_camel_case_keys() {
        let json = serde_json::json!({
            "date": "2025-05-29",
            "physicalSymptoms": ["Cramps"],
            "moods": [],
            "energyLevel": 4,
            "activity": "Light"
        });
        let entry: TrackingEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.energy_level, Some(4));
        assert_eq!(entry.activity, Some(ActivityLevel::Light));
        assert!(entry.physical_symptoms.contains("Cramps"));
    }
}
