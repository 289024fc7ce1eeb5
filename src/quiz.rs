//! Onboarding quiz: a fixed, linear list of questions.
//!
//! The step index runs from 0 to `QUESTIONS.len()`; the last value is the
//! results state. Answering validates and advances, going back never
//! validates. Reaching the results state derives and stores the cycle state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    cycle::{self, CYCLE_LENGTH_RANGE},
    error::{Error, Result},
    models::CycleSummary,
    settings,
    store::{keys, Store},
    tracker::PHYSICAL_SYMPTOMS,
};

pub const LMP_DATE: &str = "lmpDate";
pub const CYCLE_LENGTH: &str = "cycleLength";
pub const POST_PERIOD_ENERGY: &str = "postPeriodEnergy";
pub const MID_CYCLE_SHIFT: &str = "midCycleShift";
pub const USUAL_SYMPTOMS: &str = "usualSymptoms";

/// Exclusive choice for the usual-symptoms question.
pub const NONE_OF_THESE: &str = "None of these";

#[derive(Debug, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Date,
    Number {
        min: u32,
        max: u32,
    },
    Radio {
        options: &'static [Choice],
    },
    Checkbox {
        options: &'static [&'static str],
        /// Accepted only when picked on its own.
        #[serde(rename = "noneOption")]
        none_option: Option<&'static str>,
    },
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

pub static QUESTIONS: [Question; 5] = [
    Question {
        id: LMP_DATE,
        prompt: "What was the first day of your last period (LMP)?",
        kind: QuestionKind::Date,
    },
    Question {
        id: CYCLE_LENGTH,
        prompt: "How long is your typical menstrual cycle (average number of days from the \
                 start of one period to the start of the next)?",
        kind: QuestionKind::Number {
            min: *CYCLE_LENGTH_RANGE.start(),
            max: *CYCLE_LENGTH_RANGE.end(),
        },
    },
    Question {
        id: POST_PERIOD_ENERGY,
        prompt: "How would you describe your energy levels during the first few days after \
                 your period ends?",
        kind: QuestionKind::Radio {
            options: &[
                Choice {
                    value: "low",
                    label: "Low, I need to rest",
                },
                Choice {
                    value: "moderate",
                    label: "Moderate, picking up",
                },
                Choice {
                    value: "high",
                    label: "High, ready to go",
                },
            ],
        },
    },
    Question {
        id: MID_CYCLE_SHIFT,
        prompt: "Do you experience a noticeable shift in mood or energy around mid-cycle \
                 (roughly day 14)?",
        kind: QuestionKind::Radio {
            options: &[
                Choice {
                    value: "yes_positive",
                    label: "Yes, usually a positive burst of energy/mood",
                },
                Choice {
                    value: "yes_negative",
                    label: "Yes, usually a dip or irritability",
                },
                Choice {
                    value: "no_noticeable",
                    label: "Not particularly noticeable",
                },
            ],
        },
    },
    Question {
        id: USUAL_SYMPTOMS,
        prompt: "Which of these do you usually notice in the days before your period?",
        kind: QuestionKind::Checkbox {
            options: &PHYSICAL_SYMPTOMS,
            none_option: Some(NONE_OF_THESE),
        },
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(i64),
    Set(BTreeSet<String>),
}

impl AnswerValue {
    fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Number(_) | AnswerValue::Set(_) => None,
        }
    }

    fn non_blank_text(&self) -> Result<&str> {
        self.as_text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(required)
    }
}

fn required() -> Error {
    Error::validation("Please answer the question before proceeding.")
}

fn not_an_option(value: &str) -> Error {
    Error::validation(format!("'{}' is not one of the options.", value))
}

impl Question {
    /// Validates `value` for this question and returns its normalised form.
    pub fn check(&self, value: AnswerValue, today: NaiveDate) -> Result<AnswerValue> {
        match &self.kind {
            QuestionKind::Date => {
                let raw = value.non_blank_text()?;
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| Error::validation("Please enter a valid date (YYYY-MM-DD)."))?;
                if date > today {
                    return Err(Error::validation(
                        "The date of your last period cannot be in the future.",
                    ));
                }
                Ok(AnswerValue::Text(date.to_string()))
            }
            QuestionKind::Number { min, max } => {
                let n: i64 = match value {
                    AnswerValue::Number(n) => n,
                    other => other
                        .non_blank_text()?
                        .parse()
                        .map_err(|_| Error::validation("Please enter a whole number of days."))?,
                };
                if n < i64::from(*min) || n > i64::from(*max) {
                    return Err(Error::validation(format!(
                        "Please enter a number between {} and {}.",
                        min, max
                    )));
                }
                Ok(AnswerValue::Text(n.to_string()))
            }
            QuestionKind::Radio { options } => {
                let raw = value.as_text().filter(|s| !s.is_empty()).ok_or_else(required)?;
                if !options.iter().any(|c| c.value == raw) {
                    return Err(not_an_option(raw));
                }
                Ok(AnswerValue::Text(raw.to_string()))
            }
            QuestionKind::Checkbox {
                options,
                none_option,
            } => {
                let picked: BTreeSet<String> = match value {
                    AnswerValue::Set(set) => set,
                    AnswerValue::Text(s) => [s].into_iter().filter(|s| !s.is_empty()).collect(),
                    AnswerValue::Number(n) => return Err(not_an_option(&n.to_string())),
                };
                if picked.is_empty() {
                    return Err(required());
                }

                let is_none = |p: &str| *none_option == Some(p);
                if let Some(unknown) = picked
                    .iter()
                    .find(|p| !options.contains(&p.as_str()) && !is_none(p))
                {
                    return Err(not_an_option(unknown));
                }
                if picked.len() > 1 && picked.iter().any(|p| is_none(p)) {
                    return Err(Error::validation(format!(
                        "'{}' cannot be combined with other choices.",
                        none_option.unwrap_or_default()
                    )));
                }
                Ok(AnswerValue::Set(picked))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    step: usize,
    answers: BTreeMap<String, AnswerValue>,
}

impl QuizSession {
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn answers(&self) -> &BTreeMap<String, AnswerValue> {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.step >= QUESTIONS.len()
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.step)
    }

    pub fn answer(&mut self, value: AnswerValue, today: NaiveDate) -> Result<()> {
        let question = self
            .current_question()
            .ok_or_else(|| {
                Error::InvalidState("The quiz is already complete. Restart to answer again.".into())
            })?;
        let value = question.check(value, today)?;
        self.answers.insert(question.id.to_string(), value);
        self.step += 1;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    fn text(&self, id: &str) -> Option<&str> {
        self.answers.get(id).and_then(AnswerValue::as_text)
    }

    /// The LMP and cycle length answers, when both are present and well formed.
    pub fn cycle_inputs(&self) -> Option<(NaiveDate, u32)> {
        let lmp = NaiveDate::parse_from_str(self.text(LMP_DATE)?, "%Y-%m-%d").ok()?;
        let length = self.text(CYCLE_LENGTH)?.parse().ok()?;
        Some((lmp, length))
    }
}

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub step: usize,
    pub total: usize,
    pub complete: bool,
    pub question: Option<&'static Question>,
    pub answers: BTreeMap<String, AnswerValue>,
}

impl From<&QuizSession> for QuizView {
    fn from(session: &QuizSession) -> Self {
        Self {
            step: session.step,
            total: QUESTIONS.len(),
            complete: session.is_complete(),
            question: session.current_question(),
            answers: session.answers.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub summary: Option<CycleSummary>,
    pub note: Option<String>,
    pub post_period_energy: Option<String>,
    pub mid_cycle_shift: Option<String>,
    pub usual_symptoms: BTreeSet<String>,
}

async fn load_session(store: &Store) -> Result<QuizSession> {
    let answers = store.load_or_default(keys::QUIZ_ANSWERS).await?;
    let step: usize = store.load_or_default(keys::QUIZ_STEP).await?;
    Ok(QuizSession {
        step: step.min(QUESTIONS.len()),
        answers,
    })
}

async fn save_session(store: &Store, session: &QuizSession) -> Result<()> {
    store.save(keys::QUIZ_ANSWERS, &session.answers).await?;
    store.save(keys::QUIZ_STEP, &session.step).await
}

async fn estimate(
    store: &Store,
    session: &QuizSession,
    today: NaiveDate,
) -> Result<CycleSummary> {
    let (lmp, length) = session.cycle_inputs().ok_or_else(|| {
        Error::NotAvailable(
            "Please complete the date and cycle length questions for a cycle day estimate."
                .into(),
        )
    })?;
    let prefs = settings::load(store).await?;
    cycle::estimate(lmp, length, prefs.period_length, today)
}

async fn persist_cycle_state(store: &Store, summary: &CycleSummary) -> Result<()> {
    store.save(keys::CYCLE_START_DATE, &summary.start_date).await?;
    store.save(keys::CYCLE_AVERAGE_LENGTH, &summary.cycle_length).await?;
    store.save(keys::CURRENT_CYCLE_DAY, &summary.cycle_day).await?;
    store.save(keys::CURRENT_CYCLE_PHASE, &summary.phase).await?;
    store.save(keys::NEXT_PERIOD_ESTIMATE, &summary.next_period_estimate).await
}

pub async fn current(store: &Store) -> Result<QuizView> {
    Ok(QuizView::from(&load_session(store).await?))
}

pub async fn answer(store: &Store, value: AnswerValue, today: NaiveDate) -> Result<QuizView> {
    let mut session = load_session(store).await?;
    session.answer(value, today)?;

    if session.is_complete() {
        match estimate(store, &session, today).await {
            Ok(summary) => {
                persist_cycle_state(store, &summary).await?;
                tracing::info!(
                    "🌙 Quiz complete: cycle day {} ({})",
                    summary.cycle_day,
                    summary.phase_label
                );
            }
            Err(Error::NotAvailable(reason)) => {
                tracing::warn!("⚠️ Quiz complete without a cycle estimate: {}", reason);
            }
            Err(e) => return Err(e),
        }
    }

    save_session(store, &session).await?;
    Ok(QuizView::from(&session))
}

pub async fn back(store: &Store) -> Result<QuizView> {
    let mut session = load_session(store).await?;
    session.back();
    save_session(store, &session).await?;
    Ok(QuizView::from(&session))
}

/// Clears every answer and all derived cycle state.
pub async fn restart(store: &Store) -> Result<QuizView> {
    store.remove(keys::QUIZ_ANSWERS).await?;
    store.remove(keys::QUIZ_STEP).await?;
    for key in keys::DERIVED_CYCLE_STATE {
        store.remove(key).await?;
    }
    tracing::info!("🔄 Quiz restarted");
    Ok(QuizView::from(&QuizSession::default()))
}

pub async fn results(store: &Store, today: NaiveDate) -> Result<QuizResults> {
    let session = load_session(store).await?;
    if !session.is_complete() {
        return Err(Error::InvalidState(format!(
            "Results are available after all {} questions are answered.",
            QUESTIONS.len()
        )));
    }

    let (summary, note) = match estimate(store, &session, today).await {
        Ok(summary) => (Some(summary), None),
        Err(Error::NotAvailable(reason)) => (None, Some(reason)),
        Err(e) => return Err(e),
    };

    let usual_symptoms = match session.answers.get(USUAL_SYMPTOMS) {
        Some(AnswerValue::Set(set)) => set.clone(),
        _ => BTreeSet::new(),
    };

    Ok(QuizResults {
        summary,
        note,
        post_period_energy: session.text(POST_PERIOD_ENERGY).map(str::to_string),
        mid_cycle_shift: session.text(MID_CYCLE_SHIFT).map(str::to_string),
        usual_symptoms,
    })
}
