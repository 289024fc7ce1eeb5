//! Cycle-day and phase estimation from the last menstrual period (LMP).
//!
//! Phase boundaries are day-count heuristics, not medical predictions. The
//! luteal phase is taken as a fixed 14 days, so ovulation falls on
//! `cycle_length - 14` and the ovulatory window spans three days from there.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};

use crate::{
    error::{Error, Result},
    models::{CycleSummary, Phase},
    settings,
    store::{keys, Store},
};

pub const CYCLE_LENGTH_RANGE: RangeInclusive<u32> = 21..=35;
pub const PERIOD_LENGTH_RANGE: RangeInclusive<u32> = 2..=10;
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

const LUTEAL_DAYS: u32 = 14;
const OVULATORY_WINDOW_DAYS: u32 = 3;
const FERTILE_MARGIN_DAYS: u32 = 2;

pub fn ovulation_day(cycle_length: u32) -> u32 {
    cycle_length.saturating_sub(LUTEAL_DAYS).max(1)
}

/// Buckets a 1-indexed cycle day into a phase.
pub fn phase_for_day(cycle_day: u32, cycle_length: u32, period_length: u32) -> Phase {
    let ovulation = ovulation_day(cycle_length);
    if cycle_day <= period_length {
        Phase::Menstrual
    } else if cycle_day < ovulation {
        Phase::Follicular
    } else if cycle_day < ovulation + OVULATORY_WINDOW_DAYS {
        Phase::Ovulatory
    } else {
        Phase::Luteal
    }
}

pub fn in_fertile_window(cycle_day: u32, cycle_length: u32) -> bool {
    let ovulation = ovulation_day(cycle_length);
    let start = ovulation.saturating_sub(FERTILE_MARGIN_DAYS);
    (start..=ovulation + FERTILE_MARGIN_DAYS).contains(&cycle_day)
}

pub fn validate_cycle_length(cycle_length: u32) -> Result<()> {
    if CYCLE_LENGTH_RANGE.contains(&cycle_length) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "Cycle length must be between {} and {} days.",
            CYCLE_LENGTH_RANGE.start(),
            CYCLE_LENGTH_RANGE.end()
        )))
    }
}

/// Computes the cycle position for `today`.
///
/// Fails with [`Error::NotAvailable`] when the LMP lies after `today`.
pub fn estimate(
    lmp: NaiveDate,
    cycle_length: u32,
    period_length: u32,
    today: NaiveDate,
) -> Result<CycleSummary> {
    validate_cycle_length(cycle_length)?;

    let days_since_lmp = (today - lmp).num_days();
    if days_since_lmp < 0 {
        return Err(Error::NotAvailable(format!(
            "Last period date {} is in the future; cycle day is not available.",
            lmp
        )));
    }

    let cycle_day = (days_since_lmp % i64::from(cycle_length)) as u32 + 1;
    let phase = phase_for_day(cycle_day, cycle_length, period_length);
    let period_expected_in_days = cycle_length - cycle_day + 1;

    Ok(CycleSummary {
        start_date: lmp,
        cycle_length,
        days_since_lmp,
        cycle_day,
        phase,
        phase_label: phase.label(),
        in_fertile_window: in_fertile_window(cycle_day, cycle_length),
        period_expected_in_days,
        next_period_estimate: today + Duration::days(i64::from(period_expected_in_days)),
    })
}

/// Recomputes the summary for `today` from the stored LMP.
///
/// The stored average length wins over the settings default.
pub async fn current_summary(store: &Store, today: NaiveDate) -> Result<CycleSummary> {
    let Some(lmp) = store.load::<NaiveDate>(keys::CYCLE_START_DATE).await? else {
        return Err(Error::not_found(
            "No cycle start date recorded yet. Complete the quiz first.",
        ));
    };

    let prefs = settings::load(store).await?;
    let cycle_length = store
        .load::<u32>(keys::CYCLE_AVERAGE_LENGTH)
        .await?
        .unwrap_or(prefs.cycle_length);

    estimate(lmp, cycle_length, prefs.period_length, today)
}
