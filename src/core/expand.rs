use crate::core::pricing::{charge_and_rate, payout_and_profit};
use crate::core::timeutil::{
    advance_by_frequency, duration_hours, format_clock_time, next_occurrence_of_weekday,
    parse_clock_time, parse_weekday, DEFAULT_DURATION_HOURS, DEFAULT_END_TIME,
    DEFAULT_HORIZON_WEEKS, DEFAULT_START_TIME,
};
use crate::domain::model::{
    Cleaner, Client, Frequency, GenerateRequest, JobStatus, NewJob,
};
use crate::utils::error::{EngineError, Result};
use chrono::{Days, NaiveDate, Weekday};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct GeneratePlan {
    pub creates: Vec<NewJob>,
    pub skipped: usize,
}

/// Resolved recurrence inputs: request overrides win, the client record
/// fills the gaps, stored time strings that fail to parse fall back to the
/// documented defaults so one bad record never sinks a batch.
struct EffectiveSchedule {
    days: Vec<Weekday>,
    start_min: u32,
    end_min: u32,
    start_label: String,
    end_label: String,
    frequency: Frequency,
    weeks: u32,
}

fn resolve_schedule(client: &Client, req: &GenerateRequest) -> Result<EffectiveSchedule> {
    let raw_days = req
        .recurring_days
        .as_ref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&client.recurring_days);

    // iteration order is configuration order, deliberately unsorted
    let mut days = Vec::new();
    for name in raw_days {
        match parse_weekday(name) {
            Some(day) => days.push(day),
            None => tracing::warn!(day = %name, "ignoring unrecognized weekday name"),
        }
    }
    if days.is_empty() {
        return Err(EngineError::MissingConfigError {
            field: "recurring_days".to_string(),
        });
    }

    let start_raw = req
        .recurring_start_time
        .as_deref()
        .or(client.recurring_start_time.as_deref())
        .unwrap_or(DEFAULT_START_TIME);
    let end_raw = req
        .recurring_end_time
        .as_deref()
        .or(client.recurring_end_time.as_deref())
        .unwrap_or(DEFAULT_END_TIME);

    let (start_min, start_label) = parse_time_or_default(start_raw, DEFAULT_START_TIME);
    let (end_min, end_label) = parse_time_or_default(end_raw, DEFAULT_END_TIME);

    let frequency = req
        .frequency
        .as_deref()
        .map(Frequency::parse)
        .unwrap_or(client.recurrence_frequency);

    Ok(EffectiveSchedule {
        days,
        start_min,
        end_min,
        start_label,
        end_label,
        frequency,
        weeks: req.weeks_to_generate.unwrap_or(DEFAULT_HORIZON_WEEKS),
    })
}

fn parse_time_or_default(raw: &str, fallback: &str) -> (u32, String) {
    match parse_clock_time(raw) {
        Ok(min) => (min, format_clock_time(min)),
        Err(_) => {
            tracing::warn!(time = %raw, fallback = %fallback, "unparsable time, using fallback");
            let min = parse_clock_time(fallback).unwrap_or(9 * 60);
            (min, fallback.to_string())
        }
    }
}

/// Expands the client's recurrence configuration into concrete job creates
/// within the horizon. Pure: reads a snapshot, writes nothing. Dates already
/// carrying a job for this client count as skipped, which is what makes
/// repeated generation idempotent.
pub fn plan_generate(
    client: &Client,
    primary_cleaner: Option<&Cleaner>,
    req: &GenerateRequest,
    existing_dates: &HashSet<NaiveDate>,
    today: NaiveDate,
) -> Result<GeneratePlan> {
    let schedule = resolve_schedule(client, req)?;

    let cleaner_id = req
        .preferred_cleaner
        .clone()
        .or_else(|| client.preferred_cleaner_ids.first().cloned());

    let raw_duration = duration_hours(schedule.start_min, schedule.end_min);
    let stored_duration = if raw_duration > 0.0 {
        let rounded = raw_duration.round();
        if rounded > 0.0 {
            rounded
        } else {
            DEFAULT_DURATION_HOURS
        }
    } else {
        tracing::warn!(
            start = %schedule.start_label,
            end = %schedule.end_label,
            "window is not positive, using default duration"
        );
        DEFAULT_DURATION_HOURS
    };

    let pricing = match charge_and_rate(
        client.pricing_type,
        stored_duration,
        client.charge_per_cleaning,
        client.hourly_rate,
    ) {
        Ok(breakdown) => Some(breakdown),
        Err(e) => {
            tracing::warn!(client = %client.id, error = %e, "pricing incomplete, generating without amounts");
            None
        }
    };

    let profit = match (pricing, primary_cleaner) {
        (Some(breakdown), Some(cleaner)) => Some(
            payout_and_profit(breakdown.amount_charged, cleaner.hourly_rate, stored_duration)
                .profit,
        ),
        _ => None,
    };

    let horizon_end = today + Days::new(schedule.weeks as u64 * 7);
    let mut creates = Vec::new();
    let mut skipped = 0usize;
    let mut cursor = today;

    while cursor < horizon_end {
        for weekday in &schedule.days {
            let date = next_occurrence_of_weekday(*weekday, cursor);
            if date >= horizon_end {
                continue;
            }
            if date < today {
                continue;
            }
            if existing_dates.contains(&date) {
                skipped += 1;
                continue;
            }
            creates.push(NewJob {
                client_id: client.id.clone(),
                cleaner_ids: cleaner_id.clone().into_iter().collect(),
                date,
                start_time: schedule.start_label.clone(),
                end_time: schedule.end_label.clone(),
                duration_hours: stored_duration,
                status: JobStatus::Scheduled,
                amount_charged: pricing.map(|p| p.amount_charged),
                client_hourly_rate: pricing.map(|p| p.client_hourly_rate),
                profit,
                is_recurring: true,
                recurrence_frequency: schedule.frequency,
                bedrooms: client.bedrooms.filter(|b| *b > 0),
                bathrooms: client.bathrooms.filter(|b| *b > 0.0),
                address: client.address.clone().filter(|a| !a.is_empty()),
            });
        }
        cursor = advance_by_frequency(cursor, schedule.frequency);
    }

    creates.sort_by_key(|job| job.date);
    Ok(GeneratePlan { creates, skipped })
}
