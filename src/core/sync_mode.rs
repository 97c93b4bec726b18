use crate::core::timeutil::{next_occurrence_of_weekday, parse_weekday};
use crate::domain::model::{Frequency, Job, JobPatch, SyncRequest};
use chrono::{Days, NaiveDate, Weekday};

/// Reconciles a client's existing future jobs against an updated schedule.
/// Instances keep their identity; this is an update pass, never a
/// delete-and-recreate. Terminal and past jobs are filtered out before any
/// target date is computed.
///
/// Date assignment walks the updated weekday list cyclically over the jobs
/// in ascending date order. The cursor only advances once a full weekday
/// cycle has been consumed, and lands strictly past the just-assigned date:
/// +1d (weekly), +8d (biweekly), +22d (monthly). That table is intentionally
/// not `timeutil::advance_by_frequency`, which advances from a period start.
pub fn plan_sync(
    jobs: &[Job],
    req: &SyncRequest,
    frequency: Frequency,
    today: NaiveDate,
) -> Vec<(String, JobPatch)> {
    let mut candidates: Vec<&Job> = jobs
        .iter()
        .filter(|j| !j.is_terminal() && j.is_future(today))
        .collect();
    candidates.sort_by_key(|j| j.date);

    let days: Vec<Weekday> = req
        .recurring_days
        .as_ref()
        .map(|names| names.iter().filter_map(|n| parse_weekday(n)).collect())
        .unwrap_or_default();

    let new_cleaner = req
        .preferred_cleaner
        .as_ref()
        .filter(|c| !c.trim().is_empty());

    let mut patches = Vec::new();
    let mut cursor = today;

    for (i, job) in candidates.iter().enumerate() {
        let mut patch = JobPatch::default();

        if let Some(start) = &req.recurring_start_time {
            if job.start_time.as_deref() != Some(start.as_str()) {
                patch.start_time = Some(start.clone());
            }
        }
        if let Some(end) = &req.recurring_end_time {
            if job.end_time.as_deref() != Some(end.as_str()) {
                patch.end_time = Some(end.clone());
            }
        }
        if let Some(cleaner) = new_cleaner {
            if job.cleaner_ids.len() != 1 || job.cleaner_ids.first() != Some(cleaner) {
                patch.cleaner_ids = Some(vec![cleaner.clone()]);
            }
        }

        if !days.is_empty() {
            let day_index = i % days.len();
            let target_day = days[day_index];
            let new_date = next_occurrence_of_weekday(target_day, cursor);
            if new_date != job.date {
                patch.date = Some(new_date);
            }

            // advance only after consuming a full weekday cycle
            if day_index == days.len() - 1 {
                let step = match frequency {
                    Frequency::Weekly => 1,
                    Frequency::BiWeekly => 8,
                    Frequency::Monthly => 22,
                };
                cursor = new_date + Days::new(step);
            }
        }

        if !patch.is_empty() {
            patches.push((job.id.clone(), patch));
        }
    }

    patches
}
