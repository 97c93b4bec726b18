use crate::domain::model::{Job, JobPatch, RescheduleRequest, RescheduleScope};
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct ReschedulePlan {
    pub patches: Vec<(String, JobPatch)>,
    pub day_diff: i64,
}

fn date_patch(date: chrono::NaiveDate) -> JobPatch {
    JobPatch {
        date: Some(date),
        ..Default::default()
    }
}

/// Computes the date moves for a reschedule. `Single` touches the one job;
/// `AllFuture` shifts every non-terminal job of the client dated on or after
/// the moved job's current date by the same signed day delta, the triggering
/// job included. A zero delta plans no writes.
pub fn plan_reschedule(jobs: &[Job], req: &RescheduleRequest) -> ReschedulePlan {
    let day_diff = (req.new_date - req.current_date).num_days();

    let patches = match req.scope {
        RescheduleScope::Single => {
            if day_diff == 0 {
                Vec::new()
            } else {
                vec![(req.job_id.clone(), date_patch(req.new_date))]
            }
        }
        RescheduleScope::AllFuture => {
            if day_diff == 0 {
                Vec::new()
            } else {
                jobs.iter()
                    .filter(|j| !j.is_terminal() && j.date >= req.current_date)
                    .map(|j| (j.id.clone(), date_patch(j.date + Duration::days(day_diff))))
                    .collect()
            }
        }
    };

    ReschedulePlan { patches, day_diff }
}
