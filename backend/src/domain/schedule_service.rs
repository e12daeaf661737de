//! Scheduling patterns onto devices.
//!
//! A schedule may only pair a device and a pattern that both belong to the
//! caller, and only the owner of the schedule's device may delete it. Both
//! rules are enforced inside the single store statement.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::ScheduleRepository;
use crate::domain::{
    Error, MutationOutcome, NewSchedule, ScheduleId, ScheduledPattern, UserPrincipal,
};

#[derive(Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn ScheduleRepository>,
}

impl ScheduleService {
    pub fn new(schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedules }
    }

    pub async fn create_schedule(
        &self,
        owner: &UserPrincipal,
        schedule: NewSchedule,
    ) -> Result<ScheduledPattern, Error> {
        let created = self.schedules.insert_owned(owner.id, &schedule).await?;
        let Some(created) = created else {
            debug!(
                device_id = %schedule.device_id,
                pattern_id = %schedule.pattern_id,
                "schedule insert matched no owned device and pattern"
            );
            return Err(Error::not_found_or_not_owned(
                "device or pattern not found or not owned",
            ));
        };
        info!(schedule_id = %created.id, "pattern scheduled");
        Ok(created)
    }

    pub async fn delete_schedule(&self, owner: &UserPrincipal, id: ScheduleId) -> Result<(), Error> {
        let outcome = self.schedules.delete_owned(owner.id, id).await?;
        if outcome == MutationOutcome::NoMatch {
            debug!(schedule_id = %id, "schedule delete matched no row");
        }
        outcome.require_match("scheduled pattern")?;
        Ok(())
    }
}
