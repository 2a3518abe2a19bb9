use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::SamplingPolicy;
use crate::model::route::RouteDefinition;

/// sampling interval for a route at a local time: the route's own interval
/// when set, otherwise whatever the policy says for that time of day.
pub fn interval_for(
    route: &RouteDefinition,
    policy: &SamplingPolicy,
    at: &DateTime<FixedOffset>,
) -> Duration {
    route.interval.unwrap_or_else(|| policy.interval_at(at))
}

/// tracks when each configured route is next due for sampling. indices match
/// the order of the route list the schedule was built for.
#[derive(Clone, Debug)]
pub struct RouteSchedule {
    next_due: Vec<DateTime<FixedOffset>>,
}

impl RouteSchedule {
    /// every route starts out due at `start`
    pub fn new(route_count: usize, start: DateTime<FixedOffset>) -> Self {
        Self {
            next_due: vec![start; route_count],
        }
    }

    pub fn len(&self) -> usize {
        self.next_due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next_due.is_empty()
    }

    /// routes due at `now`, in configuration order
    pub fn due_routes(&self, now: &DateTime<FixedOffset>) -> Vec<usize> {
        self.next_due
            .iter()
            .enumerate()
            .filter(|(_, due)| *due <= now)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// schedules the next sample of a route one interval after the cycle began.
    /// intervals are measured from the cycle start so time spent on requests
    /// does not push the schedule back.
    pub fn mark_sampled(
        &mut self,
        index: usize,
        cycle_start: &DateTime<FixedOffset>,
        interval: Duration,
    ) {
        if let Some(due) = self.next_due.get_mut(index) {
            let delta = TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX);
            *due = cycle_start
                .checked_add_signed(delta)
                .unwrap_or(DateTime::<Utc>::MAX_UTC.fixed_offset());
        }
    }

    pub fn next_due(&self) -> Option<DateTime<FixedOffset>> {
        self.next_due.iter().min().copied()
    }

    /// time to wait from `now` until the earliest route is due, floored at
    /// zero. None when there are no routes.
    pub fn next_wake(&self, now: &DateTime<FixedOffset>) -> Option<Duration> {
        self.next_due()
            .map(|due| (due - *now).to_std().unwrap_or(Duration::ZERO))
    }
}
