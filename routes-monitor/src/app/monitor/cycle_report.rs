use std::time::Duration;

use routes_monitor_core::model::{api::RoutesApiError, sample::TravelSample};
use serde::Serialize;

/// result of polling one route.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// the API returned a route and a sample was recorded
    Sampled(TravelSample),
    /// the call succeeded but the response held no route
    NoRoute,
    /// the call failed and nothing was written
    Failed(RoutesApiError),
}

/// tally of one collection cycle
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CycleReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub empty: usize,
    pub failed: usize,
    /// time until the next route is due, None when no routes are configured
    pub next_wake: Option<Duration>,
}

impl CycleReport {
    pub fn add(&mut self, outcome: &FetchOutcome) {
        self.attempted += 1;
        match outcome {
            FetchOutcome::Sampled(_) => self.succeeded += 1,
            FetchOutcome::NoRoute => self.empty += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// totals across every cycle of a run
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MonitorSummary {
    pub cycles: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub empty: usize,
    pub failed: usize,
}

impl MonitorSummary {
    pub fn add(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.attempted += report.attempted;
        self.succeeded += report.succeeded;
        self.empty += report.empty;
        self.failed += report.failed;
    }
}
