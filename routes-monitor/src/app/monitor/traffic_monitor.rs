use chrono::{DateTime, FixedOffset};
use routes_monitor_core::model::{
    api::{constants::MONITOR_FIELD_MASK, departure_after, ComputeRoutesRequest, RoutesApi},
    keys::KeyManager,
    sample::TravelSample,
    schedule::{interval_for, RouteSchedule},
};

use super::{Clock, CycleReport, FetchOutcome, MonitorSummary};
use crate::{
    app::{config::MonitorConfig, MonitorError},
    output::SampleStore,
};

/// polls the Routes API for each configured route on its sampling schedule,
/// spending keys from the [`KeyManager`] and recording results in a
/// [`SampleStore`].
pub struct TrafficMonitor<A: RoutesApi, C: Clock> {
    config: MonitorConfig,
    key_manager: KeyManager,
    api: A,
    clock: C,
    store: SampleStore,
    schedule: RouteSchedule,
}

impl<A: RoutesApi, C: Clock> TrafficMonitor<A, C> {
    /// seeds key usage from the ledger in the store's directory. every route
    /// starts out due.
    pub fn new(
        config: MonitorConfig,
        key_manager: KeyManager,
        api: A,
        clock: C,
        store: SampleStore,
    ) -> Result<Self, MonitorError> {
        let start = clock.now();
        let key_manager = key_manager.attach_ledger(&store.ledger_path(), &start)?;
        let schedule = RouteSchedule::new(config.routes.len(), start);
        Ok(Self {
            config,
            key_manager,
            api,
            clock,
            store,
            schedule,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn key_manager(&self) -> &KeyManager {
        &self.key_manager
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// polls one route. API failures are logged and reported as
    /// [`FetchOutcome::Failed`]; key exhaustion and output errors are returned
    /// as errors. usage is counted for every call the service answered with a
    /// 2xx, including ones whose body could not be decoded.
    pub fn fetch_route(
        &mut self,
        index: usize,
        now: &DateTime<FixedOffset>,
    ) -> Result<FetchOutcome, MonitorError> {
        let route = self
            .config
            .routes
            .get(index)
            .ok_or(MonitorError::UnknownRouteError(index))?;
        self.key_manager.roll_period(now)?;
        let key = self.key_manager.active_key()?;

        let departure = departure_after(now, self.config.api.departure_lead);
        let request = ComputeRoutesRequest::new(
            route,
            &departure,
            self.config.api.compute_alternative_routes,
        );

        let response = match self.api.compute_routes(&key, &request, MONITOR_FIELD_MASK) {
            Ok(response) => response,
            Err(e) => {
                if e.is_billed() {
                    self.key_manager.record_usage(&key);
                    self.key_manager.persist()?;
                }
                log::error!("Error fetching route {}: {e}", route.id);
                println!("[{}] {}: ERROR {e}", now.format("%H:%M:%S"), route.id);
                return Ok(FetchOutcome::Failed(e));
            }
        };

        self.key_manager.record_usage(&key);
        self.key_manager.persist()?;
        self.store.write_raw(route, &response.raw, &key, now)?;

        let Some(leg) = response.first_route() else {
            log::warn!("No route found for {}", route.id);
            return Ok(FetchOutcome::NoRoute);
        };
        let sample = TravelSample::from_route_leg(route, leg, *now, &key);
        self.store.append_sample(&sample)?;
        log::info!(
            "Route {}: {}s (delay: {}s)",
            route.id,
            sample.duration_seconds,
            sample.delay_seconds
        );
        println!(
            "[{}] {}: {}s (delay: {}s)",
            now.format("%H:%M:%S"),
            route.id,
            sample.duration_seconds,
            sample.delay_seconds
        );
        Ok(FetchOutcome::Sampled(sample))
    }

    /// samples every due route, spacing requests apart, and schedules each
    /// route's next sample from the cycle start.
    pub fn run_cycle(&mut self) -> Result<CycleReport, MonitorError> {
        let cycle_start = self.clock.now();
        let interval = self.config.sampling.interval_at(&cycle_start);
        log::info!(
            "Collection cycle starting. Interval: {} min ({})",
            interval.as_secs() / 60,
            self.config.sampling.band_name_at(&cycle_start)
        );

        let due = self.schedule.due_routes(&cycle_start);
        let mut report = CycleReport::default();
        for (n, index) in due.into_iter().enumerate() {
            if n > 0 {
                self.clock.sleep(self.config.api.request_spacing);
            }
            let now = self.clock.now();
            let outcome = self.fetch_route(index, &now)?;
            report.add(&outcome);

            let route_interval =
                interval_for(&self.config.routes[index], &self.config.sampling, &cycle_start);
            self.schedule
                .mark_sampled(index, &cycle_start, route_interval);
        }
        report.next_wake = self.schedule.next_wake(&self.clock.now());
        log::info!(
            "cycle finished: {} attempted, {} sampled, {} without route, {} failed",
            report.attempted,
            report.succeeded,
            report.empty,
            report.failed
        );
        Ok(report)
    }

    /// runs collection cycles until `max_cycles` have completed, or forever
    /// when unbounded. stops early when there is nothing to monitor.
    /// `Some(0)` runs no cycles.
    pub fn run(&mut self, max_cycles: Option<usize>) -> Result<MonitorSummary, MonitorError> {
        log::info!(
            "Monitor started with {} routes, {} API keys ({} calls remaining this month)",
            self.config.routes.len(),
            self.key_manager.key_count(),
            self.key_manager.remaining_calls()
        );
        println!(
            "Monitoring {} routes with {} API keys. Output: {}",
            self.config.routes.len(),
            self.key_manager.key_count(),
            self.store.directory().to_string_lossy()
        );
        let mut summary = MonitorSummary::default();
        let finished =
            |summary: &MonitorSummary| max_cycles.is_some_and(|max| summary.cycles >= max);
        while !finished(&summary) {
            let report = self.run_cycle()?;
            summary.add(&report);
            let Some(wake) = report.next_wake else {
                log::warn!("no routes configured, stopping monitor");
                break;
            };
            if finished(&summary) {
                log::info!("completed {} cycles, stopping monitor", summary.cycles);
                break;
            }
            println!("Cycle complete. Next in {:.1} min", wake.as_secs_f64() / 60.0);
            self.clock.sleep(wake);
        }
        Ok(summary)
    }
}
