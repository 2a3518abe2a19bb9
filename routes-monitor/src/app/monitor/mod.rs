mod clock;
mod cycle_report;
mod run;
mod traffic_monitor;

pub use clock::{Clock, SystemClock};
pub use cycle_report::{CycleReport, FetchOutcome, MonitorSummary};
pub use run::{run, MonitorRunOptions};
pub use traffic_monitor::TrafficMonitor;
