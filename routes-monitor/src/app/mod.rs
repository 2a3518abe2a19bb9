mod monitor_cli;
mod monitor_error;

pub mod config;
pub mod logging;
pub mod monitor;
pub mod snapshot;
pub mod usage;

#[cfg(test)]
pub(crate) mod test_util;

pub use monitor_cli::{MonitorCliArguments, MonitorOperation};
pub use monitor_error::MonitorError;
