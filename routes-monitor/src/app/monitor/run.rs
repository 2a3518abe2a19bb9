use std::path::PathBuf;

use routes_monitor_core::model::{
    api::GoogleRoutesClient,
    keys::{KeyManager, KeySource},
};

use super::{MonitorSummary, SystemClock, TrafficMonitor};
use crate::{
    app::{config::MonitorConfig, MonitorError},
    output::SampleStore,
};

#[derive(Clone, Debug)]
pub struct MonitorRunOptions {
    pub config_file: PathBuf,
    pub output_directory: PathBuf,
    /// optional `.env` file consulted for keys missing from the environment
    pub env_file: Option<PathBuf>,
    pub max_cycles: Option<usize>,
    pub write_raw: bool,
}

/// loads configuration and keys, then runs the monitor against the live API
/// on the system clock.
pub fn run(options: &MonitorRunOptions) -> Result<MonitorSummary, MonitorError> {
    let config = MonitorConfig::from_file(&options.config_file)?;
    let source = KeySource::Environment {
        dotenv_file: options.env_file.clone(),
    };
    let key_manager =
        KeyManager::from_source(&source, config.api.usage_limit, config.api.rotation)?;
    let api = GoogleRoutesClient::new(&config.api.endpoint, config.api.timeout)?;
    let store = SampleStore::new(&options.output_directory, options.write_raw)?;
    log::info!(
        "writing samples to {}",
        store.samples_path().to_string_lossy()
    );
    let mut monitor = TrafficMonitor::new(config, key_manager, api, SystemClock, store)?;
    let summary = monitor.run(options.max_cycles)?;
    log::info!(
        "monitor finished after {} cycles: {} sampled, {} without route, {} failed",
        summary.cycles,
        summary.succeeded,
        summary.empty,
        summary.failed
    );
    Ok(summary)
}
