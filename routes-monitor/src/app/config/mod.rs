mod api_config;
mod monitor_config;

pub use api_config::ApiConfig;
pub use monitor_config::MonitorConfig;
