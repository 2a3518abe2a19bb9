use std::path::{Path, PathBuf};

use clap::{builder::RangedU64ValueParser, Parser, Subcommand};
use routes_monitor_core::model::keys::KeyManager;
use serde::{Deserialize, Serialize};

use super::{
    logging,
    monitor::{self, MonitorRunOptions},
    snapshot::{self, SnapshotOptions},
    usage, MonitorError,
};

/// Records travel-time and delay samples for configured routes from the Google Routes API
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct MonitorCliArguments {
    #[command(subcommand)]
    pub op: MonitorOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum MonitorOperation {
    /// poll every configured route on a variable schedule, writing samples to the output directory
    Run {
        /// routes configuration file (JSON, or TOML by extension)
        #[arg(short, long, default_value_t = String::from("config/routes.json"))]
        config: String,
        /// directory for raw responses, samples.csv and the key usage ledger
        #[arg(short, long, default_value_t = String::from("data/raw"))]
        output: String,
        /// file that log records are appended to
        #[arg(long, default_value_t = String::from("traffic_monitor.log"))]
        log_file: String,
        /// .env file read for API keys not set in the environment
        #[arg(long, default_value_t = String::from(".env"))]
        env_file: String,
        /// stop after this many collection cycles
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        max_cycles: Option<usize>,
        /// do not archive raw API responses
        #[arg(long)]
        no_raw: bool,
    },
    /// fetch every route once and write a GeoJSON map of current travel times
    Snapshot {
        #[arg(short, long, default_value_t = String::from("config/routes.json"))]
        config: String,
        /// GeoJSON output file. route data is written beside it as .json
        #[arg(short, long, default_value_t = String::from("output/routes_map.geojson"))]
        output: String,
        #[arg(long, default_value_t = String::from(".env"))]
        env_file: String,
        #[arg(long)]
        log_file: Option<String>,
        /// monitor output directory whose key usage ledger is shared
        #[arg(long, default_value_t = String::from("data/raw"))]
        usage_dir: String,
    },
    /// print this month's API call count per key
    Usage {
        /// monitor output directory holding key_usage.json
        #[arg(short, long, default_value_t = String::from("data/raw"))]
        output: String,
        #[arg(long, default_value_t = KeyManager::DEFAULT_USAGE_LIMIT)]
        usage_limit: u64,
    },
}

impl MonitorOperation {
    pub fn run(&self) -> Result<(), MonitorError> {
        match self {
            MonitorOperation::Run {
                config,
                output,
                log_file,
                env_file,
                max_cycles,
                no_raw,
            } => {
                logging::init_logging(Some(Path::new(log_file)))?;
                let options = MonitorRunOptions {
                    config_file: PathBuf::from(config),
                    output_directory: PathBuf::from(output),
                    env_file: Some(PathBuf::from(env_file)),
                    max_cycles: *max_cycles,
                    write_raw: !no_raw,
                };
                monitor::run(&options)?;
                Ok(())
            }
            MonitorOperation::Snapshot {
                config,
                output,
                env_file,
                log_file,
                usage_dir,
            } => {
                logging::init_logging(log_file.as_deref().map(Path::new))?;
                let options = SnapshotOptions {
                    config_file: PathBuf::from(config),
                    output_file: PathBuf::from(output),
                    env_file: Some(PathBuf::from(env_file)),
                    usage_directory: PathBuf::from(usage_dir),
                };
                snapshot::run(&options)?;
                Ok(())
            }
            MonitorOperation::Usage {
                output,
                usage_limit,
            } => {
                logging::init_logging(None)?;
                usage::run(Path::new(output), *usage_limit)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{MonitorCliArguments, MonitorOperation};
    use clap::Parser;

    #[test]
    fn test_run_defaults() {
        let args = MonitorCliArguments::try_parse_from(["routes_monitor", "run"]).unwrap();
        match args.op {
            MonitorOperation::Run {
                config,
                output,
                log_file,
                env_file,
                max_cycles,
                no_raw,
            } => {
                assert_eq!(config, "config/routes.json");
                assert_eq!(output, "data/raw");
                assert_eq!(log_file, "traffic_monitor.log");
                assert_eq!(env_file, ".env");
                assert_eq!(max_cycles, None);
                assert!(!no_raw);
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_run_flags() {
        let args = MonitorCliArguments::try_parse_from([
            "routes_monitor",
            "run",
            "-c",
            "my_routes.toml",
            "-o",
            "out",
            "--max-cycles",
            "3",
            "--no-raw",
        ])
        .unwrap();
        match args.op {
            MonitorOperation::Run {
                config,
                output,
                max_cycles,
                no_raw,
                ..
            } => {
                assert_eq!(config, "my_routes.toml");
                assert_eq!(output, "out");
                assert_eq!(max_cycles, Some(3));
                assert!(no_raw);
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_zero_max_cycles_rejected() {
        let result =
            MonitorCliArguments::try_parse_from(["routes_monitor", "run", "--max-cycles", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_defaults() {
        let args = MonitorCliArguments::try_parse_from(["routes_monitor", "snapshot"]).unwrap();
        match args.op {
            MonitorOperation::Snapshot {
                output, log_file, ..
            } => {
                assert_eq!(output, "output/routes_map.geojson");
                assert_eq!(log_file, None);
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_usage_limit_default() {
        let args = MonitorCliArguments::try_parse_from(["routes_monitor", "usage"]).unwrap();
        assert!(matches!(
            args.op,
            MonitorOperation::Usage {
                usage_limit: 4800,
                ..
            }
        ));
    }
}
