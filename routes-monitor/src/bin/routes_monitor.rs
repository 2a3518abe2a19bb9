use clap::Parser;
use routes_monitor::app::{MonitorCliArguments, MonitorError};

fn main() {
    let args = MonitorCliArguments::parse();
    match args.op.run() {
        Ok(()) => {}
        Err(MonitorError::ConfigNotFoundError(path)) => {
            eprintln!("Error: Config file not found: {path}");
            eprintln!("Create one from config/routes.example.json");
            std::process::exit(1);
        }
        Err(e) if e.is_configuration_error() => {
            log::error!("Configuration error: {e}");
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("Fatal error: {e}");
            eprintln!("Fatal error: {e}");
            std::process::exit(1);
        }
    }
}
