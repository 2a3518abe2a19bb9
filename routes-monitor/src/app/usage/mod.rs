mod run;

pub use run::{format_usage_report, run};
