use std::path::Path;

use chrono::Local;
use routes_monitor_core::model::keys::KeyUsageLedger;

use crate::{app::MonitorError, output::SampleStore};

/// prints this month's per-key call counts from the ledger in `directory`.
pub fn run(directory: &Path, usage_limit: u64) -> Result<KeyUsageLedger, MonitorError> {
    let path = SampleStore::ledger_file(directory);
    let today = Local::now().date_naive();
    let ledger = KeyUsageLedger::load(&path, &today)?;
    log::debug!("read key usage ledger {}", path.to_string_lossy());
    println!("{}", format_usage_report(&ledger, usage_limit));
    Ok(ledger)
}

pub fn format_usage_report(ledger: &KeyUsageLedger, usage_limit: u64) -> String {
    if ledger.usage.is_empty() {
        return format!("No API calls recorded for {}", ledger.period);
    }
    let mut lines = vec![format!(
        "Key usage for {} (limit {usage_limit} per key):",
        ledger.period
    )];
    for (key, count) in ledger.usage.iter() {
        lines.push(format!(
            "  {key}: {count} ({} remaining)",
            usage_limit.saturating_sub(*count)
        ));
    }
    lines.push(format!("  total: {}", ledger.total()));
    lines.join("\n")
}

#[cfg(test)]
mod test {
    use super::{format_usage_report, run};
    use crate::output::SampleStore;
    use chrono::Local;
    use routes_monitor_core::model::keys::KeyUsageLedger;

    #[test]
    fn test_report() {
        let mut ledger = KeyUsageLedger::new(String::from("2026-10"));
        ledger.usage.insert(String::from("...1111"), 4800);
        ledger.usage.insert(String::from("...2222"), 12);
        let expected = [
            "Key usage for 2026-10 (limit 4800 per key):",
            "  ...1111: 4800 (0 remaining)",
            "  ...2222: 12 (4788 remaining)",
            "  total: 4812",
        ]
        .join("\n");
        assert_eq!(format_usage_report(&ledger, 4800), expected);
    }

    #[test]
    fn test_empty_report() {
        let ledger = KeyUsageLedger::new(String::from("2026-10"));
        assert_eq!(
            format_usage_report(&ledger, 4800),
            "No API calls recorded for 2026-10"
        );
    }

    #[test]
    fn test_run_reads_current_period() {
        let dir = tempfile::tempdir().unwrap();
        let today = Local::now().date_naive();
        let mut ledger = KeyUsageLedger::new(KeyUsageLedger::period_of(&today));
        ledger.usage.insert(String::from("...abcd"), 7);
        ledger.write(&SampleStore::ledger_file(dir.path())).unwrap();

        let loaded = run(dir.path(), 4800).unwrap();
        assert_eq!(loaded.get("...abcd"), 7);
    }

    #[test]
    fn test_run_without_ledger() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run(dir.path(), 4800).unwrap().total(), 0);
    }
}
