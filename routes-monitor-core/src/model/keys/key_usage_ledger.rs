use std::{collections::BTreeMap, path::Path};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::KeyManagerError;

/// monthly API call counts per key, persisted between runs so a restart does
/// not forget how much of each key's quota has been spent. keys are stored by
/// their masked label only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyUsageLedger {
    /// calendar month the counts belong to, as "YYYY-MM"
    pub period: String,
    pub usage: BTreeMap<String, u64>,
}

impl KeyUsageLedger {
    pub const FILENAME: &'static str = "key_usage.json";

    pub fn new(period: String) -> Self {
        Self {
            period,
            usage: BTreeMap::new(),
        }
    }

    pub fn period_of<T: Datelike>(date: &T) -> String {
        format!("{:04}-{:02}", date.year(), date.month())
    }

    /// reads a ledger for the period containing `today`. a missing file, or a
    /// file from an earlier period, yields an empty ledger.
    pub fn load<T: Datelike>(path: &Path, today: &T) -> Result<Self, KeyManagerError> {
        let period = KeyUsageLedger::period_of(today);
        if !path.is_file() {
            return Ok(KeyUsageLedger::new(period));
        }
        let path_str = path.to_string_lossy().to_string();
        let contents =
            std::fs::read_to_string(path).map_err(|source| KeyManagerError::ReadError {
                path: path_str.clone(),
                source,
            })?;
        let stored: KeyUsageLedger = serde_json::from_str(&contents)
            .map_err(|source| KeyManagerError::LedgerCodecError {
                path: path_str.clone(),
                source,
            })?;
        if stored.period == period {
            Ok(stored)
        } else {
            log::info!(
                "key usage ledger {path_str} is from period {}, starting fresh for {period}",
                stored.period
            );
            Ok(KeyUsageLedger::new(period))
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), KeyManagerError> {
        let path_str = path.to_string_lossy().to_string();
        let contents = serde_json::to_string_pretty(self).map_err(|source| {
            KeyManagerError::LedgerCodecError {
                path: path_str.clone(),
                source,
            }
        })?;
        std::fs::write(path, contents).map_err(|source| KeyManagerError::WriteError {
            path: path_str,
            source,
        })
    }

    pub fn get(&self, label: &str) -> u64 {
        self.usage.get(label).copied().unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.usage.values().sum()
    }
}
