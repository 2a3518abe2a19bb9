use std::path::{Path, PathBuf};

use chrono::Datelike;
use itertools::Itertools;

use super::{ApiKey, KeyManagerError, KeySource, KeyUsageLedger, RotationPolicy};

/// rotates among API keys so that no key passes its usage limit.
///
/// usage counts are per calendar month. when a ledger file is attached, counts
/// are seeded from it and written back by [`KeyManager::persist`].
#[derive(Debug)]
pub struct KeyManager {
    keys: Vec<ApiKey>,
    usage: Vec<u64>,
    current_index: usize,
    usage_limit: u64,
    policy: RotationPolicy,
    period: String,
    ledger_file: Option<PathBuf>,
}

impl KeyManager {
    /// safety threshold below the provider's 5000 free calls per month
    pub const DEFAULT_USAGE_LIMIT: u64 = 4800;

    /// builds a manager over `keys`. duplicate keys are collapsed.
    ///
    /// the usage ledger stores counts by masked key, so distinct keys that
    /// share a masked suffix are rejected.
    pub fn new(
        keys: Vec<ApiKey>,
        usage_limit: u64,
        policy: RotationPolicy,
    ) -> Result<Self, KeyManagerError> {
        if usage_limit == 0 {
            return Err(KeyManagerError::InvalidUsageLimitError);
        }
        let keys = keys.into_iter().unique().collect_vec();
        if keys.is_empty() {
            return Err(KeyManagerError::NoKeysError);
        }
        if let Some(suffix) = keys.iter().map(|k| k.suffix()).duplicates().next() {
            return Err(KeyManagerError::DuplicateKeySuffixError(suffix));
        }
        let usage = vec![0; keys.len()];
        Ok(Self {
            keys,
            usage,
            current_index: 0,
            usage_limit,
            policy,
            period: String::new(),
            ledger_file: None,
        })
    }

    pub fn from_source(
        source: &KeySource,
        usage_limit: u64,
        policy: RotationPolicy,
    ) -> Result<Self, KeyManagerError> {
        let keys = source.load()?;
        KeyManager::new(keys, usage_limit, policy)
    }

    /// seeds usage counts from the ledger at `path` for the month containing
    /// `today`, and keeps `path` as the destination for [`KeyManager::persist`].
    pub fn attach_ledger<T: Datelike>(
        mut self,
        path: &Path,
        today: &T,
    ) -> Result<Self, KeyManagerError> {
        let ledger = KeyUsageLedger::load(path, today)?;
        for (idx, key) in self.keys.iter().enumerate() {
            self.usage[idx] = ledger.get(&key.masked());
        }
        self.period = ledger.period;
        self.ledger_file = Some(path.to_path_buf());
        Ok(self)
    }

    /// returns a key whose usage is below the limit, rotating past exhausted keys.
    pub fn active_key(&mut self) -> Result<ApiKey, KeyManagerError> {
        let n = self.keys.len();
        for offset in 0..n {
            let idx = (self.current_index + offset) % n;
            if self.usage[idx] < self.usage_limit {
                self.current_index = match self.policy {
                    RotationPolicy::Sticky => idx,
                    RotationPolicy::RoundRobin => (idx + 1) % n,
                };
                return Ok(self.keys[idx].clone());
            }
            match self.policy {
                RotationPolicy::Sticky => log::warn!(
                    "Key {} exhausted ({} calls). Rotating.",
                    self.keys[idx],
                    self.usage[idx]
                ),
                RotationPolicy::RoundRobin => log::debug!(
                    "skipping exhausted key {} ({} calls)",
                    self.keys[idx],
                    self.usage[idx]
                ),
            }
        }
        Err(KeyManagerError::KeysExhaustedError {
            key_count: n,
            usage_limit: self.usage_limit,
        })
    }

    /// counts one successful call against `key`. unknown keys are ignored.
    pub fn record_usage(&mut self, key: &ApiKey) {
        if let Some(idx) = self.keys.iter().position(|k| k == key) {
            self.usage[idx] += 1;
        }
    }

    /// starts a fresh month of usage when `today` falls outside the current
    /// period. returns true when the counts were reset.
    pub fn roll_period<T: Datelike>(&mut self, today: &T) -> Result<bool, KeyManagerError> {
        let period = KeyUsageLedger::period_of(today);
        if period == self.period {
            return Ok(false);
        }
        let was_tracking = !self.period.is_empty();
        if was_tracking {
            log::info!(
                "usage period changed from {} to {period}, resetting key usage",
                self.period
            );
        }
        self.period = period;
        self.usage.iter_mut().for_each(|u| *u = 0);
        self.current_index = 0;
        self.persist()?;
        Ok(was_tracking)
    }

    /// writes current counts to the attached ledger file, if any.
    pub fn persist(&self) -> Result<(), KeyManagerError> {
        match &self.ledger_file {
            Some(path) => self.ledger().write(path),
            None => Ok(()),
        }
    }

    pub fn ledger(&self) -> KeyUsageLedger {
        let mut ledger = KeyUsageLedger::new(self.period.clone());
        for (key, count) in self.keys.iter().zip(self.usage.iter()) {
            ledger.usage.insert(key.masked(), *count);
        }
        ledger
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn usage_limit(&self) -> u64 {
        self.usage_limit
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// calls still available across all keys this period
    pub fn remaining_calls(&self) -> u64 {
        self.usage
            .iter()
            .map(|u| self.usage_limit.saturating_sub(*u))
            .sum()
    }

    /// masked key label and usage count, in key order
    pub fn usage_summary(&self) -> Vec<(String, u64)> {
        self.keys
            .iter()
            .zip(self.usage.iter())
            .map(|(k, u)| (k.masked(), *u))
            .collect_vec()
    }
}
