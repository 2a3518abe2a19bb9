use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use chrono::{DateTime, FixedOffset};
use routes_monitor_core::model::{
    keys::{ApiKey, KeyUsageLedger},
    route::{RouteDefinition, RouteId},
    sample::TravelSample,
};
use serde::Serialize;

use super::{create_dirs, OutputError};

/// local output directory for the monitor: one raw JSON file per successful
/// API call, an append-only CSV of samples, and the key usage ledger.
#[derive(Clone, Debug)]
pub struct SampleStore {
    directory: PathBuf,
    write_raw: bool,
}

/// envelope around an archived API response
#[derive(Serialize)]
struct RawResponseRecord<'a> {
    timestamp: String,
    route_id: &'a RouteId,
    route_name: Option<&'a str>,
    api_key_suffix: String,
    response: &'a serde_json::Value,
}

impl SampleStore {
    pub const SAMPLES_FILENAME: &'static str = "samples.csv";

    pub fn new(directory: &Path, write_raw: bool) -> Result<Self, OutputError> {
        create_dirs(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            write_raw,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn samples_path(&self) -> PathBuf {
        self.directory.join(SampleStore::SAMPLES_FILENAME)
    }

    pub fn ledger_path(&self) -> PathBuf {
        SampleStore::ledger_file(&self.directory)
    }

    /// key usage ledger kept in an output directory. the monitor and the
    /// snapshot share it so both spend from the same monthly quota.
    pub fn ledger_file(directory: &Path) -> PathBuf {
        directory.join(KeyUsageLedger::FILENAME)
    }

    /// archives a raw API response as `{route_id}_{YYYYmmdd_HHMMSS}.json`.
    /// returns the written path, or None when the raw archive is disabled.
    pub fn write_raw(
        &self,
        route: &RouteDefinition,
        response: &serde_json::Value,
        key: &ApiKey,
        timestamp: &DateTime<FixedOffset>,
    ) -> Result<Option<PathBuf>, OutputError> {
        if !self.write_raw {
            return Ok(None);
        }
        let filename = format!("{}_{}.json", route.id, timestamp.format("%Y%m%d_%H%M%S"));
        let path = self.directory.join(filename);
        let path_str = path.to_string_lossy().to_string();
        let record = RawResponseRecord {
            timestamp: timestamp.to_rfc3339(),
            route_id: &route.id,
            route_name: route.name.as_deref(),
            api_key_suffix: key.suffix(),
            response,
        };
        let contents =
            serde_json::to_string_pretty(&record).map_err(|source| OutputError::JsonError {
                path: path_str.clone(),
                source,
            })?;
        std::fs::write(&path, contents).map_err(|source| OutputError::WriteError {
            path: path_str,
            source,
        })?;
        log::debug!("wrote raw response {}", path.to_string_lossy());
        Ok(Some(path))
    }

    /// appends one row to the samples CSV, writing the header when the file is new.
    pub fn append_sample(&self, sample: &TravelSample) -> Result<(), OutputError> {
        let path = self.samples_path();
        let path_str = path.to_string_lossy().to_string();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| OutputError::WriteError {
                path: path_str.clone(),
                source,
            })?;
        let is_empty = file
            .metadata()
            .map(|m| m.len() == 0)
            .map_err(|source| OutputError::WriteError {
                path: path_str.clone(),
                source,
            })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);
        writer
            .serialize(sample)
            .map_err(|source| OutputError::CsvError {
                path: path_str.clone(),
                source,
            })?;
        writer.flush().map_err(|source| OutputError::WriteError {
            path: path_str,
            source,
        })
    }

    /// reads every sample recorded so far
    pub fn read_samples(&self) -> Result<Vec<TravelSample>, OutputError> {
        let path = self.samples_path();
        if !path.is_file() {
            return Ok(vec![]);
        }
        let path_str = path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(|source| OutputError::CsvError {
                path: path_str.clone(),
                source,
            })?;
        reader
            .deserialize()
            .map(|row| {
                row.map_err(|source| OutputError::CsvError {
                    path: path_str.clone(),
                    source,
                })
            })
            .collect()
    }
}
