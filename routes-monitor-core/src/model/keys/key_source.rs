use std::{collections::HashMap, path::PathBuf};

use super::{ApiKey, KeyManagerError};

/// prefix of the numbered key variables ROUTES_API_KEY_1, ROUTES_API_KEY_2, ...
pub const INDEXED_KEY_PREFIX: &str = "ROUTES_API_KEY_";
/// fallback variable holding a single key
pub const SINGLE_KEY_VAR: &str = "ROUTES_API_KEY";

/// where API keys are discovered.
#[derive(Clone, Debug)]
pub enum KeySource {
    /// the process environment, backed by an optional `.env` file. values set
    /// in the environment win over values in the file.
    Environment { dotenv_file: Option<PathBuf> },
    /// keys provided directly
    Static(Vec<String>),
}

impl KeySource {
    pub fn load(&self) -> Result<Vec<ApiKey>, KeyManagerError> {
        match self {
            KeySource::Environment { dotenv_file } => {
                let file_values = match dotenv_file {
                    Some(path) if path.is_file() => {
                        let contents = std::fs::read_to_string(path).map_err(|source| {
                            KeyManagerError::ReadError {
                                path: path.to_string_lossy().to_string(),
                                source,
                            }
                        })?;
                        log::debug!("read env file {}", path.to_string_lossy());
                        parse_dotenv(&contents)
                    }
                    Some(path) => {
                        log::debug!("no env file at {}", path.to_string_lossy());
                        HashMap::new()
                    }
                    None => HashMap::new(),
                };
                keys_from_lookup(|name| {
                    std::env::var(name)
                        .ok()
                        .or_else(|| file_values.get(name).cloned())
                })
            }
            KeySource::Static(keys) => {
                let keys = keys
                    .iter()
                    .filter(|k| !k.trim().is_empty())
                    .map(|k| ApiKey::new(k.trim()))
                    .collect::<Vec<_>>();
                if keys.is_empty() {
                    Err(KeyManagerError::NoKeysError)
                } else {
                    Ok(keys)
                }
            }
        }
    }
}

/// collects ROUTES_API_KEY_1..N, stopping at the first missing or empty index,
/// falling back to ROUTES_API_KEY when no numbered key is set.
pub fn keys_from_lookup<F>(lookup: F) -> Result<Vec<ApiKey>, KeyManagerError>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let mut keys = vec![];
    for i in 1.. {
        match present(&format!("{INDEXED_KEY_PREFIX}{i}")) {
            Some(key) => keys.push(ApiKey::new(key.trim())),
            None => break,
        }
    }
    if keys.is_empty() {
        if let Some(key) = present(SINGLE_KEY_VAR) {
            keys.push(ApiKey::new(key.trim()));
        }
    }
    if keys.is_empty() {
        return Err(KeyManagerError::NoKeysError);
    }
    log::info!("Loaded {} API key(s)", keys.len());
    Ok(keys)
}

/// parses KEY=VALUE lines of a `.env` file. blank lines and '#' comments are
/// skipped, an `export ` prefix is allowed, and matching quotes around a
/// value are removed.
pub fn parse_dotenv(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (name, value) = line.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    // trailing comments are only recognized on unquoted values
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}
