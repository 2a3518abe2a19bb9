#[derive(thiserror::Error, Debug)]
pub enum KeyManagerError {
    #[error("No API keys found. Set ROUTES_API_KEY or ROUTES_API_KEY_1 in .env")]
    NoKeysError,
    #[error(
        "All API keys exhausted for the month ({key_count} key(s) at {usage_limit} calls each)"
    )]
    KeysExhaustedError { key_count: usize, usage_limit: u64 },
    #[error("key usage limit must be greater than zero")]
    InvalidUsageLimitError,
    #[error("more than one API key ends in '{0}'; keys must differ in their last four characters")]
    DuplicateKeySuffixError(String),
    #[error("failure reading '{path}': {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing '{path}': {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure serializing key usage ledger '{path}': {source}")]
    LedgerCodecError {
        path: String,
        source: serde_json::Error,
    },
}

impl KeyManagerError {
    /// true for errors caused by how the monitor was set up rather than by
    /// what happened while it ran.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            KeyManagerError::NoKeysError
                | KeyManagerError::InvalidUsageLimitError
                | KeyManagerError::DuplicateKeySuffixError(_)
        )
    }
}
