use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("error building output directory '{path}': {source}")]
    CreateDirectoryError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing '{path}': {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV failure on '{path}': {source}")]
    CsvError { path: String, source: csv::Error },
    #[error("failure encoding JSON for '{path}': {source}")]
    JsonError {
        path: String,
        source: serde_json::Error,
    },
}
