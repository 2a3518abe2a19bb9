use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use env_logger::{Env, Target};

use super::MonitorError;

/// writes every log record to stderr and appends it to a log file.
pub struct TeeWriter {
    file: File,
}

impl TeeWriter {
    pub fn open(path: &Path) -> Result<TeeWriter, MonitorError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                MonitorError::LoggingError(format!(
                    "unable to open log file {}: {e}",
                    path.to_string_lossy()
                ))
            })?;
        Ok(TeeWriter { file })
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()?;
        self.file.flush()
    }
}

/// sets up env_logger with an `info` default (overridden by RUST_LOG) and the
/// "YYYY-mm-dd HH:MM:SS - LEVEL - message" format. when a log file is given,
/// records are also appended to it.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), MonitorError> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });
    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(TeeWriter::open(path)?)));
    }
    builder
        .try_init()
        .map_err(|e| MonitorError::LoggingError(e.to_string()))
}

#[cfg(test)]
mod test {
    use super::TeeWriter;
    use std::io::Write;

    #[test]
    fn test_tee_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traffic_monitor.log");
        std::fs::write(&path, "existing\n").unwrap();

        let mut tee = TeeWriter::open(&path).unwrap();
        writeln!(tee, "2026-10-16 08:00:00 - INFO - Monitor started").unwrap();
        tee.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "existing\n2026-10-16 08:00:00 - INFO - Monitor started\n"
        );
    }

    #[test]
    fn test_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("traffic_monitor.log");
        assert!(TeeWriter::open(&path).is_err());
    }
}
