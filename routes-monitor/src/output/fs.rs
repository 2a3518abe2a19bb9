use std::path::Path;

use super::OutputError;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), OutputError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|source| OutputError::CreateDirectoryError {
            path: dirspath.to_string_lossy().to_string(),
            source,
        })
    } else {
        Ok(())
    }
}
