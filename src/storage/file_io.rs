//! File I/O utilities with atomic writes
//!
//! Data files are written to a temp file in the same directory and renamed
//! into place, so a crash leaves either the old or the new file intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TallyError;

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> TallyError {
    TallyError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Read a JSON data file; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, TallyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("{} does not exist, using defaults", path.display());
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Replace a JSON data file via a synced sibling temp file and a rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TallyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let write_temp = || -> Result<(), TallyError> {
        let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_err("serialize", path, e))?;
        writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| storage_err("sync", &temp_path, e))
    };

    if let Err(e) = write_temp().and_then(|_| {
        fs::rename(&temp_path, path).map_err(|e| storage_err("replace", path, e))
    }) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    log::debug!("Wrote {}", path.display());
    Ok(())
}
