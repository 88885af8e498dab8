//! Reading and writing catalog files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use curio_engine::{Catalog, CollectionKind, Record};

use crate::config::Config;
use crate::error::{Result, SyncError};

/// Load one collection file.
///
/// A missing file reads as an empty collection, so the tool works
/// against a directory that has never held that collection yet.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(SyncError::filesystem(path, e)),
    };

    serde_json::from_str(&text).map_err(|e| SyncError::MalformedInput {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Write one collection file as pretty-printed JSON.
pub fn save_records(path: &Path, records: &[Record]) -> Result<()> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    fs::write(path, text).map_err(|e| SyncError::filesystem(path, e))
}

/// Load every collection file from a directory into a catalog.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::default();
    for kind in CollectionKind::ALL {
        let records = load_records(&Config::collection_path_in(dir, kind))?;
        catalog.set_records(kind, records);
    }
    Ok(catalog)
}
