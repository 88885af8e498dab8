//! Paths used by every sync command.

use std::path::{Path, PathBuf};

use curio_engine::CollectionKind;

/// Filesystem layout of a catalog directory.
///
/// All paths derive from the data directory given on the command line,
/// so the whole catalog stays relocatable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the live catalog files.
    pub data_dir: PathBuf,
    /// Directory that receives timestamped snapshot folders.
    pub backup_root: PathBuf,
    /// Append-only log of archived conflict copies.
    pub merge_log: PathBuf,
}

impl Config {
    /// Build the layout rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let backup_root = data_dir.join("local_backups");
        let merge_log = data_dir.join("merge.log");
        Self {
            data_dir,
            backup_root,
            merge_log,
        }
    }

    /// Path of one collection file inside the data directory.
    pub fn collection_path(&self, kind: CollectionKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Path of one collection file inside an arbitrary directory.
    ///
    /// Used for reading the incoming state, which may live anywhere.
    pub fn collection_path_in(dir: &Path, kind: CollectionKind) -> PathBuf {
        dir.join(kind.file_name())
    }
}
