use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{HotelbookError, Result};
use crate::models::Record;

/// One entity collection persisted as a JSON array in a single file.
///
/// Every `save` rewrites the whole file. The write goes to a temp file in the
/// same directory that is then renamed over the target, so a failed save
/// leaves the previous contents in place.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    strict: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict: false,
            _marker: PhantomData,
        }
    }

    /// In strict mode an unreadable or malformed file, or one holding a record
    /// that fails validation, is an error instead of an empty collection.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the full collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<T>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return self.degrade(e.to_string()),
        };

        let records = match serde_json::from_str::<Vec<T>>(&contents) {
            Ok(records) => records,
            Err(e) => return self.degrade(e.to_string()),
        };
        if let Some(e) = records.iter().find_map(|r| r.validate().err()) {
            return self.degrade(e.to_string());
        }

        debug!(
            entity = T::ENTITY,
            count = records.len(),
            path = %self.path.display(),
            "loaded collection"
        );
        Ok(records)
    }

    /// Overwrite the backing file with `records`.
    pub fn save(&self, records: &[T]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;
        buf.push(b'\n');

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&buf)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| HotelbookError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!(
            entity = T::ENTITY,
            count = records.len(),
            path = %self.path.display(),
            "saved collection"
        );
        Ok(())
    }

    fn degrade(&self, reason: String) -> Result<Vec<T>> {
        if self.strict {
            return Err(HotelbookError::CorruptStore {
                path: self.path.clone(),
                reason,
            });
        }
        warn!(
            entity = T::ENTITY,
            path = %self.path.display(),
            "invalid {} store file, treating as empty: {reason}",
            T::ENTITY
        );
        Ok(Vec::new())
    }
}
