//! WHOIS age cache persistence.
//!
//! The cache is a single JSON object mapping domain to age in days, read in full
//! at startup and rewritten in full after every insert. Entries never expire:
//! a domain that failed once keeps its sentinel and is not queried again.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error_handling::CacheError;

/// Persistent domain -> age-in-days mapping with write-through persistence.
///
/// Not safe for concurrent writers: two processes sharing one file race on the
/// rewrite and the last writer wins.
#[derive(Debug)]
pub struct WhoisCache {
    path: PathBuf,
    entries: BTreeMap<String, f64>,
}

impl WhoisCache {
    /// Loads the cache stored at `path`.
    ///
    /// A missing file yields an empty cache bound to `path`; it is created on the
    /// first `put`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Read` if the file exists but cannot be read, and
    /// `CacheError::Parse` if its content is not a JSON object of numbers.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "No WHOIS cache at {}, starting with an empty one",
                    path.display()
                );
                return Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                });
            }
            Err(source) => return Err(CacheError::Read { path, source }),
        };

        let entries: BTreeMap<String, f64> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(source) => return Err(CacheError::Parse { path, source }),
        };

        log::info!(
            "Loaded {} WHOIS cache entr{} from {}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            path.display()
        );

        Ok(Self { path, entries })
    }

    /// Returns the cached age for `domain`, sentinel included.
    pub fn get(&self, domain: &str) -> Option<f64> {
        self.entries.get(domain).copied()
    }

    /// Inserts or overwrites an entry and rewrites the whole file.
    ///
    /// The in-memory entry is kept even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Write` or `CacheError::Serialize` if persisting fails.
    pub fn put(&mut self, domain: &str, age_days: f64) -> Result<(), CacheError> {
        self.entries.insert(domain.to_string(), age_days);
        self.persist()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.entries.contains_key(domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the mapping to a temp file next to the target, then renames it over
    /// the target so a crash mid-write never leaves a truncated cache.
    fn persist(&self) -> Result<(), CacheError> {
        let content = serde_json::to_vec(&self.entries)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_err = |source| CacheError::Write {
            path: self.path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(write_err)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        // Temp files are created owner-only; keep the mode of the file being replaced
        if let Ok(existing) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?;
        }
        tmp.write_all(&content).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        log::trace!(
            "Persisted {} WHOIS cache entries to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
