//! Filesystem-backed document store.
//!
//! The store owns one root directory of markdown documents. Every operation
//! first calls [`DocumentStore::ensure_initialized`], which creates the root
//! together with the bootstrap catalog the first time it is needed.

mod catalog;
mod error;
pub mod section;

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDateTime};

pub use catalog::{render, template_for, BOOTSTRAP_CATALOG, TIMESTAMP_PLACEHOLDER};
pub use error::{Result, StoreError};

use crate::config::Config;
use crate::models::*;

/// Source of the instant rendered into entries and templates.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

#[derive(Clone)]
pub struct DocumentStore {
    root: PathBuf,
    extension: String,
    clock: Clock,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("root", &self.root)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(&Config::new(root))
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.root.clone(),
            extension: config.extension.clone(),
            clock: Arc::new(|| Local::now().naive_local()),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Replace the clock used for entry and template timestamps.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn timestamp(&self) -> String {
        section::format_timestamp((self.clock)())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    // ============================================================
    // Initialization
    // ============================================================

    /// Create the root directory and bootstrap documents if the root is absent.
    ///
    /// An existing root is left alone, even when catalog documents are
    /// missing from it. Safe to call concurrently.
    pub fn ensure_initialized(&self) -> Result<()> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => return Ok(()),
            Ok(_) => {
                return Err(StoreError::io(
                    format!("Invalid store root {}", self.root.display()),
                    io::Error::other("not a directory"),
                ))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StoreError::io(
                    format!("Failed to inspect {}", self.root.display()),
                    e,
                ))
            }
        }

        // create_dir_all treats a directory created by a racing caller as success.
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::io(format!("Failed to create {}", self.root.display()), e)
        })?;
        tracing::info!("Created memory bank at {}", self.root.display());

        let timestamp = self.timestamp();
        for (name, template) in BOOTSTRAP_CATALOG {
            // Held across create and write so a concurrent append never sees the empty file.
            let lock = self.document_lock(name);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

            let path = self.path_for(name);
            let file = OpenOptions::new().write(true).create_new(true).open(&path);
            match file {
                Ok(mut file) => {
                    file.write_all(render(template, &timestamp).as_bytes())
                        .map_err(|e| StoreError::io(format!("Failed to write {}", name), e))?;
                    tracing::debug!("Created bootstrap document {}", name);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => {
                    return Err(StoreError::io(format!("Failed to create {}", name), e));
                }
            }
        }

        Ok(())
    }

    // ============================================================
    // Listing and reading
    // ============================================================

    /// Names of all documents carrying the configured extension, sorted.
    pub fn list_documents(&self) -> Result<Vec<String>> {
        self.ensure_initialized()?;

        let entries = fs::read_dir(&self.root).map_err(|e| {
            StoreError::io(format!("Failed to list {}", self.root.display()), e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StoreError::io(format!("Failed to list {}", self.root.display()), e)
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if !matches {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Read the named documents, or list the store when `names` is empty.
    ///
    /// Missing or unreadable documents map to `None` without failing the
    /// rest of the batch.
    pub fn read_documents(&self, names: &[String]) -> Result<Files> {
        if names.is_empty() {
            return self.list_documents().map(Files::Names);
        }

        for name in names {
            validate_name(name)?;
        }
        self.ensure_initialized()?;

        let contents: BTreeMap<_, _> = names
            .iter()
            .map(|name| (name.clone(), self.read_document(name)))
            .collect();
        Ok(Files::Contents(contents))
    }

    fn read_document(&self, name: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(name)) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Document {} not found", name);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", name, e);
                None
            }
        }
    }

    // ============================================================
    // Appending
    // ============================================================

    /// Append a timestamped entry to a document.
    ///
    /// Without a header the entry goes to the end of the file, which is
    /// created empty if needed. With a header the entry lands at the end of
    /// that section (see [`section::insert_under_section`]); a missing file
    /// is seeded from its bootstrap template first.
    pub fn append(&self, name: &str, entry: &str, section_header: Option<&str>) -> Result<()> {
        validate_name(name)?;
        if entry.is_empty() {
            return Err(StoreError::validation("entry must be a non-empty string"));
        }
        if section_header.is_some_and(str::is_empty) {
            return Err(StoreError::validation(
                "section_header must be non-empty when provided",
            ));
        }

        self.ensure_initialized()?;

        let lock = self.document_lock(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let timestamp = self.timestamp();
        let formatted = section::format_entry(&timestamp, entry);

        match section_header {
            None => self.append_to_end(name, &formatted),
            Some(header) => self.append_under_section(name, header, &formatted, &timestamp),
        }
    }

    fn append_to_end(&self, name: &str, formatted: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(name))
            .map_err(|e| StoreError::io(format!("Failed to open {}", name), e))?;
        file.write_all(formatted.as_bytes())
            .map_err(|e| StoreError::io(format!("Failed to write {}", name), e))?;
        tracing::debug!("Appended entry to {}", name);
        Ok(())
    }

    fn append_under_section(
        &self,
        name: &str,
        header: &str,
        formatted: &str,
        timestamp: &str,
    ) -> Result<()> {
        let path = self.path_for(name);
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => template_for(name)
                .map(|template| render(template, timestamp))
                .unwrap_or_default(),
            Err(e) => return Err(StoreError::io(format!("Failed to read {}", name), e)),
        };

        let updated = section::insert_under_section(&body, header, formatted);
        fs::write(&path, updated)
            .map_err(|e| StoreError::io(format!("Failed to write {}", name), e))?;
        tracing::debug!("Appended entry to {} under {:?}", name, header);
        Ok(())
    }

    /// Append one batch target, folding any failure into the result.
    pub fn append_target(&self, target: &AppendTarget) -> AppendResult {
        self.try_append_target(target).0
    }

    /// Like [`append_target`](Self::append_target), but also hands back the
    /// error behind a failed result.
    pub fn try_append_target(&self, target: &AppendTarget) -> (AppendResult, Option<StoreError>) {
        let file = target.file_name.clone().unwrap_or_default();

        let outcome = match (target.file_name.as_deref(), target.entry.as_deref()) {
            (None, _) => Err(StoreError::validation("file_name is required")),
            (_, None) => Err(StoreError::validation("entry is required")),
            (Some(name), Some(entry)) => {
                self.append(name, entry, target.section_header.as_deref())
            }
        };

        match outcome {
            Ok(()) => {
                let result = AppendResult {
                    message: match target.section_header.as_deref() {
                        Some(header) => format!("Appended entry to {} under {}", file, header),
                        None => format!("Appended entry to {}", file),
                    },
                    file,
                    status: AppendStatus::Success,
                };
                (result, None)
            }
            Err(e) => {
                tracing::warn!("Append to {:?} failed: {}", file, e);
                let result = AppendResult {
                    message: format!("Failed to append to {}: {}", file, e),
                    file,
                    status: AppendStatus::Error,
                };
                (result, Some(e))
            }
        }
    }

    /// Append every target independently; one failure never aborts the rest.
    pub fn append_many(&self, targets: &[AppendTarget]) -> Vec<AppendResult> {
        targets.iter().map(|t| self.append_target(t)).collect()
    }

    fn document_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(name.to_string()).or_default().clone()
    }
}

/// Document names are single, plain file names inside the root.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::validation("file_name must be a non-empty string"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(StoreError::validation(format!(
            "Invalid file name '{}': must not contain path separators",
            name
        )));
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(StoreError::validation(format!(
            "Invalid file name '{}': must be a plain file name",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_file_names() {
        assert!(validate_name("activeContext.md").is_ok());
        assert!(validate_name("notes with spaces.md").is_ok());
    }

    #[test]
    fn rejects_names_escaping_the_root() {
        for name in ["", ".", "..", "../x.md", "a/b.md", "a\\b.md", "/etc/passwd"] {
            let err = validate_name(name).expect_err(name);
            assert!(err.is_validation(), "{name}");
        }
    }
}
