//! Runtime configuration for the memory bank.

use std::path::PathBuf;

use anyhow::Context;

/// Environment variable naming the store root.
pub const ROOT_ENV: &str = "MEMORY_BANK_ROOT";
/// Environment variable naming the document extension.
pub const EXTENSION_ENV: &str = "MEMORY_BANK_EXTENSION";

/// Directory created under the working directory when no root is configured.
pub const DEFAULT_DIR_NAME: &str = "memory-bank";
pub const DEFAULT_EXTENSION: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory all documents live under.
    pub root: PathBuf,
    /// Extension (without the dot) of documents included in listings.
    pub extension: String,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        let extension = extension.as_ref().trim().trim_start_matches('.');
        if !extension.is_empty() {
            self.extension = extension.to_string();
        }
        self
    }

    /// Build a config from explicit values, falling back to
    /// `<current dir>/memory-bank` and the `md` extension.
    ///
    /// The CLI feeds `MEMORY_BANK_ROOT` / `MEMORY_BANK_EXTENSION` in here
    /// through clap's `env` support.
    pub fn resolve(root: Option<PathBuf>, extension: Option<String>) -> anyhow::Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()
                .context("Could not determine the current directory")?
                .join(DEFAULT_DIR_NAME),
        };

        let config = Self::new(root);
        Ok(match extension {
            Some(ext) => config.with_extension(ext),
            None => config,
        })
    }
}
