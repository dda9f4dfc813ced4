//! Blacklist management module
//!
//! Handles loading and querying the set of disallowed correction targets.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlacklistError {
    #[error("Blacklist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read blacklist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Blacklist file is empty")]
    EmptyFile,
}

/// Returns the blacklist file path.
///
/// Priority:
/// 1. Environment variable `TYPO_BLACKLIST_PATH`
/// 2. Default path `./assets/blacklist.txt`
pub fn get_blacklist_path() -> PathBuf {
    std::env::var("TYPO_BLACKLIST_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/blacklist.txt"))
}

/// A fixed set of passwords a correction must never land on.
///
/// Entries are matched exactly: `Password1` and `password1` are different
/// passwords here, since correctors themselves change case.
#[derive(Debug, Clone, Default)]
pub struct BlackList {
    passwords: HashSet<String>,
}

impl BlackList {
    /// Loads the blacklist from the path given by [`get_blacklist_path`].
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    pub fn load() -> Result<Self, BlacklistError> {
        Self::from_path(get_blacklist_path())
    }

    /// Loads a newline-delimited blacklist from a specific file path.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let blacklist = typo_checker::BlackList::from_path("/etc/myapp/banned.txt")?;
    /// assert!(blacklist.contains("123456"));
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BlacklistError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blacklist load FAILED: FileNotFound {:?}", path);
            return Err(BlacklistError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blacklist load FAILED: Empty file {:?}", path);
            return Err(BlacklistError::EmptyFile);
        }

        let blacklist = Self::from_lines(content.lines());

        #[cfg(feature = "tracing")]
        tracing::info!("Blacklist loaded: {} passwords from {:?}", blacklist.len(), path);

        Ok(blacklist)
    }

    /// Builds a blacklist from in-memory entries; blank lines are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let passwords = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { passwords }
    }

    pub fn contains(&self, password: &str) -> bool {
        self.passwords.contains(password)
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}
