//! Password probability models.
//!
//! The checker only needs two queries from a model: the weight of a given
//! password, and the weight of the q-th most probable one. [`FrequencyModel`]
//! answers both from a plain `count password` frequency table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default weight of a password the model has never seen.
pub const MIN_PROB: f64 = 1e-8;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Password model file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read password model file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Malformed frequency line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("Password model has no usable entries")]
    Empty,
}

/// Weight oracle over password strings.
pub trait PasswordModel: Send + Sync {
    /// Non-negative weight of `password`; unknown passwords get a small floor.
    fn get(&self, password: &str) -> f64;

    /// Weight of the q-th most probable password (1-based).
    fn qth(&self, q: usize) -> f64;

    /// Short label used when a checker describes itself.
    fn label(&self) -> String {
        "PasswordModel".to_string()
    }
}

/// Returns the password model file path.
///
/// Priority:
/// 1. Environment variable `TYPO_PWMODEL_PATH`
/// 2. Default path `./assets/pwmodel.txt`
pub fn get_pwmodel_path() -> PathBuf {
    std::env::var("TYPO_PWMODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/pwmodel.txt"))
}

/// Histogram model: weight is the observed count over the total count.
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    counts: HashMap<String, u64>,
    total: u64,
    // Descending, for rank queries.
    ranked: Vec<f64>,
}

impl FrequencyModel {
    /// Builds a model from `(password, count)` pairs. Zero counts and empty
    /// passwords are ignored; repeated passwords accumulate.
    pub fn from_counts<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for (pw, c) in pairs {
            let pw = pw.into();
            if c == 0 || pw.is_empty() {
                continue;
            }
            *counts.entry(pw).or_insert(0) += c;
        }

        let total: u64 = counts.values().sum();
        let mut ranked: Vec<f64> = counts
            .values()
            .map(|&c| c as f64 / total as f64)
            .collect();
        ranked.sort_by(|a, b| b.total_cmp(a));

        Self { counts, total, ranked }
    }

    /// Loads the model from the path given by [`get_pwmodel_path`].
    pub fn load() -> Result<Self, ModelError> {
        Self::from_path(get_pwmodel_path())
    }

    /// Loads a `count password` frequency table, one entry per line.
    ///
    /// Leading whitespace before the count is allowed, and everything after
    /// the first space following it is the password.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Password model load FAILED: FileNotFound {:?}", path);
            return Err(ModelError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let model = Self::parse(&content)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Password model loaded: {} passwords ({} observations) from {:?}",
            model.len(),
            model.total,
            path
        );

        Ok(model)
    }

    /// Parses a `count password` frequency table held in memory.
    pub fn parse(content: &str) -> Result<Self, ModelError> {
        let mut pairs = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let malformed = || ModelError::MalformedLine {
                line: i + 1,
                content: line.to_string(),
            };
            let (count, pw) = line.trim_start().split_once(' ').ok_or_else(malformed)?;
            let count: u64 = count.parse().map_err(|_| malformed())?;
            pairs.push((pw.to_string(), count));
        }

        let model = Self::from_counts(pairs);
        if model.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl PasswordModel for FrequencyModel {
    fn get(&self, password: &str) -> f64 {
        match self.counts.get(password) {
            Some(&c) => c as f64 / self.total as f64,
            None => MIN_PROB,
        }
    }

    fn qth(&self, q: usize) -> f64 {
        self.ranked
            .get(q.saturating_sub(1))
            .copied()
            .unwrap_or(MIN_PROB)
    }

    fn label(&self) -> String {
        format!("FrequencyModel({} passwords)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> FrequencyModel {
        FrequencyModel::from_counts([("password1", 60), ("123456", 30), ("qwerty123", 10)])
    }

    #[test]
    fn test_get_known_and_unknown() {
        let model = sample();
        assert!((model.get("password1") - 0.6).abs() < 1e-12);
        assert!((model.get("qwerty123") - 0.1).abs() < 1e-12);
        assert_eq!(model.get("neverseen"), MIN_PROB);
    }

    #[test]
    fn test_qth_ranks_descending() {
        let model = sample();
        assert!((model.qth(1) - 0.6).abs() < 1e-12);
        assert!((model.qth(3) - 0.1).abs() < 1e-12);
        assert_eq!(model.qth(4), MIN_PROB);
    }

    #[test]
    fn test_from_counts_accumulates_and_skips_zero() {
        let model = FrequencyModel::from_counts([("abcdef", 1), ("abcdef", 1), ("ghijkl", 0)]);
        assert_eq!(model.len(), 1);
        assert!((model.get("abcdef") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_with_spaces_in_password() {
        let model = FrequencyModel::parse("  3 pass word\n1 abcdef\n\n").unwrap();
        assert!((model.get("pass word") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_parse_malformed_line() {
        let result = FrequencyModel::parse("3 password1\nnot-a-count\n");
        match result {
            Err(ModelError::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(FrequencyModel::parse("\n"), Err(ModelError::Empty)));
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "4 password1").expect("Failed to write");
        writeln!(temp_file, "1 iloveyou").expect("Failed to write");

        unsafe { std::env::set_var("TYPO_PWMODEL_PATH", temp_file.path()); }
        let model = FrequencyModel::load().expect("model should load");
        assert_eq!(model.len(), 2);
        assert!((model.get("iloveyou") - 0.2).abs() < 1e-12);
        unsafe { std::env::remove_var("TYPO_PWMODEL_PATH"); }
    }

    #[test]
    fn test_from_path_missing() {
        let result = FrequencyModel::from_path("/nonexistent/pwmodel.txt");
        assert!(matches!(result, Err(ModelError::FileNotFound(_))));
    }
}
