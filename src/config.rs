// src/config.rs

//! Search configuration.
//!
//! Loaded from `.branchpoint.toml` at the repository root (or an explicit
//! `--config` path). A missing file yields the defaults.
//!
//! ```toml
//! [search]
//! max_visits = 250000
//! timeout_ms = 5000
//! strict_timestamps = true
//! ```

use crate::error::{AncestryError, Malformation, Result};
use crate::model::CommitId;
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};

pub const CONFIG_FILE_NAME: &str = ".branchpoint.toml";

pub const DEFAULT_MAX_VISITS: usize = 1_000_000;

/// Top-level configuration file
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub search: SearchConfig,
}

/// Limits and checks applied to every top-level traversal
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum number of commits a single query may visit; `None` is unbounded
    #[serde(default = "default_max_visits")]
    pub max_visits: Option<usize>,

    /// Wall-clock limit per query
    #[serde(default, rename = "timeout_ms", with = "millis")]
    pub timeout: Option<Duration>,

    /// Treat a parent newer than its child as malformed history
    #[serde(default = "default_strict_timestamps")]
    pub strict_timestamps: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_visits: default_max_visits(),
            timeout: None,
            strict_timestamps: default_strict_timestamps(),
        }
    }
}

fn default_max_visits() -> Option<usize> {
    Some(DEFAULT_MAX_VISITS)
}

const fn default_strict_timestamps() -> bool {
    true
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

impl SearchConfig {
    pub fn unbounded() -> Self {
        Self {
            max_visits: None,
            ..Self::default()
        }
    }

    pub fn with_max_visits(mut self, limit: usize) -> Self {
        self.max_visits = Some(limit);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn lenient(mut self) -> Self {
        self.strict_timestamps = false;
        self
    }

    /// A fresh meter for one top-level call
    pub fn budget(&self) -> Budget {
        Budget {
            visited: 0,
            limit: self.max_visits,
            deadline: self.timeout.map(|t| Instant::now() + t),
            strict_timestamps: self.strict_timestamps,
        }
    }
}

/// Error while reading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl FileConfig {
    /// Load `path`; a missing file is not an error.
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Per-call visit counter and deadline.
///
/// Every traversal step calls [`Budget::visit`]; once a limit is hit the
/// traversal stops with an aborted-search error.
#[derive(Debug)]
pub struct Budget {
    visited: usize,
    limit: Option<usize>,
    deadline: Option<Instant>,
    strict_timestamps: bool,
}

impl Budget {
    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn visit(&mut self) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.visited >= limit {
                return Err(AncestryError::BudgetExceeded {
                    visited: self.visited,
                    limit,
                });
            }
        }
        // Checking the clock on every step is measurable on big walks
        if self.visited % 256 == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Err(AncestryError::DeadlineExceeded {
                        visited: self.visited,
                    });
                }
            }
        }
        self.visited += 1;
        Ok(())
    }

    /// Fails when `parent` is newer than `child` and strict checking is on
    pub fn check_edge(&self, child: &CommitId, child_time: i64, parent: &CommitId, parent_time: i64) -> Result<()> {
        if self.strict_timestamps && parent_time > child_time {
            return Err(AncestryError::MalformedHistory {
                commit: child.clone(),
                problem: Malformation::NonMonotonicTimestamp {
                    parent: parent.clone(),
                    parent_time,
                    child_time,
                },
            });
        }
        Ok(())
    }
}
