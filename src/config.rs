//! `vardump.toml` configuration
//!
//! ```toml
//! max_depth = 6
//! level = "info"
//! accessor_errors = "placeholder"
//! max_iterable_items = 500
//!
//! [filter]
//! global = ["getConnection"]
//!
//! [filter.per_type]
//! File = ["getStream"]
//! ```
//!
//! Every field is optional. Filter entries are added on top of the built-in
//! defaults unless `replace_default_filter = true`.

use crate::debug::{DebugArguments, DEFAULT_LEVEL};
use crate::inspector::{
    AccessorErrorMode, Inspector, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITERABLE_ITEMS,
};
use crate::policy::MemberFilterPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Dump settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DumpConfig {
    pub max_depth: i32,
    pub level: String,
    pub accessor_errors: AccessorErrorMode,
    pub max_iterable_items: usize,
    pub replace_default_filter: bool,
    pub filter: MemberFilterPolicy,
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            level: DEFAULT_LEVEL.to_string(),
            accessor_errors: AccessorErrorMode::default(),
            max_iterable_items: DEFAULT_MAX_ITERABLE_ITEMS,
            replace_default_filter: false,
            filter: MemberFilterPolicy::empty(),
        }
    }
}

impl DumpConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply command line overrides on top of the loaded file
    pub fn with_overrides(mut self, max_depth: Option<i32>, level: Option<&str>) -> Self {
        if let Some(max_depth) = max_depth {
            self.max_depth = max_depth;
        }
        if let Some(level) = level {
            self.level = level.to_string();
        }
        self
    }

    /// Effective filter policy
    pub fn policy(&self) -> MemberFilterPolicy {
        if self.replace_default_filter {
            return self.filter.clone();
        }
        let mut policy = MemberFilterPolicy::default();
        policy.extend(self.filter.clone());
        policy
    }

    /// Inspector with the configured options
    pub fn inspector(&self) -> Inspector {
        Inspector::new()
            .with_max_depth(self.max_depth)
            .with_policy(self.policy())
            .with_accessor_errors(self.accessor_errors)
            .with_max_iterable_items(self.max_iterable_items)
    }

    /// Tag arguments seeded with the configured depth and level
    pub fn arguments(&self) -> DebugArguments {
        DebugArguments {
            max_depth: self.max_depth,
            level: self.level.clone(),
            ..DebugArguments::default()
        }
    }
}
