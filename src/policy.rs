//! Member filter policy
//!
//! Some accessors are too expensive or have side effects (reading a file's
//! contents, opening a connection). A [`MemberFilterPolicy`] names accessors
//! that the inspector must never call, either for every type or for one
//! concrete type. Excluded accessors still show up in the output, holding a
//! placeholder instead of a value.
//!
//! Per-type entries match either the full type name reported by
//! [`Inspectable::type_name`](crate::value::Inspectable::type_name) or its
//! last path segment, so `File` matches `my_app::resource::File`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Accessor excluded for every type by default
pub const DEFAULT_GLOBAL_EXCLUSION: &str = "getFileContents";

/// Type and accessor excluded by default
pub const DEFAULT_FILE_TYPE: &str = "File";
pub const DEFAULT_FILE_EXCLUSION: &str = "getContents";

/// Accessors that must never be invoked during inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilterPolicy {
    #[serde(default)]
    pub global: BTreeSet<String>,
    #[serde(default)]
    pub per_type: BTreeMap<String, BTreeSet<String>>,
}

impl MemberFilterPolicy {
    /// A policy that excludes nothing
    pub fn empty() -> Self {
        MemberFilterPolicy {
            global: BTreeSet::new(),
            per_type: BTreeMap::new(),
        }
    }

    /// Exclude an accessor for every type
    pub fn exclude(mut self, accessor: impl Into<String>) -> Self {
        self.global.insert(accessor.into());
        self
    }

    /// Exclude an accessor for one type
    pub fn exclude_for(mut self, type_name: impl Into<String>, accessor: impl Into<String>) -> Self {
        self.per_type
            .entry(type_name.into())
            .or_default()
            .insert(accessor.into());
        self
    }

    /// Merge another policy into this one
    pub fn extend(&mut self, other: MemberFilterPolicy) {
        self.global.extend(other.global);
        for (type_name, accessors) in other.per_type {
            self.per_type.entry(type_name).or_default().extend(accessors);
        }
    }

    /// Check whether `accessor` must be skipped on an object of `type_name`
    pub fn is_excluded(&self, type_name: &str, accessor: &str) -> bool {
        if self.global.contains(accessor) {
            return true;
        }
        let short = short_type_name(type_name);
        [type_name, short]
            .iter()
            .filter_map(|name| self.per_type.get(*name))
            .any(|accessors| accessors.contains(accessor))
    }
}

impl Default for MemberFilterPolicy {
    fn default() -> Self {
        MemberFilterPolicy::empty()
            .exclude(DEFAULT_GLOBAL_EXCLUSION)
            .exclude_for(DEFAULT_FILE_TYPE, DEFAULT_FILE_EXCLUSION)
    }
}

/// Last path segment of a type name, ignoring generic arguments
pub(crate) fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}
