//! Core type definitions
//!
//! Plain data carried between the edge source, the engine, and the report
//! layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An observed "issuer depends on dependency" relationship
///
/// Both paths are expected to be normalized already. An edge whose
/// dependency equals its issuer marks the entry module of the build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub dependency: String,
    pub issuer: String,
}

impl Edge {
    pub fn new(dependency: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            dependency: dependency.into(),
            issuer: issuer.into(),
        }
    }

    /// The self-referential edge announcing the entry module
    pub fn entry(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            dependency: path.clone(),
            issuer: path,
        }
    }

    pub fn is_entry(&self) -> bool {
        self.dependency == self.issuer
    }
}

/// An ordered chain of module paths forming (part of) a cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircularPath(Vec<String>);

impl CircularPath {
    pub fn new(paths: Vec<String>) -> Self {
        Self(paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for CircularPath {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

impl fmt::Display for CircularPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" → "))
    }
}
