//! In-memory environment source

use std::collections::HashMap;

use super::traits::EnvSource;

/// Environment source backed by a fixed map
///
/// Used by tests and by hosts that collect variables from somewhere other
/// than the process environment.
///
/// # Example
///
/// ```
/// use cloudconf_core::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::new()
///     .with_var("OS_AUTH_URL", "https://keystone.example.com/v3")
///     .with_var("OS_PASSWORD", "");
/// assert!(env.has("OS_AUTH_URL"));
/// assert!(!env.has("OS_PASSWORD"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Create an environment with initial values
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Add one variable
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvSource for MemoryEnv {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }
}
