//! Prefixed view over an environment source

use super::traits::EnvSource;

/// Prefix used when none is configured
pub const DEFAULT_ENV_PREFIX: &str = "OS_";

/// Looks up `${prefix}NAME` in an underlying source
#[derive(Clone, Copy)]
pub struct PrefixedEnv<'a> {
    source: &'a dyn EnvSource,
    prefix: &'a str,
}

impl<'a> PrefixedEnv<'a> {
    /// An empty prefix selects `DEFAULT_ENV_PREFIX`
    pub fn new(source: &'a dyn EnvSource, prefix: Option<&'a str>) -> Self {
        let prefix = prefix.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_ENV_PREFIX);
        Self { source, prefix }
    }

    pub fn prefix(&self) -> &str {
        self.prefix
    }

    /// Look up `${prefix}{name}`
    pub fn get(&self, name: &str) -> Option<String> {
        self.source.get(&format!("{}{}", self.prefix, name))
    }

    /// Look up several names in order; the last one set wins
    pub fn get_last(&self, names: &[&str]) -> Option<String> {
        names.iter().filter_map(|n| self.get(n)).last()
    }
}

impl std::fmt::Debug for PrefixedEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixedEnv")
            .field("source", &self.source.name())
            .field("prefix", &self.prefix)
            .finish()
    }
}
