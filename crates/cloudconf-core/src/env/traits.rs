//! Environment lookup capability

/// Read-only source of environment variables
///
/// Resolution never reads the process environment directly; a source is
/// injected once per resolver so that lookups can be replaced in tests.
///
/// Implementations:
/// - Process environment (`ProcessEnv`)
/// - Fixed in-memory map (`MemoryEnv`)
///
/// # Example
///
/// ```
/// use cloudconf_core::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::new().with_var("OS_CLOUD", "mycloud");
/// assert_eq!(env.get("OS_CLOUD"), Some("mycloud".to_string()));
/// ```
pub trait EnvSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up a variable by its full name
    ///
    /// Empty values are reported as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a variable is set to a non-empty value
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
