//! Process environment source

use std::env;

use super::traits::EnvSource;

/// Environment source that reads the current process environment
///
/// Read-only. Values that are not valid unicode are treated as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv {
    _private: (),
}

impl ProcessEnv {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_env_name() {
        assert_eq!(ProcessEnv::new().name(), "process");
    }

    #[test]
    fn test_process_env_reads_path() {
        // PATH is set in every sane test environment
        let env = ProcessEnv::new();
        assert!(env.has("PATH"));
    }

    #[test]
    fn test_process_env_missing() {
        let env = ProcessEnv::new();
        assert_eq!(env.get("CLOUDCONF_SURELY_UNSET_VARIABLE_XYZ"), None);
    }
}
