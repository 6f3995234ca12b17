//! File-based clouds loader (YAML)
//!
//! Each document is looked up in the current directory, then
//! `~/.config/openstack/`, then `/etc/openstack/`. The `.yml` spelling is
//! only searched for when no `.yaml` file exists anywhere on the path.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::env::{EnvSource, ProcessEnv};
use crate::types::{CloudMap, CloudsFile, PublicCloudsFile};
use super::traits::{CloudsLoader, ConfigError, ConfigResult};

/// Environment variable naming an explicit clouds.yaml
pub const CLIENT_CONFIG_FILE_ENV: &str = "OS_CLIENT_CONFIG_FILE";

const CLOUDS_FILES: &[&str] = &["clouds.yaml", "clouds.yml"];
const PUBLIC_CLOUDS_FILES: &[&str] = &["clouds-public.yaml", "clouds-public.yml"];
const SECURE_FILES: &[&str] = &["secure.yaml", "secure.yml"];

/// Parse a clouds.yaml or secure.yaml document
pub fn parse_clouds_yaml(content: &str, origin: &str) -> ConfigResult<CloudMap> {
    // an empty document is valid YAML but not a mapping
    if content.trim().is_empty() {
        return Ok(CloudMap::new());
    }
    let file: CloudsFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(origin, e))?;
    Ok(file.clouds)
}

/// Parse a clouds-public.yaml document
pub fn parse_public_clouds_yaml(content: &str, origin: &str) -> ConfigResult<CloudMap> {
    if content.trim().is_empty() {
        return Ok(CloudMap::new());
    }
    let file: PublicCloudsFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(origin, e))?;
    Ok(file.clouds)
}

/// Loader that reads clouds documents from the standard locations
///
/// # Example
///
/// ```no_run
/// use cloudconf_core::config::{CloudsLoader, FileCloudsLoader};
///
/// // Standard search path
/// let loader = FileCloudsLoader::new();
/// let clouds = loader.load_clouds()?;
///
/// // A single directory, e.g. for tests
/// let loader = FileCloudsLoader::new().with_search_dirs(vec!["/tmp/fixtures".into()]);
/// # Ok::<(), cloudconf_core::config::ConfigError>(())
/// ```
pub struct FileCloudsLoader {
    search_dirs: Vec<PathBuf>,
    env: Arc<dyn EnvSource>,
}

impl FileCloudsLoader {
    /// Standard search path, `OS_CLIENT_CONFIG_FILE` read from the process environment
    pub fn new() -> Self {
        Self::with_env(Arc::new(ProcessEnv::new()))
    }

    /// Standard search path with an injected environment
    pub fn with_env(env: Arc<dyn EnvSource>) -> Self {
        Self {
            search_dirs: Self::default_search_dirs(),
            env,
        }
    }

    /// Replace the search path
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Current directory, `~/.config/openstack`, `/etc/openstack`
    pub fn default_search_dirs() -> Vec<PathBuf> {
        let mut dirs_list = Vec::with_capacity(3);
        if let Ok(cwd) = std::env::current_dir() {
            dirs_list.push(cwd);
        }
        if let Some(home) = dirs::home_dir() {
            dirs_list.push(home.join(".config").join("openstack"));
        }
        dirs_list.push(PathBuf::from("/etc/openstack"));
        dirs_list
    }

    /// Get the search directories
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// First existing file in the search path. Each name is tried across
    /// every directory before the next name.
    pub fn find(&self, names: &[&str]) -> Option<PathBuf> {
        self.candidates(names).into_iter().find(|path| path.is_file())
    }

    /// Path of clouds.yaml that `load_clouds` would read
    pub fn clouds_path(&self) -> Option<PathBuf> {
        if let Some(explicit) = self.env.get(CLIENT_CONFIG_FILE_ENV) {
            let explicit = PathBuf::from(explicit);
            if explicit.is_file() {
                return Some(explicit);
            }
        }
        self.find(CLOUDS_FILES)
    }

    fn candidates(&self, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .flat_map(|name| self.search_dirs.iter().map(move |dir| dir.join(name)))
            .collect()
    }

    fn read(path: &Path) -> ConfigResult<String> {
        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }
}

impl Default for FileCloudsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FileCloudsLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCloudsLoader")
            .field("search_dirs", &self.search_dirs)
            .field("env", &self.env.name())
            .finish()
    }
}

impl CloudsLoader for FileCloudsLoader {
    fn load_clouds(&self) -> ConfigResult<CloudMap> {
        let path = self
            .clouds_path()
            .ok_or_else(|| ConfigError::file_not_found("clouds.yaml", &self.candidates(CLOUDS_FILES)))?;
        let content = Self::read(&path)?;
        parse_clouds_yaml(&content, &path.display().to_string())
    }

    fn load_public_clouds(&self) -> ConfigResult<CloudMap> {
        match self.find(PUBLIC_CLOUDS_FILES) {
            Some(path) => {
                let content = Self::read(&path)?;
                parse_public_clouds_yaml(&content, &path.display().to_string())
            }
            None => Ok(CloudMap::new()),
        }
    }

    fn load_secure_clouds(&self) -> ConfigResult<CloudMap> {
        match self.find(SECURE_FILES) {
            Some(path) => {
                let content = Self::read(&path)?;
                parse_clouds_yaml(&content, &path.display().to_string())
            }
            None => Ok(CloudMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;
    use tempfile::tempdir;

    fn loader_for(dirs: Vec<PathBuf>) -> FileCloudsLoader {
        FileCloudsLoader::with_env(Arc::new(MemoryEnv::new())).with_search_dirs(dirs)
    }

    #[test]
    fn test_missing_clouds_yaml_is_fatal() {
        let dir = tempdir().unwrap();
        let loader = loader_for(vec![dir.path().to_path_buf()]);

        let err = loader.load_clouds().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        assert!(err.to_string().contains("clouds.yml"));
    }

    #[test]
    fn test_missing_optional_documents_are_empty() {
        let dir = tempdir().unwrap();
        let loader = loader_for(vec![dir.path().to_path_buf()]);

        assert!(loader.load_public_clouds().unwrap().is_empty());
        assert!(loader.load_secure_clouds().unwrap().is_empty());
    }

    #[test]
    fn test_search_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("clouds.yaml"), "clouds:\n  first: {}\n").unwrap();
        fs::write(second.path().join("clouds.yaml"), "clouds:\n  second: {}\n").unwrap();

        let loader = loader_for(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        let clouds = loader.load_clouds().unwrap();
        assert!(clouds.contains_key("first"));
        assert!(!clouds.contains_key("second"));
    }

    #[test]
    fn test_yml_only_when_no_yaml_anywhere() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("clouds.yml"), "clouds:\n  yml: {}\n").unwrap();
        fs::write(second.path().join("clouds.yaml"), "clouds:\n  yaml: {}\n").unwrap();

        let loader = loader_for(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        assert!(loader.load_clouds().unwrap().contains_key("yaml"));

        fs::remove_file(second.path().join("clouds.yaml")).unwrap();
        assert!(loader.load_clouds().unwrap().contains_key("yml"));
    }

    #[test]
    fn test_yaml_extension_preferred_within_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("secure.yml"), "clouds:\n  yml: {}\n").unwrap();
        fs::write(dir.path().join("secure.yaml"), "clouds:\n  yaml: {}\n").unwrap();

        let loader = loader_for(vec![dir.path().to_path_buf()]);
        let secure = loader.load_secure_clouds().unwrap();
        assert!(secure.contains_key("yaml"));
    }

    #[test]
    fn test_client_config_file_override() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("custom.yaml");
        fs::write(&explicit, "clouds:\n  custom: {}\n").unwrap();

        let env = MemoryEnv::new().with_var(CLIENT_CONFIG_FILE_ENV, explicit.display().to_string());
        let loader = FileCloudsLoader::with_env(Arc::new(env)).with_search_dirs(vec![]);

        assert_eq!(loader.clouds_path(), Some(explicit));
        assert!(loader.load_clouds().unwrap().contains_key("custom"));
    }

    #[test]
    fn test_override_pointing_nowhere_falls_back_to_search() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("clouds.yaml"), "clouds:\n  found: {}\n").unwrap();

        let env = MemoryEnv::new().with_var(CLIENT_CONFIG_FILE_ENV, "/nonexistent/clouds.yaml");
        let loader = FileCloudsLoader::with_env(Arc::new(env))
            .with_search_dirs(vec![dir.path().to_path_buf()]);
        assert!(loader.load_clouds().unwrap().contains_key("found"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("clouds-public.yaml"), "public-clouds: [unterminated").unwrap();

        let loader = loader_for(vec![dir.path().to_path_buf()]);
        let err = loader.load_public_clouds().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("clouds-public.yaml"));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_clouds_yaml("", "clouds.yaml").unwrap().is_empty());
        assert!(parse_public_clouds_yaml("  \n", "clouds-public.yaml").unwrap().is_empty());
    }
}
