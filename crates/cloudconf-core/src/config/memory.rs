//! In-memory clouds loader

use crate::types::CloudMap;
use super::file::{parse_clouds_yaml, parse_public_clouds_yaml};
use super::traits::{CloudsLoader, ConfigError, ConfigResult};

/// In-memory clouds loader for testing and embedding
///
/// A loader without a primary document behaves like a missing clouds.yaml.
#[derive(Debug, Clone, Default)]
pub struct MemoryCloudsLoader {
    clouds: Option<CloudMap>,
    public_clouds: CloudMap,
    secure_clouds: CloudMap,
}

impl MemoryCloudsLoader {
    /// Loader with no documents at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader with a primary document
    pub fn with_clouds(clouds: CloudMap) -> Self {
        Self {
            clouds: Some(clouds),
            ..Self::default()
        }
    }

    /// Set the public catalog
    pub fn public(mut self, clouds: CloudMap) -> Self {
        self.public_clouds = clouds;
        self
    }

    /// Set the secure overlay
    pub fn secure(mut self, clouds: CloudMap) -> Self {
        self.secure_clouds = clouds;
        self
    }

    /// Loader with a primary document given as clouds.yaml text
    pub fn from_yaml(clouds_yaml: &str) -> ConfigResult<Self> {
        Ok(Self::with_clouds(parse_clouds_yaml(clouds_yaml, "clouds.yaml")?))
    }

    /// Set the public catalog from clouds-public.yaml text
    pub fn public_yaml(self, yaml: &str) -> ConfigResult<Self> {
        Ok(self.public(parse_public_clouds_yaml(yaml, "clouds-public.yaml")?))
    }

    /// Set the secure overlay from secure.yaml text
    pub fn secure_yaml(self, yaml: &str) -> ConfigResult<Self> {
        Ok(self.secure(parse_clouds_yaml(yaml, "secure.yaml")?))
    }
}

impl CloudsLoader for MemoryCloudsLoader {
    fn load_clouds(&self) -> ConfigResult<CloudMap> {
        self.clouds
            .clone()
            .ok_or_else(|| ConfigError::file_not_found("clouds.yaml", &[]))
    }

    fn load_public_clouds(&self) -> ConfigResult<CloudMap> {
        Ok(self.public_clouds.clone())
    }

    fn load_secure_clouds(&self) -> ConfigResult<CloudMap> {
        Ok(self.secure_clouds.clone())
    }
}
