//! Per-call client options

use crate::env::{EnvSource, PrefixedEnv};
use crate::types::{AuthInfo, AuthType};

/// Options customizing one resolution call
///
/// Everything is optional; an empty `ClientOpts` resolves the cloud named by
/// `OS_CLOUD`, or the only entry of clouds.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOpts {
    /// Cloud entry in clouds.yaml to use
    pub cloud: Option<String>,
    /// Environment variable prefix, `OS_` when unset
    pub env_prefix: Option<String>,
    /// Authentication type used when the cloud entry declares none
    pub auth_type: Option<AuthType>,
    /// Authentication material used when no cloud entry is selected
    pub auth_info: Option<AuthInfo>,
    /// Region to apply per-region overrides for and to build service clients in
    pub region_name: Option<String>,
    /// public, internal or admin
    pub endpoint_type: Option<String>,
}

impl ClientOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a cloud entry by name
    pub fn for_cloud(name: impl Into<String>) -> Self {
        Self {
            cloud: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn with_auth_type(mut self, auth_type: impl Into<AuthType>) -> Self {
        self.auth_type = Some(auth_type.into());
        self
    }

    pub fn with_auth_info(mut self, auth_info: AuthInfo) -> Self {
        self.auth_info = Some(auth_info);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_name = Some(region.into());
        self
    }

    pub fn with_endpoint_type(mut self, endpoint_type: impl Into<String>) -> Self {
        self.endpoint_type = Some(endpoint_type.into());
        self
    }

    /// Prefixed view of `env` using this call's prefix
    pub fn env<'a>(&'a self, env: &'a dyn EnvSource) -> PrefixedEnv<'a> {
        PrefixedEnv::new(env, self.env_prefix.as_deref())
    }

    /// Cloud name from the options, else `${prefix}CLOUD`
    pub fn cloud_name(&self, env: &dyn EnvSource) -> Option<String> {
        self.cloud
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| self.env(env).get("CLOUD"))
    }
}
