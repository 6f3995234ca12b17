//! Authentication options handed to the identity service

use serde::{Deserialize, Serialize};

/// Identity API generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityVersion {
    #[serde(rename = "2.0")]
    V2,
    #[serde(rename = "3")]
    V3,
}

impl IdentityVersion {
    /// Parse a version string as written in clouds.yaml or the environment
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "2" | "2.0" | "v2" | "v2.0" => Some(IdentityVersion::V2),
            "3" | "v3" => Some(IdentityVersion::V3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityVersion::V2 => "2.0",
            IdentityVersion::V3 => "3",
        }
    }
}

impl std::fmt::Display for IdentityVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization boundary requested for a v3 token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,
}

impl AuthScope {
    pub fn is_empty(&self) -> bool {
        *self == AuthScope::default()
    }
}

/// Provider-agnostic authentication options
///
/// Consumed by the SDK's authenticate / new-client functions. For v3 the
/// `domain_id` / `domain_name` pair is the user's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOptions {
    pub identity_version: IdentityVersion,
    pub identity_endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_credential_secret: Option<String>,
    #[serde(default)]
    pub allow_reauth: bool,
    /// None for v2, application credentials and unscoped requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<AuthScope>,
}

const MASK: &str = "******";

impl AuthOptions {
    /// Copy with password, token and credential secret masked, for display
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| MASK.to_string());
        Self {
            token_id: mask(&self.token_id),
            password: mask(&self.password),
            application_credential_secret: mask(&self.application_credential_secret),
            ..self.clone()
        }
    }

    /// Serialize to pretty JSON for hosts that hand the options to a non-Rust SDK
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
