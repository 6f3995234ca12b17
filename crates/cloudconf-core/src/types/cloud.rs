//! Cloud entry types as they appear in clouds.yaml, clouds-public.yaml and secure.yaml

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Map of cloud name to cloud entry
pub type CloudMap = BTreeMap<String, Cloud>;

/// One named cloud entry
///
/// Every field is optional so that partial entries (a profile from the
/// public catalog, an overlay from secure.yaml, a per-region override) can
/// be represented with the same type and merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    /// Legacy profile reference, used when `profile` is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    /// Name of an entry in clouds-public.yaml to inherit defaults from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Authentication material
    #[serde(default, rename = "auth", skip_serializing_if = "Option::is_none")]
    pub auth_info: Option<AuthInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    /// Known regions, optionally carrying per-region overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
    /// public, internal or admin. Takes precedence over `interface`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,
    /// Synonym of `endpoint_type`, folded into it after resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, deserialize_with = "version_string", skip_serializing_if = "Option::is_none")]
    pub identity_api_version: Option<String>,
    #[serde(default, deserialize_with = "version_string", skip_serializing_if = "Option::is_none")]
    pub volume_api_version: Option<String>,
    /// Verify TLS certificates. Defaults to true after resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    /// CA bundle path
    #[serde(default, rename = "cacert", skip_serializing_if = "Option::is_none")]
    pub ca_cert_file: Option<String>,
    /// Client certificate path
    #[serde(default, rename = "cert", skip_serializing_if = "Option::is_none")]
    pub client_cert_file: Option<String>,
    /// Client key path
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub client_key_file: Option<String>,
}

impl Cloud {
    /// Create an empty cloud entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authentication material
    pub fn with_auth(mut self, auth_info: AuthInfo) -> Self {
        self.auth_info = Some(auth_info);
        self
    }

    /// Set the profile reference
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the region list
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Cloud::default()
    }

    /// The profile this entry points at: `profile`, else `cloud`
    pub fn profile_name(&self) -> Option<&str> {
        non_empty(&self.profile).or_else(|| non_empty(&self.cloud))
    }

    /// Find a region entry by name
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Copy with secrets masked, including those in region overrides
    pub fn redacted(&self) -> Self {
        Self {
            auth_info: self.auth_info.as_ref().map(AuthInfo::redacted),
            regions: self
                .regions
                .iter()
                .map(|r| Region::with_values(r.name.clone(), r.values.redacted()))
                .collect(),
            ..self.clone()
        }
    }
}

/// Authentication material of a cloud entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_credential_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_credential_secret: Option<String>,
    /// Any non-empty value requests a system-scoped token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_scope: Option<String>,
    #[serde(default, alias = "tenant_name", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, alias = "tenant_id", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_domain: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_reauth: bool,
}

impl AuthInfo {
    /// Create empty authentication material
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity endpoint
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Set username and password
    pub fn with_password(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the project name
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Set a token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Copy with password, token and credential secret masked
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "******".to_string());
        Self {
            token: mask(&self.token),
            password: mask(&self.password),
            application_credential_secret: mask(&self.application_credential_secret),
            ..self.clone()
        }
    }

    /// Whether any part of the application credential triple is set
    pub fn is_application_credential(&self) -> bool {
        is_set(&self.application_credential_id)
            || is_set(&self.application_credential_name)
            || is_set(&self.application_credential_secret)
    }

    /// Whether a project id or name is set
    pub fn is_project_scoped(&self) -> bool {
        is_set(&self.project_id) || is_set(&self.project_name)
    }
}

/// A named region, optionally overriding cloud settings for that region
///
/// In YAML either a bare name or a `{name, values}` map:
///
/// ```yaml
/// regions:
///   - RegionOne
///   - name: RegionTwo
///     values:
///       auth:
///         auth_url: https://r2.example.com:5000/v3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RegionRepr")]
pub struct Region {
    pub name: String,
    #[serde(default, skip_serializing_if = "Cloud::is_empty")]
    pub values: Cloud,
}

impl Region {
    /// A region with no overrides
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Cloud::default(),
        }
    }

    /// A region carrying overrides
    pub fn with_values(name: impl Into<String>, values: Cloud) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegionRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        values: Cloud,
    },
}

impl From<RegionRepr> for Region {
    fn from(repr: RegionRepr) -> Self {
        match repr {
            RegionRepr::Name(name) => Region::named(name),
            RegionRepr::Full { name, values } => Region { name, values },
        }
    }
}

/// API versions are often written unquoted (`identity_api_version: 3`)
fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Version>::deserialize(deserializer)?.map(|v| match v {
        Version::Text(s) => s,
        Version::Int(i) => i.to_string(),
        Version::Float(f) => format!("{:?}", f),
    }))
}

/// Method of authentication (`auth_type` in clouds.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthType {
    /// Password, identity version inferred
    Password,
    /// Token, identity version inferred
    Token,
    V2Password,
    V2Token,
    V3Password,
    V3Token,
    V3ApplicationCredential,
    /// Anything else, kept verbatim
    Other(String),
}

impl AuthType {
    pub fn as_str(&self) -> &str {
        match self {
            AuthType::Password => "password",
            AuthType::Token => "token",
            AuthType::V2Password => "v2password",
            AuthType::V2Token => "v2token",
            AuthType::V3Password => "v3password",
            AuthType::V3Token => "v3token",
            AuthType::V3ApplicationCredential => "v3applicationcredential",
            AuthType::Other(s) => s,
        }
    }

    /// Token-based auth types exclude password fields
    pub fn is_token(&self) -> bool {
        self.as_str().contains("token")
    }
}

impl From<String> for AuthType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "password" => AuthType::Password,
            "token" => AuthType::Token,
            "v2password" => AuthType::V2Password,
            "v2token" => AuthType::V2Token,
            "v3password" => AuthType::V3Password,
            "v3token" => AuthType::V3Token,
            "v3applicationcredential" => AuthType::V3ApplicationCredential,
            _ => AuthType::Other(s),
        }
    }
}

impl From<&str> for AuthType {
    fn from(s: &str) -> Self {
        AuthType::from(s.to_string())
    }
}

impl From<AuthType> for String {
    fn from(t: AuthType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top level of clouds.yaml and secure.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudsFile {
    #[serde(default)]
    pub clouds: CloudMap,
}

/// Top level of clouds-public.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicCloudsFile {
    #[serde(default, rename = "public-clouds")]
    pub clouds: CloudMap,
}

/// An option counts as set only when it holds a non-empty string
pub fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Borrow the value when set and non-empty
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cloud_entry() {
        let yaml = r#"
clouds:
  mycloud:
    profile: vendorX
    auth:
      auth_url: https://keystone.example.com:5000/v3
      username: demo
      password: secret
      tenant_name: demo-project
    region_name: RegionOne
    interface: internal
    verify: false
    cacert: /etc/ssl/ca.pem
"#;
        let file: CloudsFile = serde_yaml::from_str(yaml).unwrap();
        let cloud = &file.clouds["mycloud"];
        assert_eq!(cloud.profile.as_deref(), Some("vendorX"));
        assert_eq!(cloud.verify, Some(false));
        assert_eq!(cloud.ca_cert_file.as_deref(), Some("/etc/ssl/ca.pem"));
        assert_eq!(cloud.interface.as_deref(), Some("internal"));

        let auth = cloud.auth_info.as_ref().unwrap();
        assert_eq!(auth.username.as_deref(), Some("demo"));
        // tenant_name is an alias of project_name
        assert_eq!(auth.project_name.as_deref(), Some("demo-project"));
        assert!(auth.is_project_scoped());
        assert!(!auth.is_application_credential());
    }

    #[test]
    fn test_regions_accept_names_and_maps() {
        let yaml = r#"
regions:
  - RegionOne
  - name: RegionTwo
    values:
      auth:
        auth_url: https://r2.example.com/v3
"#;
        let cloud: Cloud = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cloud.regions.len(), 2);
        assert_eq!(cloud.regions[0], Region::named("RegionOne"));

        let r2 = cloud.region("RegionTwo").unwrap();
        assert_eq!(
            r2.values.auth_info.as_ref().unwrap().auth_url.as_deref(),
            Some("https://r2.example.com/v3")
        );
        assert!(cloud.region("RegionThree").is_none());
    }

    #[test]
    fn test_auth_type() {
        let t: AuthType = "v3applicationcredential".into();
        assert_eq!(t, AuthType::V3ApplicationCredential);
        assert!(!t.is_token());
        assert!(AuthType::V2Token.is_token());
        assert!(AuthType::from("token").is_token());

        let custom = AuthType::from("v3oidcpassword");
        assert_eq!(custom, AuthType::Other("v3oidcpassword".to_string()));
        assert_eq!(custom.to_string(), "v3oidcpassword");
    }

    #[test]
    fn test_profile_name_falls_back_to_cloud() {
        let mut cloud = Cloud::new();
        assert_eq!(cloud.profile_name(), None);

        cloud.cloud = Some("rackspace".to_string());
        assert_eq!(cloud.profile_name(), Some("rackspace"));

        cloud.profile = Some("vexxhost".to_string());
        assert_eq!(cloud.profile_name(), Some("vexxhost"));

        cloud.profile = Some(String::new());
        assert_eq!(cloud.profile_name(), Some("rackspace"));
    }

    #[test]
    fn test_public_clouds_file_key() {
        let yaml = r#"
public-clouds:
  vendorX:
    regions: [east, west]
"#;
        let file: PublicCloudsFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.clouds["vendorX"].regions.len(), 2);
    }

    #[test]
    fn test_unquoted_api_versions() {
        let yaml = "clouds:\n  c:\n    identity_api_version: 3\n    volume_api_version: 2.0\n";
        let file: CloudsFile = serde_yaml::from_str(yaml).unwrap();
        let cloud = &file.clouds["c"];
        assert_eq!(cloud.identity_api_version.as_deref(), Some("3"));
        assert_eq!(cloud.volume_api_version.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_redacted_masks_region_secrets() {
        let cloud = Cloud::new()
            .with_auth(AuthInfo::new().with_password("demo", "pw"))
            .with_regions(vec![Region::with_values(
                "RegionTwo",
                Cloud::new().with_auth(AuthInfo::new().with_token("tok")),
            )]);

        let shown = cloud.redacted();
        let auth = shown.auth_info.as_ref().unwrap();
        assert_eq!(auth.username.as_deref(), Some("demo"));
        assert_eq!(auth.password.as_deref(), Some("******"));
        let region_auth = shown.regions[0].values.auth_info.as_ref().unwrap();
        assert_eq!(region_auth.token.as_deref(), Some("******"));
    }

    #[test]
    fn test_empty_cloud() {
        assert!(Cloud::new().is_empty());
        assert!(!Cloud::new().with_profile("x").is_empty());
    }
}
