//! Authentication options for identity v2 and v3
//!
//! Fields missing from the cloud entry are filled from `${prefix}*`
//! environment variables, then the v3 scope is derived the way
//! os-client-config does it.

use crate::config::{ConfigError, ConfigResult};
use crate::env::{EnvSource, PrefixedEnv};
use crate::types::{
    is_set, non_empty, AuthInfo, AuthOptions, AuthScope, AuthType, Cloud, IdentityVersion,
};
use super::options::ClientOpts;

/// Build authentication options from a resolved cloud entry
///
/// Fails with `MissingRequiredField("auth_url")` when no identity endpoint
/// is known after environment fallback.
pub fn build_auth_options(
    cloud: &Cloud,
    opts: &ClientOpts,
    env: &dyn EnvSource,
) -> ConfigResult<AuthOptions> {
    let env = opts.env(env);
    let auth_type = cloud.auth_type.clone().or_else(|| opts.auth_type.clone());
    let auth = cloud.auth_info.clone().unwrap_or_default();

    let mut options = match determine_identity_api(cloud, auth_type.as_ref(), &env)? {
        IdentityVersion::V2 => v2_auth(auth, &env),
        IdentityVersion::V3 => v3_auth(auth, &env),
    };

    // Applied after every source (yaml and environment) has been consulted.
    if auth_type.as_ref().is_some_and(AuthType::is_token) || options.token_id.is_some() {
        options.username = None;
        options.password = None;
        options.user_id = None;
        options.domain_id = None;
        options.domain_name = None;
    }

    if options.identity_endpoint.is_empty() {
        return Err(ConfigError::missing("auth_url"));
    }

    Ok(options)
}

/// Identity API version: cloud field, `${prefix}IDENTITY_API_VERSION`,
/// the auth URL, the auth type, then v3
pub fn determine_identity_api(
    cloud: &Cloud,
    auth_type: Option<&AuthType>,
    env: &PrefixedEnv<'_>,
) -> ConfigResult<IdentityVersion> {
    // A version pinned in the cloud entry is not overridden by the environment.
    let explicit = non_empty(&cloud.identity_api_version)
        .map(str::to_string)
        .or_else(|| env.get("IDENTITY_API_VERSION"));
    if let Some(version) = explicit {
        return IdentityVersion::parse(&version)
            .ok_or(ConfigError::UnsupportedIdentityVersion(version));
    }

    let auth_url = cloud
        .auth_info
        .as_ref()
        .and_then(|a| non_empty(&a.auth_url))
        .unwrap_or_default();
    if auth_url.contains("v3") {
        return Ok(IdentityVersion::V3);
    }
    if auth_url.contains("v2.0") {
        return Ok(IdentityVersion::V2);
    }

    let from_type = match auth_type {
        Some(AuthType::V2Password | AuthType::V2Token) => Some(IdentityVersion::V2),
        Some(
            AuthType::V3Password | AuthType::V3Token | AuthType::V3ApplicationCredential,
        ) => Some(IdentityVersion::V3),
        _ => None,
    };

    Ok(from_type.unwrap_or(IdentityVersion::V3))
}

/// Fill `field` from the environment when unset; with several names the last one set wins
fn fill(field: &mut Option<String>, env: &PrefixedEnv<'_>, names: &[&str]) {
    if !is_set(field) {
        if let Some(value) = env.get_last(names) {
            *field = Some(value);
        }
    }
}

fn fill_common(auth: &mut AuthInfo, env: &PrefixedEnv<'_>) {
    fill(&mut auth.auth_url, env, &["AUTH_URL"]);
    fill(&mut auth.token, env, &["TOKEN", "AUTH_TOKEN"]);
    fill(&mut auth.username, env, &["USERNAME"]);
    fill(&mut auth.password, env, &["PASSWORD"]);
    fill(&mut auth.project_id, env, &["TENANT_ID", "PROJECT_ID"]);
    fill(&mut auth.project_name, env, &["TENANT_NAME", "PROJECT_NAME"]);
}

fn owned(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

fn v2_auth(mut auth: AuthInfo, env: &PrefixedEnv<'_>) -> AuthOptions {
    fill_common(&mut auth, env);

    AuthOptions {
        identity_version: IdentityVersion::V2,
        identity_endpoint: owned(&auth.auth_url).unwrap_or_default(),
        token_id: owned(&auth.token),
        username: owned(&auth.username),
        user_id: None,
        password: owned(&auth.password),
        tenant_id: owned(&auth.project_id),
        tenant_name: owned(&auth.project_name),
        domain_id: None,
        domain_name: None,
        application_credential_id: None,
        application_credential_name: None,
        application_credential_secret: None,
        allow_reauth: auth.allow_reauth,
        scope: None,
    }
}

fn v3_auth(mut auth: AuthInfo, env: &PrefixedEnv<'_>) -> AuthOptions {
    fill_common(&mut auth, env);
    fill(&mut auth.user_id, env, &["USER_ID"]);
    fill(&mut auth.domain_id, env, &["DOMAIN_ID"]);
    fill(&mut auth.domain_name, env, &["DOMAIN_NAME"]);
    fill(&mut auth.default_domain, env, &["DEFAULT_DOMAIN"]);
    fill(&mut auth.project_domain_id, env, &["PROJECT_DOMAIN_ID"]);
    fill(&mut auth.project_domain_name, env, &["PROJECT_DOMAIN_NAME"]);
    fill(&mut auth.user_domain_id, env, &["USER_DOMAIN_ID"]);
    fill(&mut auth.user_domain_name, env, &["USER_DOMAIN_NAME"]);
    fill(&mut auth.application_credential_id, env, &["APPLICATION_CREDENTIAL_ID"]);
    fill(&mut auth.application_credential_name, env, &["APPLICATION_CREDENTIAL_NAME"]);
    fill(&mut auth.application_credential_secret, env, &["APPLICATION_CREDENTIAL_SECRET"]);
    fill(&mut auth.system_scope, env, &["SYSTEM_SCOPE"]);

    let mut scope = AuthScope::default();
    if auth.is_application_credential() {
        // application credentials carry their own scope
        set_domain_if_needed(&mut auth);
    } else if !auth.is_project_scoped() {
        if is_set(&auth.domain_id) {
            scope.domain_id = owned(&auth.domain_id);
        } else if is_set(&auth.domain_name) {
            scope.domain_name = owned(&auth.domain_name);
        }
        scope.system = is_set(&auth.system_scope);
    } else {
        set_domain_if_needed(&mut auth);
        if is_set(&auth.project_id) {
            scope.project_id = owned(&auth.project_id);
        } else {
            scope.project_name = owned(&auth.project_name);
            scope.domain_id = owned(&auth.project_domain_id);
            scope.domain_name = owned(&auth.project_domain_name);
        }
    }

    AuthOptions {
        identity_version: IdentityVersion::V3,
        identity_endpoint: owned(&auth.auth_url).unwrap_or_default(),
        token_id: owned(&auth.token),
        username: owned(&auth.username),
        user_id: owned(&auth.user_id),
        password: owned(&auth.password),
        tenant_id: owned(&auth.project_id),
        tenant_name: owned(&auth.project_name),
        domain_id: owned(&auth.user_domain_id),
        domain_name: owned(&auth.user_domain_name),
        application_credential_id: owned(&auth.application_credential_id),
        application_credential_name: owned(&auth.application_credential_name),
        application_credential_secret: owned(&auth.application_credential_secret),
        allow_reauth: auth.allow_reauth,
        scope: (!scope.is_empty()).then_some(scope),
    }
}

/// Use a bare domain id/name (or the default domain) for the user and
/// project domains when those are not set
pub fn set_domain_if_needed(auth: &mut AuthInfo) {
    if let Some(domain_id) = auth.domain_id.take().filter(|d| !d.is_empty()) {
        if !is_set(&auth.user_domain_id) {
            auth.user_domain_id = Some(domain_id.clone());
        }
        if !is_set(&auth.project_domain_id) {
            auth.project_domain_id = Some(domain_id);
        }
    }

    if let Some(domain_name) = auth.domain_name.take().filter(|d| !d.is_empty()) {
        if !is_set(&auth.user_domain_name) {
            auth.user_domain_name = Some(domain_name.clone());
        }
        if !is_set(&auth.project_domain_name) {
            auth.project_domain_name = Some(domain_name);
        }
    }

    if let Some(default_domain) = owned(&auth.default_domain) {
        if !is_set(&auth.user_domain_name) && !is_set(&auth.user_domain_id) {
            auth.user_domain_id = Some(default_domain.clone());
        }
        if !is_set(&auth.project_domain_name) && !is_set(&auth.project_domain_id) {
            auth.project_domain_id = Some(default_domain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;

    const URL_V3: &str = "https://keystone.example.com:5000/v3";

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn cloud(auth: AuthInfo) -> Cloud {
        Cloud::new().with_auth(auth)
    }

    fn build(cloud: &Cloud, env: &MemoryEnv) -> ConfigResult<AuthOptions> {
        build_auth_options(cloud, &ClientOpts::new(), env)
    }

    #[test]
    fn test_identity_version_precedence() {
        let env = MemoryEnv::new().with_var("OS_IDENTITY_API_VERSION", "2");
        let view = PrefixedEnv::new(&env, None);

        // explicit field first
        let mut c = cloud(AuthInfo::new().with_auth_url("https://k/v2.0"));
        c.identity_api_version = s("3");
        assert_eq!(determine_identity_api(&c, None, &view).unwrap(), IdentityVersion::V3);

        // then the environment
        c.identity_api_version = None;
        assert_eq!(determine_identity_api(&c, None, &view).unwrap(), IdentityVersion::V2);

        // then the URL
        let empty = MemoryEnv::new();
        let view = PrefixedEnv::new(&empty, None);
        assert_eq!(determine_identity_api(&c, None, &view).unwrap(), IdentityVersion::V2);
        let c3 = cloud(AuthInfo::new().with_auth_url(URL_V3));
        assert_eq!(determine_identity_api(&c3, None, &view).unwrap(), IdentityVersion::V3);

        // then the auth type, then v3
        let bare = Cloud::new();
        assert_eq!(
            determine_identity_api(&bare, Some(&AuthType::V2Token), &view).unwrap(),
            IdentityVersion::V2
        );
        assert_eq!(determine_identity_api(&bare, None, &view).unwrap(), IdentityVersion::V3);
    }

    #[test]
    fn test_unsupported_identity_version() {
        let mut c = cloud(AuthInfo::new().with_auth_url(URL_V3));
        c.identity_api_version = s("4");
        let err = build(&c, &MemoryEnv::new()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedIdentityVersion(v) if v == "4"));
    }

    #[test]
    fn test_v2_env_fallback() {
        let env = MemoryEnv::new()
            .with_var("OS_AUTH_URL", "https://keystone.example.com:5000/v2.0")
            .with_var("OS_USERNAME", "admin")
            .with_var("OS_PASSWORD", "secret")
            .with_var("OS_TENANT_NAME", "tenant")
            .with_var("OS_PROJECT_NAME", "project");

        let opts = build(&Cloud::new(), &env).unwrap();
        // URL came from the environment, so the version is inferred from the cloud only
        assert_eq!(opts.identity_version, IdentityVersion::V3);

        let mut c = Cloud::new();
        c.identity_api_version = s("2.0");
        let opts = build(&c, &env).unwrap();
        assert_eq!(opts.identity_version, IdentityVersion::V2);
        assert_eq!(opts.identity_endpoint, "https://keystone.example.com:5000/v2.0");
        assert_eq!(opts.username.as_deref(), Some("admin"));
        assert_eq!(opts.password.as_deref(), Some("secret"));
        // PROJECT_NAME is read after TENANT_NAME
        assert_eq!(opts.tenant_name.as_deref(), Some("project"));
        assert!(opts.scope.is_none());
    }

    #[test]
    fn test_yaml_values_win_over_env() {
        let env = MemoryEnv::new()
            .with_var("OS_USERNAME", "env-user")
            .with_var("OS_AUTH_URL", "https://env.example.com/v3");
        let c = cloud(
            AuthInfo::new()
                .with_auth_url(URL_V3)
                .with_password("yaml-user", "pw"),
        );

        let opts = build(&c, &env).unwrap();
        assert_eq!(opts.identity_endpoint, URL_V3);
        assert_eq!(opts.username.as_deref(), Some("yaml-user"));
    }

    #[test]
    fn test_custom_env_prefix() {
        let env = MemoryEnv::new()
            .with_var("OS_AUTH_URL", "https://os.example.com/v3")
            .with_var("ACME_AUTH_URL", "https://acme.example.com/v3");
        let opts = build_auth_options(
            &Cloud::new(),
            &ClientOpts::new().with_env_prefix("ACME_"),
            &env,
        )
        .unwrap();
        assert_eq!(opts.identity_endpoint, "https://acme.example.com/v3");
    }

    #[test]
    fn test_project_scope_by_name_with_domain_defaulting() {
        let c = cloud(AuthInfo {
            auth_url: s(URL_V3),
            username: s("demo"),
            password: s("pw"),
            project_name: s("demo-project"),
            domain_name: s("Default"),
            ..AuthInfo::default()
        });

        let opts = build(&c, &MemoryEnv::new()).unwrap();
        let scope = opts.scope.unwrap();
        assert_eq!(scope.project_name.as_deref(), Some("demo-project"));
        assert_eq!(scope.domain_name.as_deref(), Some("Default"));
        assert!(scope.project_id.is_none());
        // user domain comes from the bare domain name
        assert_eq!(opts.domain_name.as_deref(), Some("Default"));
    }

    #[test]
    fn test_project_scope_by_id() {
        let c = cloud(AuthInfo {
            auth_url: s(URL_V3),
            project_id: s("abc123"),
            project_name: s("ignored"),
            ..AuthInfo::default()
        });

        let scope = build(&c, &MemoryEnv::new()).unwrap().scope.unwrap();
        assert_eq!(scope.project_id.as_deref(), Some("abc123"));
        assert!(scope.project_name.is_none());
        assert!(scope.domain_id.is_none());
    }

    #[test]
    fn test_domain_scope() {
        let c = cloud(AuthInfo {
            auth_url: s(URL_V3),
            domain_id: s("d-1"),
            domain_name: s("ignored"),
            ..AuthInfo::default()
        });
        let scope = build(&c, &MemoryEnv::new()).unwrap().scope.unwrap();
        assert_eq!(scope.domain_id.as_deref(), Some("d-1"));
        assert!(scope.domain_name.is_none());
        assert!(!scope.system);
    }

    #[test]
    fn test_system_scope_from_env() {
        let env = MemoryEnv::new().with_var("OS_SYSTEM_SCOPE", "all");
        let c = cloud(AuthInfo::new().with_auth_url(URL_V3));
        let scope = build(&c, &env).unwrap().scope.unwrap();
        assert!(scope.system);
    }

    #[test]
    fn test_unscoped() {
        let c = cloud(AuthInfo::new().with_auth_url(URL_V3).with_password("u", "p"));
        assert!(build(&c, &MemoryEnv::new()).unwrap().scope.is_none());
    }

    #[test]
    fn test_application_credential_has_no_scope() {
        let c = cloud(AuthInfo {
            auth_url: s(URL_V3),
            application_credential_id: s("ac-id"),
            application_credential_secret: s("ac-secret"),
            project_name: s("would-scope"),
            domain_id: s("d-1"),
            ..AuthInfo::default()
        });

        let opts = build(&c, &MemoryEnv::new()).unwrap();
        assert!(opts.scope.is_none());
        assert_eq!(opts.application_credential_id.as_deref(), Some("ac-id"));
        // domain defaulting still applies to the user domain
        assert_eq!(opts.domain_id.as_deref(), Some("d-1"));
    }

    #[test]
    fn test_application_credential_from_env() {
        let env = MemoryEnv::new()
            .with_var("OS_AUTH_URL", URL_V3)
            .with_var("OS_APPLICATION_CREDENTIAL_NAME", "ci")
            .with_var("OS_APPLICATION_CREDENTIAL_SECRET", "shh");
        let opts = build(&Cloud::new(), &env).unwrap();
        assert!(opts.scope.is_none());
        assert_eq!(opts.application_credential_name.as_deref(), Some("ci"));
        assert!(opts.tenant_id.is_none() && opts.tenant_name.is_none());
    }

    #[test]
    fn test_token_clears_password_fields() {
        let c = cloud(AuthInfo {
            auth_url: s(URL_V3),
            token: s("tok"),
            username: s("demo"),
            user_id: s("uid"),
            password: s("pw"),
            user_domain_id: s("ud"),
            user_domain_name: s("UD"),
            project_id: s("p"),
            ..AuthInfo::default()
        });

        let opts = build(&c, &MemoryEnv::new()).unwrap();
        assert_eq!(opts.token_id.as_deref(), Some("tok"));
        assert!(opts.username.is_none());
        assert!(opts.password.is_none());
        assert!(opts.user_id.is_none());
        assert!(opts.domain_id.is_none());
        assert!(opts.domain_name.is_none());
        // scope is kept
        assert_eq!(opts.scope.unwrap().project_id.as_deref(), Some("p"));
    }

    #[test]
    fn test_token_auth_type_clears_password_fields() {
        let mut c = cloud(AuthInfo::new().with_auth_url(URL_V3).with_password("u", "p"));
        c.auth_type = Some(AuthType::V3Token);
        let opts = build(&c, &MemoryEnv::new()).unwrap();
        assert!(opts.username.is_none());
        assert!(opts.password.is_none());
    }

    #[test]
    fn test_token_from_env_applies_to_v2() {
        let env = MemoryEnv::new()
            .with_var("OS_TOKEN", "first")
            .with_var("OS_AUTH_TOKEN", "second");
        let c = cloud(AuthInfo::new().with_auth_url("https://k/v2.0").with_password("u", "p"));

        let opts = build(&c, &env).unwrap();
        assert_eq!(opts.identity_version, IdentityVersion::V2);
        assert_eq!(opts.token_id.as_deref(), Some("second"));
        assert!(opts.username.is_none());
        assert!(opts.password.is_none());
    }

    #[test]
    fn test_missing_auth_url() {
        let err = build(&Cloud::new(), &MemoryEnv::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredField(ref f) if f == "auth_url"));

        let mut c = Cloud::new();
        c.identity_api_version = s("2");
        assert!(matches!(
            build(&c, &MemoryEnv::new()),
            Err(ConfigError::MissingRequiredField(_))
        ));
    }

    #[test]
    fn test_opts_auth_type_used_when_cloud_has_none() {
        let c = cloud(AuthInfo::new().with_auth_url("https://k/").with_password("u", "p"));
        let opts = build_auth_options(
            &c,
            &ClientOpts::new().with_auth_type(AuthType::V2Token),
            &MemoryEnv::new(),
        )
        .unwrap();
        assert_eq!(opts.identity_version, IdentityVersion::V2);
        assert!(opts.username.is_none());
    }

    #[test]
    fn test_set_domain_if_needed() {
        let mut auth = AuthInfo {
            domain_id: s("d"),
            project_domain_id: s("pd"),
            default_domain: s("default"),
            ..AuthInfo::default()
        };
        set_domain_if_needed(&mut auth);
        assert_eq!(auth.user_domain_id.as_deref(), Some("d"));
        assert_eq!(auth.project_domain_id.as_deref(), Some("pd"));
        assert!(auth.domain_id.is_none());

        let mut auth = AuthInfo {
            default_domain: s("default"),
            user_domain_name: s("Users"),
            ..AuthInfo::default()
        };
        set_domain_if_needed(&mut auth);
        assert!(auth.user_domain_id.is_none());
        assert_eq!(auth.project_domain_id.as_deref(), Some("default"));
    }
}
