//! Field-by-field merging of cloud entries
//!
//! `merge_clouds(low, high)`: every field set in `high` wins, every field
//! left unset in `high` keeps `low`'s value. Both structs are destructured
//! exhaustively, so adding a field without deciding how it merges does
//! not compile.

use crate::types::{AuthInfo, AuthType, Cloud, Region};

/// How one field type combines with a higher-precedence value
trait Overlay {
    fn overlay(self, high: Self) -> Self;
}

impl Overlay for Option<String> {
    fn overlay(self, high: Self) -> Self {
        match high {
            Some(v) if !v.is_empty() => Some(v),
            _ => self,
        }
    }
}

impl Overlay for Option<bool> {
    fn overlay(self, high: Self) -> Self {
        high.or(self)
    }
}

impl Overlay for bool {
    fn overlay(self, high: Self) -> Self {
        self || high
    }
}

impl Overlay for Option<AuthType> {
    fn overlay(self, high: Self) -> Self {
        match high {
            Some(t) if !t.as_str().is_empty() => Some(t),
            _ => self,
        }
    }
}

impl Overlay for Vec<Region> {
    fn overlay(self, high: Self) -> Self {
        if high.is_empty() {
            self
        } else {
            high
        }
    }
}

impl Overlay for Option<AuthInfo> {
    fn overlay(self, high: Self) -> Self {
        match (self, high) {
            (Some(low), Some(high)) => Some(merge_auth(low, high)),
            (low, None) => low,
            (None, high) => high,
        }
    }
}

/// Merge two cloud entries, `high` taking precedence
pub fn merge_clouds(low: Cloud, high: Cloud) -> Cloud {
    let Cloud {
        cloud,
        profile,
        auth_info,
        auth_type,
        region_name,
        regions,
        endpoint_type,
        interface,
        identity_api_version,
        volume_api_version,
        verify,
        ca_cert_file,
        client_cert_file,
        client_key_file,
    } = high;

    Cloud {
        cloud: low.cloud.overlay(cloud),
        profile: low.profile.overlay(profile),
        auth_info: low.auth_info.overlay(auth_info),
        auth_type: low.auth_type.overlay(auth_type),
        region_name: low.region_name.overlay(region_name),
        regions: low.regions.overlay(regions),
        endpoint_type: low.endpoint_type.overlay(endpoint_type),
        interface: low.interface.overlay(interface),
        identity_api_version: low.identity_api_version.overlay(identity_api_version),
        volume_api_version: low.volume_api_version.overlay(volume_api_version),
        verify: low.verify.overlay(verify),
        ca_cert_file: low.ca_cert_file.overlay(ca_cert_file),
        client_cert_file: low.client_cert_file.overlay(client_cert_file),
        client_key_file: low.client_key_file.overlay(client_key_file),
    }
}

/// Merge two sets of authentication material, `high` taking precedence
pub fn merge_auth(low: AuthInfo, high: AuthInfo) -> AuthInfo {
    let AuthInfo {
        auth_url,
        token,
        username,
        user_id,
        password,
        application_credential_id,
        application_credential_name,
        application_credential_secret,
        system_scope,
        project_name,
        project_id,
        user_domain_name,
        user_domain_id,
        project_domain_name,
        project_domain_id,
        domain_name,
        domain_id,
        default_domain,
        allow_reauth,
    } = high;

    AuthInfo {
        auth_url: low.auth_url.overlay(auth_url),
        token: low.token.overlay(token),
        username: low.username.overlay(username),
        user_id: low.user_id.overlay(user_id),
        password: low.password.overlay(password),
        application_credential_id: low.application_credential_id.overlay(application_credential_id),
        application_credential_name: low
            .application_credential_name
            .overlay(application_credential_name),
        application_credential_secret: low
            .application_credential_secret
            .overlay(application_credential_secret),
        system_scope: low.system_scope.overlay(system_scope),
        project_name: low.project_name.overlay(project_name),
        project_id: low.project_id.overlay(project_id),
        user_domain_name: low.user_domain_name.overlay(user_domain_name),
        user_domain_id: low.user_domain_id.overlay(user_domain_id),
        project_domain_name: low.project_domain_name.overlay(project_domain_name),
        project_domain_id: low.project_domain_id.overlay(project_domain_id),
        domain_name: low.domain_name.overlay(domain_name),
        domain_id: low.domain_id.overlay(domain_id),
        default_domain: low.default_domain.overlay(default_domain),
        allow_reauth: low.allow_reauth.overlay(allow_reauth),
    }
}
