//! TLS settings for the HTTP client handed to the SDK

use std::fs;
use std::path::Path;

use reqwest::{Certificate, ClientBuilder, Identity};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigResult};
use crate::env::PrefixedEnv;
use crate::types::{non_empty, Cloud};

/// Certificate paths and verification mode for one cloud
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_cert_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key_file: Option<String>,
    /// Skip server certificate verification; `None` leaves the client default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl TlsSettings {
    /// Paths from `${prefix}CACERT`, `CERT` and `KEY`, overridden by the
    /// cloud's `cacert`, `cert` and `key`
    pub fn from_cloud(cloud: &Cloud, env: &PrefixedEnv<'_>) -> Self {
        let pick = |field: &Option<String>, var: &str| {
            non_empty(field).map(str::to_string).or_else(|| env.get(var))
        };

        Self {
            ca_cert_file: pick(&cloud.ca_cert_file, "CACERT"),
            client_cert_file: pick(&cloud.client_cert_file, "CERT"),
            client_key_file: pick(&cloud.client_key_file, "KEY"),
            insecure: cloud.verify.map(|verify| !verify),
        }
    }

    pub fn is_insecure(&self) -> bool {
        self.insecure.unwrap_or(false)
    }

    /// Configure a reqwest client builder
    ///
    /// Reads the CA bundle and the client key pair from disk. A client
    /// certificate without a key (or a key without a certificate) is an error.
    pub fn apply(&self, mut builder: ClientBuilder) -> ConfigResult<ClientBuilder> {
        if let Some(path) = &self.ca_cert_file {
            let pem = read_pem(path)?;
            let cert = Certificate::from_pem(&pem)
                .map_err(|e| ConfigError::Tls(format!("invalid CA certificate {}: {}", path, e)))?;
            builder = builder.add_root_certificate(cert);
        }

        match (&self.client_cert_file, &self.client_key_file) {
            (Some(cert_path), Some(key_path)) => {
                let cert = read_pem(cert_path)?;
                let key = read_pem(key_path)?;
                let identity = Identity::from_pkcs8_pem(&cert, &key).map_err(|e| {
                    ConfigError::Tls(format!(
                        "invalid client certificate {} / key {}: {}",
                        cert_path, key_path, e
                    ))
                })?;
                builder = builder.identity(identity);
            }
            (Some(cert_path), None) => {
                return Err(ConfigError::Tls(format!(
                    "client certificate {} given without a key",
                    cert_path
                )));
            }
            (None, Some(key_path)) => {
                return Err(ConfigError::Tls(format!(
                    "client key {} given without a certificate",
                    key_path
                )));
            }
            (None, None) => {}
        }

        if self.is_insecure() {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder)
    }

    /// Build an HTTP client with these settings
    pub fn http_client(&self) -> ConfigResult<reqwest::Client> {
        self.apply(reqwest::Client::builder().use_native_tls())?
            .build()
            .map_err(|e| ConfigError::Tls(e.to_string()))
    }
}

fn read_pem(path: &str) -> ConfigResult<Vec<u8>> {
    fs::read(path).map_err(|e| ConfigError::io(Path::new(path), e))
}
