//! Service client dispatch and endpoint selection

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ConfigError, ConfigResult};
use crate::env::PrefixedEnv;
use crate::transport::TlsSettings;
use crate::types::{
    non_empty, Availability, Cloud, EndpointOpts, IdentityVersion, ServiceType, VolumeVersion,
};
use super::options::ClientOpts;

type ServiceBuilder = fn(&Cloud) -> ConfigResult<ServiceType>;

/// Service names accepted by `service_type`
static SERVICES: Lazy<HashMap<&'static str, ServiceBuilder>> = Lazy::new(|| {
    let mut services: HashMap<&'static str, ServiceBuilder> = HashMap::new();
    services.insert("baremetal", |_| Ok(ServiceType::BareMetal));
    services.insert("baremetal-introspection", |_| Ok(ServiceType::BareMetalIntrospection));
    services.insert("compute", |_| Ok(ServiceType::Compute));
    services.insert("container", |_| Ok(ServiceType::Container));
    services.insert("container-infra", |_| Ok(ServiceType::ContainerInfra));
    services.insert("database", |_| Ok(ServiceType::Database));
    services.insert("dns", |_| Ok(ServiceType::Dns));
    services.insert("gnocchi", |_| Ok(ServiceType::Gnocchi));
    services.insert("identity", identity_service);
    services.insert("image", |_| Ok(ServiceType::Image));
    services.insert("key-manager", |_| Ok(ServiceType::KeyManager));
    services.insert("load-balancer", |_| Ok(ServiceType::LoadBalancer));
    services.insert("messaging", |_| {
        Ok(ServiceType::Messaging {
            client_id: Uuid::new_v4(),
        })
    });
    services.insert("network", |_| Ok(ServiceType::Network));
    services.insert("object-store", |_| Ok(ServiceType::ObjectStore));
    services.insert("orchestration", |_| Ok(ServiceType::Orchestration));
    services.insert("placement", |_| Ok(ServiceType::Placement));
    services.insert("sharev2", |_| Ok(ServiceType::SharedFileSystem));
    services.insert("volume", volume_service);
    services.insert("workflowv2", |_| Ok(ServiceType::Workflow));
    services
});

fn identity_service(cloud: &Cloud) -> ConfigResult<ServiceType> {
    let version = non_empty(&cloud.identity_api_version).unwrap_or("3");
    let version = IdentityVersion::parse(version)
        .ok_or_else(|| ConfigError::UnsupportedIdentityVersion(version.to_string()))?;
    Ok(ServiceType::Identity { version })
}

fn volume_service(cloud: &Cloud) -> ConfigResult<ServiceType> {
    let version = non_empty(&cloud.volume_api_version).unwrap_or("3");
    let version = VolumeVersion::parse(version)
        .ok_or_else(|| ConfigError::UnsupportedVolumeVersion(version.to_string()))?;
    Ok(ServiceType::Volume { version })
}

/// Map a service name to the client the SDK should build for it
pub fn service_type(service: &str, cloud: &Cloud) -> ConfigResult<ServiceType> {
    let build = SERVICES
        .get(service)
        .ok_or_else(|| ConfigError::UnsupportedService(service.to_string()))?;
    build(cloud)
}

/// Names of every supported service, sorted
pub fn supported_services() -> Vec<&'static str> {
    let mut names: Vec<_> = SERVICES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Region and interface for catalog lookups
///
/// Each is taken from the options, else the cloud, else `${prefix}REGION_NAME`
/// and `${prefix}INTERFACE`.
pub fn endpoint_opts(cloud: &Cloud, opts: &ClientOpts, env: &PrefixedEnv<'_>) -> EndpointOpts {
    let region = non_empty(&opts.region_name)
        .or_else(|| non_empty(&cloud.region_name))
        .map(str::to_string)
        .or_else(|| env.get("REGION_NAME"));

    let endpoint_type = non_empty(&opts.endpoint_type)
        .or_else(|| non_empty(&cloud.endpoint_type))
        .map(str::to_string)
        .or_else(|| env.get("INTERFACE"));

    EndpointOpts {
        region,
        availability: endpoint_type
            .as_deref()
            .map(Availability::from_endpoint_type)
            .unwrap_or_default(),
    }
}

/// Everything the SDK needs to construct one service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub service: ServiceType,
    pub endpoint: EndpointOpts,
    pub tls: TlsSettings,
}
