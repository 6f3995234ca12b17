//! Service endpoint selection types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::IdentityVersion;

/// Which catalog interface of a service to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Public,
    Internal,
    Admin,
}

impl Availability {
    /// Map an `endpoint_type` / `interface` value. Unknown values are public.
    pub fn from_endpoint_type(endpoint_type: &str) -> Self {
        match endpoint_type {
            "internal" | "internalURL" => Availability::Internal,
            "admin" | "adminURL" => Availability::Admin,
            _ => Availability::Public,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Public => "public",
            Availability::Internal => "internal",
            Availability::Admin => "admin",
        }
    }
}

/// Catalog lookup options for one service client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub availability: Availability,
}

/// Block storage API generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeVersion {
    V1,
    V2,
    V3,
}

impl VolumeVersion {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "v1" | "1" => Some(VolumeVersion::V1),
            "v2" | "2" => Some(VolumeVersion::V2),
            "v3" | "3" => Some(VolumeVersion::V3),
            _ => None,
        }
    }
}

/// A service client the SDK knows how to construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "kebab-case")]
pub enum ServiceType {
    BareMetal,
    BareMetalIntrospection,
    Compute,
    Container,
    ContainerInfra,
    Database,
    Dns,
    Gnocchi,
    Identity { version: IdentityVersion },
    Image,
    KeyManager,
    LoadBalancer,
    /// The messaging API requires a client id on every request
    Messaging { client_id: Uuid },
    Network,
    ObjectStore,
    Orchestration,
    Placement,
    SharedFileSystem,
    Volume { version: VolumeVersion },
    Workflow,
}

impl ServiceType {
    /// Service type as registered in the service catalog
    pub fn catalog_type(&self) -> &'static str {
        match self {
            ServiceType::BareMetal => "baremetal",
            ServiceType::BareMetalIntrospection => "baremetal-introspection",
            ServiceType::Compute => "compute",
            ServiceType::Container => "container",
            ServiceType::ContainerInfra => "container-infra",
            ServiceType::Database => "database",
            ServiceType::Dns => "dns",
            ServiceType::Gnocchi => "metric",
            ServiceType::Identity { .. } => "identity",
            ServiceType::Image => "image",
            ServiceType::KeyManager => "key-manager",
            ServiceType::LoadBalancer => "load-balancer",
            ServiceType::Messaging { .. } => "messaging",
            ServiceType::Network => "network",
            ServiceType::ObjectStore => "object-store",
            ServiceType::Orchestration => "orchestration",
            ServiceType::Placement => "placement",
            ServiceType::SharedFileSystem => "sharev2",
            ServiceType::Volume { version: VolumeVersion::V1 } => "volume",
            ServiceType::Volume { version: VolumeVersion::V2 } => "volumev2",
            ServiceType::Volume { version: VolumeVersion::V3 } => "volumev3",
            ServiceType::Workflow => "workflowv2",
        }
    }
}
