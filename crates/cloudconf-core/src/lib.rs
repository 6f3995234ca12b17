//! cloudconf Core
//!
//! Layered clouds.yaml resolution for OpenStack-style clouds.
//! This crate merges clouds.yaml, clouds-public.yaml and secure.yaml,
//! selects one cloud, fills authentication from `OS_*` environment
//! variables and produces the options an SDK needs to authenticate and
//! build service clients.
//!
//! ## Resolution
//!
//! File loading and environment lookups are injected, so the same
//! resolver runs against the real search path or against in-memory
//! fixtures:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cloudconf_core::{ClientOpts, CloudResolver, FileCloudsLoader, ProcessEnv};
//!
//! let env = Arc::new(ProcessEnv::new());
//! let loader = Arc::new(FileCloudsLoader::with_env(env.clone()));
//! let resolver = CloudResolver::new(loader, env);
//!
//! let opts = ClientOpts::for_cloud("mycloud");
//! let auth = resolver.auth_options(&opts)?;
//! let network = resolver.service_endpoint("network", &opts)?;
//! let client = network.tls.http_client()?;
//! # Ok::<(), cloudconf_core::ConfigError>(())
//! ```

pub mod types;
pub mod env;
pub mod logging;
pub mod config;
pub mod resolver;
pub mod transport;

// Re-export commonly used types
pub use types::{
    Cloud, AuthInfo, Region, AuthType, CloudMap,
    AuthOptions, AuthScope, IdentityVersion,
    Availability, EndpointOpts, ServiceType, VolumeVersion,
};

pub use env::{EnvSource, ProcessEnv, MemoryEnv, PrefixedEnv};

pub use logging::{Logger, SharedLogger, NoOpLogger, TracingLogger};

pub use config::{
    CloudsLoader, ConfigError, ConfigResult,
    FileCloudsLoader, MemoryCloudsLoader,
};

pub use resolver::{ClientOpts, CloudResolver, ServiceEndpoint, merge_clouds};

pub use transport::TlsSettings;
