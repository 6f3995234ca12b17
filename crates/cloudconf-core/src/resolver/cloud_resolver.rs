//! Resolution of one cloud entry from the layered clouds documents
//!
//! Layer order, lowest precedence first:
//! 1. Profile from clouds-public.yaml (`profile`, falling back to `cloud`)
//! 2. The entry in clouds.yaml
//! 3. The entry in secure.yaml
//! 4. The entry's own `regions` override for the requested region
//!
//! Nothing is cached: every call re-reads the documents and the environment.

use std::sync::Arc;

use crate::config::{CloudsLoader, ConfigError, ConfigResult, FileCloudsLoader};
use crate::env::{EnvSource, ProcessEnv};
use crate::logging::{SharedLogger, TracingLogger};
use crate::types::{is_set, AuthOptions, Cloud};
use super::auth_builder::build_auth_options;
use super::merge::merge_clouds;
use super::options::ClientOpts;
use super::service::{endpoint_opts, service_type, ServiceEndpoint};
use crate::transport::TlsSettings;

/// Resolves clouds, authentication options and service endpoints
///
/// # Example
///
/// ```no_run
/// use cloudconf_core::resolver::{ClientOpts, CloudResolver};
///
/// let resolver = CloudResolver::from_environment();
/// let opts = ClientOpts::for_cloud("mycloud").with_region("RegionOne");
///
/// let cloud = resolver.resolve_cloud(&opts)?;
/// let auth = resolver.auth_options(&opts)?;
/// let compute = resolver.service_endpoint("compute", &opts)?;
/// # Ok::<(), cloudconf_core::config::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct CloudResolver {
    loader: Arc<dyn CloudsLoader>,
    env: Arc<dyn EnvSource>,
    logger: SharedLogger,
}

impl CloudResolver {
    pub fn new(loader: Arc<dyn CloudsLoader>, env: Arc<dyn EnvSource>) -> Self {
        Self {
            loader,
            env,
            logger: Arc::new(TracingLogger::new()),
        }
    }

    /// Standard file search path and the process environment
    pub fn from_environment() -> Self {
        let env: Arc<dyn EnvSource> = Arc::new(ProcessEnv::new());
        let loader = FileCloudsLoader::with_env(env.clone());
        Self::new(Arc::new(loader), env)
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn env(&self) -> &dyn EnvSource {
        self.env.as_ref()
    }

    /// Resolve the selected cloud entry with all layers applied
    ///
    /// The entry is chosen by `opts.cloud`, else `${prefix}CLOUD`, else the
    /// only entry of clouds.yaml, else the only entry of secure.yaml.
    pub fn resolve_cloud(&self, opts: &ClientOpts) -> ConfigResult<Cloud> {
        let clouds = self.loader.load_clouds()?;
        self.logger.debug(&format!("Loaded {} clouds from clouds.yaml", clouds.len()));

        let requested = opts.cloud_name(self.env());
        let selected = match &requested {
            Some(name) => match clouds.get(name) {
                Some(cloud) => Some((name.clone(), cloud.clone())),
                None => return Err(ConfigError::CloudNotFound(name.clone())),
            },
            None if clouds.len() == 1 => clouds
                .iter()
                .next()
                .map(|(name, cloud)| (name.clone(), cloud.clone())),
            None => None,
        };

        let selected = match selected {
            Some((name, cloud)) => Some((name, self.apply_profile(cloud)?)),
            None => None,
        };

        let secure = self.loader.load_secure_clouds()?;
        let (name, mut cloud) = match selected {
            Some((name, cloud)) => {
                let cloud = match secure.get(&name) {
                    Some(overlay) if !overlay.is_empty() && *overlay != cloud => {
                        self.logger.debug(&format!("Applying secure.yaml overlay for cloud {}", name));
                        merge_clouds(cloud, overlay.clone())
                    }
                    _ => cloud,
                };
                (name, cloud)
            }
            None if secure.len() == 1 => {
                let (name, cloud) = secure
                    .into_iter()
                    .next()
                    .ok_or_else(|| ConfigError::CloudNotFound(String::new()))?;
                self.logger.debug(&format!("Using the only secure.yaml entry {}", name));
                (name, cloud)
            }
            None => return Err(ConfigError::CloudNotFound(requested.unwrap_or_default())),
        };
        self.logger.info(&format!("Resolved cloud {}", name));

        if let Some(region) = opts.region_name.as_deref().filter(|r| !r.is_empty()) {
            if let Some(entry) = cloud.region(region) {
                self.logger.debug(&format!("Applying overrides for region {}", region));
                let values = entry.values.clone();
                cloud = merge_clouds(cloud, values);
            }
        }

        if cloud.verify.is_none() {
            cloud.verify = Some(true);
        }

        let interface = cloud.interface.take();
        if !is_set(&cloud.endpoint_type) && is_set(&interface) {
            cloud.endpoint_type = interface;
        }

        Ok(cloud)
    }

    /// Merge the entry over its profile from clouds-public.yaml
    fn apply_profile(&self, cloud: Cloud) -> ConfigResult<Cloud> {
        let Some(profile) = cloud.profile_name().map(str::to_string) else {
            return Ok(cloud);
        };

        let public = self.loader.load_public_clouds()?;
        let base = public
            .get(&profile)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(profile.clone()))?;
        self.logger.debug(&format!("Merging profile {}", profile));
        Ok(merge_clouds(base, cloud))
    }

    /// Authentication options for the SDK
    ///
    /// When no cloud name is known the options are built from
    /// `opts.auth_info` and the environment alone.
    pub fn auth_options(&self, opts: &ClientOpts) -> ConfigResult<AuthOptions> {
        let mut cloud = match opts.cloud_name(self.env()) {
            Some(_) => self.resolve_cloud(opts)?,
            None => Cloud::new(),
        };
        if cloud.auth_info.is_none() {
            cloud.auth_info = opts.auth_info.clone();
        }

        build_auth_options(&cloud, opts, self.env())
    }

    /// Service type, catalog options and TLS settings for one service
    ///
    /// Like `auth_options`, clouds.yaml is only consulted when a cloud name
    /// is known; otherwise everything comes from the environment.
    pub fn service_endpoint(&self, service: &str, opts: &ClientOpts) -> ConfigResult<ServiceEndpoint> {
        let cloud = match opts.cloud_name(self.env()) {
            Some(_) => self.resolve_cloud(opts)?,
            None => Cloud::new(),
        };
        let env = opts.env(self.env());

        Ok(ServiceEndpoint {
            service: service_type(service, &cloud)?,
            endpoint: endpoint_opts(&cloud, opts, &env),
            tls: TlsSettings::from_cloud(&cloud, &env),
        })
    }
}

impl std::fmt::Debug for CloudResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudResolver")
            .field("env", &self.env.name())
            .finish_non_exhaustive()
    }
}
