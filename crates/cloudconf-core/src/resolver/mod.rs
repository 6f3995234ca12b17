//! Cloud resolution
//!
//! This module turns the layered clouds documents plus environment
//! variables into one merged `Cloud`, and from it authentication options
//! and service endpoint settings for the SDK.

mod merge;
mod options;
mod auth_builder;
mod service;
mod cloud_resolver;

pub use merge::{merge_clouds, merge_auth};
pub use options::ClientOpts;
pub use auth_builder::{build_auth_options, determine_identity_api, set_domain_if_needed};
pub use service::{endpoint_opts, service_type, supported_services, ServiceEndpoint};
pub use cloud_resolver::CloudResolver;
