//! Core types for cloud configuration
//!
//! This module contains the clouds.yaml data model and the values the
//! resolver hands to the SDK.

mod cloud;
mod auth;
mod endpoint;

pub use cloud::{
    Cloud, AuthInfo, Region, AuthType, CloudMap, CloudsFile, PublicCloudsFile,
    is_set, non_empty,
};
pub use auth::{AuthOptions, AuthScope, IdentityVersion};
pub use endpoint::{Availability, EndpointOpts, ServiceType, VolumeVersion};
