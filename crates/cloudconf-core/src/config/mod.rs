//! Clouds document loading
//!
//! Supports multiple loaders behind the `CloudsLoader` trait:
//! - `FileCloudsLoader`: clouds.yaml / clouds-public.yaml / secure.yaml on disk
//! - `MemoryCloudsLoader`: in-memory for testing

mod traits;
mod memory;
mod file;

pub use traits::{CloudsLoader, ConfigError, ConfigResult};
pub use memory::MemoryCloudsLoader;
pub use file::{FileCloudsLoader, parse_clouds_yaml, parse_public_clouds_yaml, CLIENT_CONFIG_FILE_ENV};
