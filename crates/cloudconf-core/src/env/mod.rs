//! Environment variable sources
//!
//! - `EnvSource` trait for injecting lookups into the resolver
//! - Built-in implementations: `ProcessEnv`, `MemoryEnv`
//! - `PrefixedEnv` for `OS_`-style prefixed names

mod traits;
mod process_env;
mod memory_env;
mod prefixed;

pub use traits::EnvSource;
pub use process_env::ProcessEnv;
pub use memory_env::MemoryEnv;
pub use prefixed::{PrefixedEnv, DEFAULT_ENV_PREFIX};
