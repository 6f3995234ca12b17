//! Transport settings for service clients

mod tls;

pub use tls::TlsSettings;
