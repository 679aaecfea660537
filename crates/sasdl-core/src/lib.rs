pub mod config;
pub mod logging;

pub mod catalog;
pub mod checksum;
pub mod credentials;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod progress;
pub mod transport;

pub use catalog::{CatalogKind, ChecksumSource, Descriptor, ManifestRef, Target};
pub use credentials::{CachedCredentials, CredentialProvider, Credentials};
pub use error::FetchError;
pub use fetcher::{Fetched, Fetcher, IntegrityPolicy};
pub use transport::{CurlTransport, Transport};
