//! Fatal errors raised by the fetcher.
//!
//! Everything a batch job can survive (missing remote file, transport
//! failure, persistent corruption) is reported through
//! [`Fetched`](crate::fetcher::Fetched) instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogKind;

#[derive(Error, Debug)]
pub enum FetchError {
    /// No layout row exists for this kind and release.
    #[error("{kind} is not available for DR{release} (supported: {})", format_releases(.supported))]
    UnsupportedRelease {
        kind: CatalogKind,
        release: u32,
        supported: Vec<u32>,
    },

    /// The layout needs an identifier the descriptor does not carry.
    #[error("{kind} for DR{release} requires `{name}`")]
    MissingIdentifier {
        kind: CatalogKind,
        release: u32,
        name: &'static str,
    },

    /// An identifier would escape the cache directory or break the URL.
    #[error("invalid {name} identifier: {value:?}")]
    InvalidIdentifier { name: &'static str, value: String },

    /// The configured archive base URL cannot be parsed.
    #[error("invalid archive base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// Neither `SDSS_LOCAL_SAS_MIRROR` nor `data_root` in config.toml is set.
    #[error("no local data root: set SDSS_LOCAL_SAS_MIRROR or data_root in config.toml")]
    MissingDataRoot,

    /// The server rejected the supplied credentials; the cached pair was cleared.
    #[error("wrong username or password for {url}")]
    Authentication { url: String },

    /// Reading credentials from the terminal failed.
    #[error("credential prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A local file could not be hashed or a manifest could not be read.
    #[error("cannot read {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the request itself (bad release or identifiers),
    /// raised before any filesystem or network access.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FetchError::UnsupportedRelease { .. }
                | FetchError::MissingIdentifier { .. }
                | FetchError::InvalidIdentifier { .. }
                | FetchError::InvalidBaseUrl { .. }
                | FetchError::MissingDataRoot
        )
    }
}

fn format_releases(releases: &[u32]) -> String {
    if releases.is_empty() {
        return "none".to_string();
    }
    releases
        .iter()
        .map(|r| format!("DR{r}"))
        .collect::<Vec<_>>()
        .join(", ")
}
