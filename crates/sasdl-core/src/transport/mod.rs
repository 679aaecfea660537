//! HTTP transport used by the fetcher.
//!
//! The [`Transport`] trait is the seam between the cache logic and the
//! network; [`CurlTransport`] is the libcurl implementation.

mod curl_easy;
mod error;

pub use curl_easy::CurlTransport;
pub use error::{classify, classify_http_status, Failure, TransferError};

use std::path::Path;

use crate::credentials::Credentials;
use crate::progress::ProgressSink;

pub trait Transport {
    /// Checks that `url` exists (HEAD). Used on a directory before fetching its manifest.
    fn probe(&self, url: &str, auth: Option<&Credentials>) -> Result<(), TransferError>;

    /// GETs `url` into `dest` (created or truncated). Returns bytes written.
    /// On error `dest` may hold a partial body; the caller discards it.
    fn download(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        dest: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<u64, TransferError>;
}

/// Last path segment of `url`, for progress labels and log lines.
pub fn label_for(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path()
                .split('/')
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        })
        .unwrap_or_else(|| url.to_string())
}
