//! Transfer error type and its classification for the fetcher.

use std::fmt;

/// Error returned by a single transfer (curl failure, HTTP status, or local write failure).
/// Kept separate from `FetchError` so the fetcher can classify it before deciding
/// between a prompt, a soft skip, or a fatal error.
#[derive(Debug)]
pub enum TransferError {
    /// Curl reported an error (DNS, connection, TLS, timeout...).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the body to disk failed. Not a network problem.
    Storage(std::io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Curl(e) => write!(f, "{}", e),
            TransferError::Http(code) => write!(f, "HTTP {}", code),
            TransferError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Curl(e) => Some(e),
            TransferError::Storage(e) => Some(e),
            TransferError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for TransferError {
    fn from(e: curl::Error) -> Self {
        TransferError::Curl(e)
    }
}

/// How the fetcher reacts to a failed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// 401: obtain credentials and retry, or give up with an auth error.
    Unauthorized,
    /// 404: remote object absent; skip.
    NotFound,
    /// Local disk failure; fatal.
    Storage,
    /// Anything else; skip with a warning.
    Other,
}

pub fn classify_http_status(code: u32) -> Failure {
    match code {
        401 => Failure::Unauthorized,
        404 | 410 => Failure::NotFound,
        _ => Failure::Other,
    }
}

pub fn classify(e: &TransferError) -> Failure {
    match e {
        TransferError::Http(code) => classify_http_status(*code),
        TransferError::Storage(_) => Failure::Storage,
        TransferError::Curl(_) => Failure::Other,
    }
}
