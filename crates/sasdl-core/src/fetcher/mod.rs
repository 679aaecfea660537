//! Cached fetcher: local cache lookup, integrity check, bounded re-fetch.
//!
//! `fetch` resolves a [`Descriptor`] to a [`Target`], finds the expected
//! checksum (fixed per release, or from the directory manifest), then either
//! accepts the cached file or downloads it. A file that fails verification is
//! downloaded again at most [`IntegrityPolicy::max_refetches`] times.

mod download;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{self, ChecksumSource, Descriptor, ManifestRef, Target};
use crate::checksum::{digests_match, file_digest, HashAlgorithm};
use crate::config::SasdlConfig;
use crate::credentials::CredentialProvider;
use crate::error::FetchError;
use crate::manifest::ChecksumManifest;
use crate::progress::{NoProgress, ProgressSink};
use crate::transport::{classify, CurlTransport, Failure, Transport};

/// Outcome of a fetch that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// Verified (or unverifiable) local copy.
    Ready(PathBuf),
    /// The remote object or its directory does not exist.
    NotFound { url: String },
    /// The server wants credentials and none were provided.
    AuthRequired { url: String },
    /// Any other transfer failure.
    Transport { url: String, message: String },
    /// Still failing verification after the allowed re-fetches.
    Corrupt {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

impl Fetched {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Fetched::Ready(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Fetched::Ready(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Fetched::Ready(_))
    }
}

/// Bound on corruption recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityPolicy {
    pub max_refetches: u32,
}

impl Default for IntegrityPolicy {
    fn default() -> Self {
        Self { max_refetches: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Expected {
    algorithm: HashAlgorithm,
    digest: String,
}

enum Verdict {
    Valid,
    Mismatch { expected: String, actual: String },
}

pub struct Fetcher<T, C> {
    transport: T,
    credentials: C,
    data_root: PathBuf,
    base_url: String,
    policy: IntegrityPolicy,
    progress: Box<dyn ProgressSink>,
}

impl<C: CredentialProvider> Fetcher<CurlTransport, C> {
    /// Builds a libcurl-backed fetcher from the loaded configuration.
    pub fn from_config(cfg: &SasdlConfig, credentials: C) -> Result<Self, FetchError> {
        let transport = CurlTransport::new(cfg.connect_timeout_secs.map(Duration::from_secs));
        let fetcher = Fetcher::new(transport, credentials, cfg.resolve_data_root()?, &cfg.base_url)
            .with_policy(IntegrityPolicy {
                max_refetches: cfg.max_refetches,
            });
        Ok(fetcher)
    }
}

impl<T: Transport, C: CredentialProvider> Fetcher<T, C> {
    pub fn new(
        transport: T,
        credentials: C,
        data_root: impl Into<PathBuf>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            data_root: data_root.into(),
            base_url: base_url.into(),
            policy: IntegrityPolicy::default(),
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_policy(mut self, policy: IntegrityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Local path, URL and checksum source for `descriptor`, without any I/O.
    pub fn resolve(&self, descriptor: &Descriptor) -> Result<Target, FetchError> {
        catalog::resolve(descriptor, &self.data_root, &self.base_url)
    }

    /// Returns a verified local copy of `descriptor`, downloading it when absent,
    /// corrupt, or `force` is set.
    pub fn fetch(&self, descriptor: &Descriptor, force: bool) -> Result<Fetched, FetchError> {
        let target = self.resolve(descriptor)?;
        self.fetch_target(&target, force)
    }

    /// Like [`fetch`](Self::fetch) for an already resolved target.
    pub fn fetch_target(&self, target: &Target, force: bool) -> Result<Fetched, FetchError> {
        let expected = match &target.checksum {
            ChecksumSource::Fixed { algorithm, digest } => Some(Expected {
                algorithm: *algorithm,
                digest: digest.clone(),
            }),
            ChecksumSource::Manifest(m) => match self.manifest_entry(m, &target.filename)? {
                Ok(e) => e,
                Err(stop) => return Ok(stop),
            },
        };

        let path = &target.local_path;
        let mut force = force;
        let mut refetches = 0u32;
        loop {
            let downloaded = force || !path.is_file();
            if downloaded {
                match self.download(&target.url, path)? {
                    Fetched::Ready(_) => {}
                    other => return Ok(other),
                }
            }

            match verify(path, expected.as_ref())? {
                Verdict::Valid => {
                    if downloaded {
                        tracing::info!(kind = %target.kind, "downloaded DR{} {} to {}", target.release, target.filename, path.display());
                    } else {
                        tracing::info!("{} was found", path.display());
                    }
                    return Ok(Fetched::Ready(path.clone()));
                }
                Verdict::Mismatch { expected, actual } => {
                    if refetches >= self.policy.max_refetches {
                        tracing::warn!(
                            %expected,
                            %actual,
                            "{} is still corrupt after {} re-download(s), giving up",
                            path.display(),
                            refetches
                        );
                        return Ok(Fetched::Corrupt {
                            path: path.clone(),
                            expected,
                            actual,
                        });
                    }
                    tracing::warn!(
                        %expected,
                        %actual,
                        "file corruption detected in {}, downloading again",
                        path.display()
                    );
                    // A failed re-download must not leave the corrupt copy cached.
                    fs::remove_file(path).map_err(|e| FetchError::io(path, e))?;
                    refetches += 1;
                    force = true;
                }
            }
        }
    }

    /// Expected digest of `filename` from the directory manifest, fetching the
    /// manifest first if it is not cached. `Err(outcome)` stops the fetch softly.
    fn manifest_entry(
        &self,
        m: &ManifestRef,
        filename: &str,
    ) -> Result<Result<Option<Expected>, Fetched>, FetchError> {
        if !m.local_path.is_file() {
            if let Err(e) = self
                .transport
                .probe(&m.directory_url, self.credentials.cached().as_ref())
            {
                if classify(&e) == Failure::NotFound {
                    tracing::warn!("{} cannot be found on server, skipped", m.directory_url);
                    return Ok(Err(Fetched::NotFound {
                        url: m.directory_url.clone(),
                    }));
                }
                tracing::debug!(error = %e, "directory probe inconclusive, fetching manifest anyway");
            }
            match self.download(&m.url, &m.local_path)? {
                Fetched::Ready(_) => {}
                Fetched::NotFound { .. } => {
                    tracing::warn!("no checksum manifest at {}, verification skipped", m.url);
                    return Ok(Ok(None));
                }
                other => return Ok(Err(other)),
            }
        }

        let manifest = ChecksumManifest::load(&m.local_path, m.algorithm)?;
        if manifest.is_empty() {
            // Not a checksum listing (e.g. an HTML error page); fetch it afresh next time.
            tracing::warn!(
                "{} has no checksum rows, verification of {} skipped",
                m.local_path.display(),
                filename
            );
            fs::remove_file(&m.local_path).map_err(|e| FetchError::io(&m.local_path, e))?;
            return Ok(Ok(None));
        }
        match manifest.lookup(filename) {
            Some(digest) => Ok(Ok(Some(Expected {
                algorithm: m.algorithm,
                digest: digest.to_string(),
            }))),
            None => {
                tracing::debug!(manifest = %m.filename, "{} not listed, verification skipped", filename);
                Ok(Ok(None))
            }
        }
    }
}

fn verify(path: &Path, expected: Option<&Expected>) -> Result<Verdict, FetchError> {
    let Some(expected) = expected else {
        return Ok(Verdict::Valid);
    };
    let actual = file_digest(path, expected.algorithm).map_err(|e| FetchError::Unreadable {
        path: path.to_path_buf(),
        message: format!("{:#}", e),
    })?;
    if digests_match(&actual, &expected.digest) {
        Ok(Verdict::Valid)
    } else {
        Ok(Verdict::Mismatch {
            expected: expected.digest.to_ascii_lowercase(),
            actual,
        })
    }
}
