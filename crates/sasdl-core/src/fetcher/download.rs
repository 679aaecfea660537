//! Authenticated download of one URL into the cache.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Fetched, Fetcher};
use crate::credentials::CredentialProvider;
use crate::error::FetchError;
use crate::transport::{classify, Failure, TransferError, Transport};

/// Suffix of the temp file a download is written to before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// `file.fits` → `file.fits.part`.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

fn discard(part: &Path) {
    if let Err(e) = fs::remove_file(part) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!("could not remove {}: {}", part.display(), e);
        }
    }
}

impl<T: Transport, C: CredentialProvider> Fetcher<T, C> {
    /// Downloads `url` to `dest`, going through the credentials provider on 401.
    ///
    /// The body lands in `dest.part` and is renamed into place only on success.
    /// 404 and transport failures are soft outcomes; a 401 with credentials
    /// clears them and fails with [`FetchError::Authentication`].
    pub fn download(&self, url: &str, dest: &Path) -> Result<Fetched, FetchError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
        }
        let part = temp_path(dest);
        let mut auth = self.credentials.cached();

        loop {
            let err = match self
                .transport
                .download(url, auth.as_ref(), &part, self.progress.as_ref())
            {
                Ok(bytes) => {
                    fs::rename(&part, dest).map_err(|e| FetchError::io(dest, e))?;
                    tracing::debug!(bytes, "fetched {}", url);
                    return Ok(Fetched::Ready(dest.to_path_buf()));
                }
                Err(e) => e,
            };
            discard(&part);

            let err = match err {
                TransferError::Storage(source) => return Err(FetchError::io(&part, source)),
                other => other,
            };
            match classify(&err) {
                Failure::Unauthorized if auth.is_some() => {
                    self.credentials.invalidate();
                    return Err(FetchError::Authentication {
                        url: url.to_string(),
                    });
                }
                Failure::Unauthorized => match self.credentials.obtain(url).map_err(FetchError::Prompt)? {
                    Some(c) => auth = Some(c),
                    None => {
                        tracing::warn!("{} requires credentials, skipped", url);
                        return Ok(Fetched::AuthRequired {
                            url: url.to_string(),
                        });
                    }
                },
                Failure::NotFound => {
                    tracing::warn!("{} cannot be found on server, skipped", url);
                    return Ok(Fetched::NotFound {
                        url: url.to_string(),
                    });
                }
                Failure::Storage | Failure::Other => {
                    tracing::warn!("unknown error occurred fetching {}: {}", url, err);
                    return Ok(Fetched::Transport {
                        url: url.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}
