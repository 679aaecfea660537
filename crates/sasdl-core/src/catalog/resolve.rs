//! Descriptor → local path, URL and checksum source.

use serde::Serialize;
use std::path::{Path, PathBuf};
use url::Url;

use super::layout::{self, ChecksumRule};
use super::template::render;
use super::{CatalogKind, Descriptor};
use crate::checksum::HashAlgorithm;
use crate::error::FetchError;

/// Fully resolved request: where the file lives locally and remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub kind: CatalogKind,
    pub release: u32,
    pub filename: String,
    pub local_path: PathBuf,
    pub url: String,
    /// Remote directory holding the file (with trailing slash).
    pub directory_url: String,
    pub checksum: ChecksumSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ChecksumSource {
    Fixed {
        algorithm: HashAlgorithm,
        digest: String,
    },
    Manifest(ManifestRef),
}

/// Location of the checksum manifest covering a target's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRef {
    pub algorithm: HashAlgorithm,
    pub filename: String,
    pub local_path: PathBuf,
    pub url: String,
    pub directory_url: String,
}

/// Resolves `descriptor` against the layout table.
///
/// Pure: touches neither the filesystem nor the network, so an unsupported
/// release or a bad identifier fails before any I/O happens.
pub fn resolve(
    descriptor: &Descriptor,
    data_root: &Path,
    base_url: &str,
) -> Result<Target, FetchError> {
    let row = layout::find(descriptor.kind, descriptor.release).ok_or_else(|| {
        FetchError::UnsupportedRelease {
            kind: descriptor.kind,
            release: descriptor.release,
            supported: layout::supported_releases(descriptor.kind),
        }
    })?;

    let directory = render(row.directory, descriptor)?;
    let filename = render(row.filename, descriptor)?;

    let directory_url = directory_url(base_url, &directory)?;
    let url = join(&directory_url, &filename, base_url)?;
    let local_dir = local_dir(data_root, &directory);

    let checksum = match row.checksum {
        ChecksumRule::Fixed { algorithm, digest } => ChecksumSource::Fixed {
            algorithm,
            digest: digest.to_string(),
        },
        ChecksumRule::Manifest { algorithm, stem } => {
            let manifest_name = format!(
                "{}.{}",
                render(stem, descriptor)?,
                algorithm.manifest_extension()
            );
            ChecksumSource::Manifest(ManifestRef {
                algorithm,
                url: join(&directory_url, &manifest_name, base_url)?,
                local_path: local_dir.join(&manifest_name),
                directory_url: directory_url.clone(),
                filename: manifest_name,
            })
        }
    };

    Ok(Target {
        kind: descriptor.kind,
        release: descriptor.release,
        local_path: local_dir.join(&filename),
        filename,
        url,
        directory_url,
        checksum,
    })
}

fn directory_url(base_url: &str, directory: &str) -> Result<String, FetchError> {
    let root = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&root).map_err(|e| invalid_base(base_url, e))?;
    let dir = base
        .join(&format!("{directory}/"))
        .map_err(|e| invalid_base(base_url, e))?;
    Ok(dir.to_string())
}

fn join(directory_url: &str, name: &str, base_url: &str) -> Result<String, FetchError> {
    let dir = Url::parse(directory_url).map_err(|e| invalid_base(base_url, e))?;
    let full = dir.join(name).map_err(|e| invalid_base(base_url, e))?;
    Ok(full.to_string())
}

fn invalid_base(url: &str, e: url::ParseError) -> FetchError {
    FetchError::InvalidBaseUrl {
        url: url.to_string(),
        message: e.to_string(),
    }
}

fn local_dir(data_root: &Path, directory: &str) -> PathBuf {
    directory
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(data_root.to_path_buf(), |p, seg| p.join(seg))
}
