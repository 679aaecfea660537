//! `sasdl checksum` – digest of a local file, in manifest format.

use anyhow::Result;
use sasdl_core::checksum::{self, HashAlgorithm};
use std::path::Path;

pub fn run_checksum(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let digest = checksum::file_digest(path, algorithm)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
