//! `sasdl resolve` – where a file lives locally and remotely, without any I/O.

use anyhow::Result;
use sasdl_core::catalog::{self, ChecksumSource};
use sasdl_core::config::SasdlConfig;

use crate::cli::TargetArgs;

pub fn run_resolve(cfg: &SasdlConfig, args: &TargetArgs, json: bool) -> Result<()> {
    let descriptor = args.descriptor(cfg);
    let target = catalog::resolve(&descriptor, &cfg.resolve_data_root()?, &cfg.base_url)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&target)?);
        return Ok(());
    }

    println!("kind:      {} (DR{})", target.kind, target.release);
    println!("local:     {}", target.local_path.display());
    println!("url:       {}", target.url);
    match &target.checksum {
        ChecksumSource::Fixed { algorithm, digest } => {
            println!("checksum:  {} {}", algorithm, digest);
        }
        ChecksumSource::Manifest(m) => {
            println!("checksum:  {} from {}", m.algorithm, m.url);
        }
    }
    Ok(())
}
