//! CLI for sasdl.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use sasdl_core::catalog::{CatalogKind, Descriptor};
use sasdl_core::checksum::HashAlgorithm;
use sasdl_core::config::{self, SasdlConfig};
use std::path::PathBuf;

use commands::{run_checksum, run_completions, run_fetch, run_kinds, run_man, run_resolve};

/// Top-level CLI for sasdl.
#[derive(Debug, Parser)]
#[command(name = "sasdl", version)]
#[command(about = "sasdl: cached, checksum-verified downloads from the SDSS Science Archive Server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch one archive file into the local mirror (no-op if already valid).
    Fetch {
        #[command(flatten)]
        target: TargetArgs,

        /// Download again even if a valid local copy exists.
        #[arg(long)]
        force: bool,

        /// Never prompt for credentials; protected files are skipped.
        #[arg(long)]
        non_interactive: bool,
    },

    /// Print the local path, URL and checksum source without touching the network.
    Resolve {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the resolved target as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List catalog kinds and the data releases each supports.
    Kinds,

    /// Compute the digest of a local file.
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Hash algorithm.
        #[arg(long, default_value = "sha1", value_name = "ALGO")]
        algorithm: HashAlgorithm,
    },

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

/// Which file to fetch or resolve.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Catalog kind (see `sasdl kinds`).
    pub kind: CatalogKind,

    /// Data release number, e.g. 17. Defaults to `default_release` from the config.
    #[arg(long, value_name = "N")]
    pub release: Option<u32>,

    /// Telescope id (apo25m, lco25m, ...).
    #[arg(long)]
    pub telescope: Option<String>,

    /// Field name.
    #[arg(long)]
    pub field: Option<String>,

    /// APOGEE object id, e.g. 2M19205287+3745279.
    #[arg(long, value_name = "ID")]
    pub apogee_id: Option<String>,

    /// Location id.
    #[arg(long, value_name = "N")]
    pub location: Option<u32>,

    /// Commissioning-period spectra.
    #[arg(long)]
    pub commissioning: bool,
}

impl TargetArgs {
    pub fn descriptor(&self, cfg: &SasdlConfig) -> Descriptor {
        let mut d = Descriptor::new(self.kind, cfg.release_or_default(self.release))
            .with_commissioning(self.commissioning);
        if let Some(t) = &self.telescope {
            d = d.with_telescope(t.as_str());
        }
        if let Some(f) = &self.field {
            d = d.with_field(f.as_str());
        }
        if let Some(id) = &self.apogee_id {
            d = d.with_apogee_id(id.as_str());
        }
        if let Some(loc) = self.location {
            d = d.with_location(loc);
        }
        d
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                target,
                force,
                non_interactive,
            } => {
                let cfg = load_config()?;
                run_fetch(&cfg, &target, force, non_interactive)?;
            }
            CliCommand::Resolve { target, json } => {
                let cfg = load_config()?;
                run_resolve(&cfg, &target, json)?;
            }
            CliCommand::Kinds => run_kinds(),
            CliCommand::Checksum { path, algorithm } => run_checksum(&path, algorithm)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

fn load_config() -> Result<SasdlConfig> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
