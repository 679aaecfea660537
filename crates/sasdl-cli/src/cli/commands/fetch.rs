//! `sasdl fetch` – fetch one file into the local mirror.

use anyhow::{bail, Result};
use sasdl_core::config::SasdlConfig;
use sasdl_core::credentials::{self, CachedCredentials, CredentialSource, NoPrompt, TerminalPrompt};
use sasdl_core::{Fetched, Fetcher};

use super::progress::StderrProgress;
use crate::cli::TargetArgs;

pub fn run_fetch(
    cfg: &SasdlConfig,
    args: &TargetArgs,
    force: bool,
    non_interactive: bool,
) -> Result<()> {
    if non_interactive {
        fetch_with(cfg, args, force, NoPrompt)
    } else {
        fetch_with(cfg, args, force, TerminalPrompt)
    }
}

fn fetch_with<S: CredentialSource>(
    cfg: &SasdlConfig,
    args: &TargetArgs,
    force: bool,
    source: S,
) -> Result<()> {
    let creds = CachedCredentials::with_initial(source, credentials::from_env());
    let fetcher =
        Fetcher::from_config(cfg, creds)?.with_progress(Box::new(StderrProgress::default()));
    let descriptor = args.descriptor(cfg);

    match fetcher.fetch(&descriptor, force)? {
        Fetched::Ready(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Fetched::NotFound { url } => bail!("{} not found on server", url),
        Fetched::AuthRequired { url } => bail!(
            "{} requires credentials (set {} and {}, or run without --non-interactive)",
            url,
            credentials::USERNAME_ENV,
            credentials::PASSWORD_ENV
        ),
        Fetched::Transport { url, message } => bail!("fetching {} failed: {}", url, message),
        Fetched::Corrupt {
            path,
            expected,
            actual,
        } => bail!(
            "{} is corrupt (expected {}, got {})",
            path.display(),
            expected,
            actual
        ),
    }
}
