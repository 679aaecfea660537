//! Tests for kinds, checksum, completions and man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;
use sasdl_core::checksum::HashAlgorithm;

#[test]
fn cli_parse_kinds() {
    match parse(&["sasdl", "kinds"]) {
        CliCommand::Kinds => {}
        _ => panic!("expected Kinds"),
    }
}

#[test]
fn cli_parse_checksum_defaults_to_sha1() {
    match parse(&["sasdl", "checksum", "/tmp/allStar-dr17-synspec_rev1.fits"]) {
        CliCommand::Checksum { path, algorithm } => {
            assert_eq!(
                path,
                std::path::PathBuf::from("/tmp/allStar-dr17-synspec_rev1.fits")
            );
            assert_eq!(algorithm, HashAlgorithm::Sha1);
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_checksum_sha256() {
    match parse(&["sasdl", "checksum", "x.fits", "--algorithm", "sha256"]) {
        CliCommand::Checksum { algorithm, .. } => assert_eq!(algorithm, HashAlgorithm::Sha256),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_rejects_unknown_algorithm() {
    assert!(Cli::try_parse_from(["sasdl", "checksum", "x.fits", "--algorithm", "md5"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["sasdl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    match parse(&["sasdl", "man"]) {
        CliCommand::Man => {}
        _ => panic!("expected Man"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
