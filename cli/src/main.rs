// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vecsign-keycheck
//!
//! Decodes a signing key and a verifying key from their text form and
//! reports whether they belong together.
//!
//! Exit status: `0` when the pair checks out, `1` when either key fails to
//! decode, `3` when both decode but the pair does not verify.

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use vecsign::{check_keypair, SigningKey, VerifyingKey};

use cli::KeycheckCli;

/// Outcome of a check that got as far as the crypto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Valid,
    Mismatch,
}

fn main() -> ExitCode {
    let cli = KeycheckCli::parse();
    if let Err(err) = logging::init_logging(cli.log_format) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(&cli) {
        Ok(Verdict::Valid) => ExitCode::SUCCESS,
        Ok(Verdict::Mismatch) => {
            eprintln!("valid keypair failed to validate");
            ExitCode::from(3)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &KeycheckCli) -> Result<Verdict> {
    let (signing_key, verifying_key) = parse_keys(&cli.signing_key, &cli.verifying_key)?;
    tracing::info!(verifying_key = %verifying_key, "checking keypair");

    if check_keypair(&signing_key, &verifying_key) {
        println!("verifying key: {verifying_key}");
        println!("keypair OK");
        Ok(Verdict::Valid)
    } else {
        tracing::warn!(verifying_key = %verifying_key, "keypair check failed");
        Ok(Verdict::Mismatch)
    }
}

fn parse_keys(signing: &str, verifying: &str) -> Result<(SigningKey, VerifyingKey)> {
    let signing_key: SigningKey = signing
        .parse()
        .context("could not unformat signing key")?;
    let verifying_key: VerifyingKey = verifying
        .parse()
        .context("could not unformat verifying key")?;
    Ok((signing_key, verifying_key))
}
