// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segwerk: line-aligned document segmentation and ordered re-merge.
//
// Entry point. Initialises logging, parses the command line, and maps fatal
// errors to a plain-English message and a nonzero exit status.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use segwerk_core::human_errors::humanize_error;

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Segwerk starting");

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("       {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}
