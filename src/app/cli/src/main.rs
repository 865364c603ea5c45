// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod app;
mod cli;
mod config;
mod error;

use clap::Parser;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const DEFAULT_LOGGING_CONFIG: &str = "info";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() {
    configure_logging();

    let args = cli::Cli::parse();

    if let Err(e) = app::run(args).await {
        tracing::error!(error = ?e, "Run failed");
        eprintln!("Error: {e}");

        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  Caused by: {cause}");
            source = cause.source();
        }

        std::process::exit(e.exit_code());
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging() {
    use tracing_subscriber::EnvFilter;

    // Use configuration from RUST_LOG env var if provided
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOGGING_CONFIG));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
