// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use clap::Parser;
use twinflow_harness::{init_logging, Cli, Harness};

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Cli::parse().into_config()?;

    let report = Harness::open(&config)
        .and_then(Harness::run)
        .with_context(|| format!("running {}", config.aggregator.kind()))?;

    // Aggregation failures were logged by the entry point; partial output stands.
    if let Some(error) = report.outcome.error() {
        tracing::debug!("exiting normally after failure: {error}");
    }
    Ok(())
}
