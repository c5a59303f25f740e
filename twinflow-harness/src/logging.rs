// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TWINFLOW_LOG=debug`.
pub const LOG_ENV: &str = "TWINFLOW_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a `tracing` subscriber writing to standard error.
///
/// Standard output carries the aggregation result, so logs never go there.
/// Returns `false` if a global subscriber was already installed.
///
/// The process panic hook is left alone: when an aggregator panics, the
/// default hook still prints its `thread 'main' panicked at ...` message to
/// standard error before the entry point catches the panic and records it as
/// `AggregatorPanic`. Standard output is unaffected.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
