//! Serve command: line-delimited JSON bridge on stdin/stdout.

use std::io;

use anyhow::Result;
use scorebook_core::{Bridge, Config};
use tracing::info;

pub fn run(config: &Config) -> Result<()> {
    let bridge = Bridge::open(config)?;
    info!("Serving requests from {:?}", config.store.data_dir);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let state = bridge.serve(stdin.lock(), stdout.lock())?;

    info!(
        arcaea = state.arcaea.as_ref().map_or(0, Vec::len),
        chunithm = state.chunithm.as_ref().map_or(0, Vec::len),
        "Input closed"
    );
    Ok(())
}
