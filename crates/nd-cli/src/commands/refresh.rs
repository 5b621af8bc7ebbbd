//! Refresh command: fetch the remote log and rewrite the snapshot cache.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use nd_source::{Snapshot, SnapshotCache};

use crate::commands::util;
use crate::config::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let zone = config.reference_zone()?;
    let entries = util::fetch_remote(config, zone)?;

    let cache = SnapshotCache::new(&config.cache_path, config.cache_ttl());
    let snapshot = Snapshot {
        fetched_at: Utc::now(),
        entries,
    };
    cache
        .store(&snapshot)
        .context("failed to write snapshot cache")?;

    writeln!(
        writer,
        "Fetched {} entries to {}",
        snapshot.entries.len(),
        cache.path().display()
    )?;

    Ok(())
}
