//! The `cache` subcommand: look at or wipe the disk tier.

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use newsfeed_cache::{CacheStore, DiskCacheStore};

use crate::output::{format_age, print_cache_status, CacheStatusRow, OutputFormat};

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// List entries in the disk cache with their age
    List,
    /// Delete every entry in the disk cache
    Clear,
}

pub fn run(args: &CacheArgs, disk: &DiskCacheStore, format: &OutputFormat) -> Result<()> {
    match args.action {
        CacheAction::List => {
            let now = Utc::now();
            let rows: Vec<CacheStatusRow> = disk
                .list()
                .into_iter()
                .map(|info| {
                    let age = (now - info.timestamp).to_std().unwrap_or_default();
                    CacheStatusRow {
                        key: info.key,
                        file: info
                            .path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                        age: format_age(age),
                        usable: age < disk.ttl(),
                    }
                })
                .collect();
            eprintln!("{} entries in {}", rows.len(), disk.dir().display());
            print_cache_status(rows, format)?;
        }
        CacheAction::Clear => {
            let before = disk.file_count();
            disk.remove_all();
            println!(
                "Removed {} cached entries from {}",
                before.saturating_sub(disk.file_count()),
                disk.dir().display()
            );
        }
    }
    Ok(())
}
