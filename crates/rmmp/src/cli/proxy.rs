use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use rmmp_fetch::{CatalogLookup, CatalogOrigin, MirrorRecord, best};

use crate::env::{Catalog, RmmpEnv};
use crate::ui::{
    self,
    report::describe_origin,
    table::{FormatConfig, Formatter, MirrorRow},
};

#[derive(Clone, Debug, Subcommand)]
pub enum ProxyCommands {
    /// Show every known mirror and the recommended one
    #[command(alias = "ls", name = "list")]
    List,
    /// Show the recommended mirror
    #[command(name = "best")]
    Best,
    /// Query the mirror directory now, ignoring the cache
    #[command(alias = "up", name = "update")]
    Update,
    /// Delete the cached mirror list
    #[command(alias = "rm", name = "clear")]
    Clear,
    /// Print where the mirror list is cached
    #[command(name = "path")]
    Path,
}

pub async fn run(cmd: ProxyCommands, env: &RmmpEnv) -> Result<()> {
    match cmd {
        ProxyCommands::List => {
            let lookup = catalog(env)?
                .lookup()
                .await
                .context("Failed to load mirror list")?;
            report_lookup(&lookup);
            list(&lookup.records);
        }
        ProxyCommands::Best => {
            let best = catalog(env)?
                .best()
                .await
                .context("Failed to pick a mirror")?;
            print_best(&best);
        }
        ProxyCommands::Update => {
            let lookup = catalog(env)?
                .refresh()
                .await
                .context("Failed to refresh mirror list")?;
            report_lookup(&lookup);
            ui::success(format!("{} mirrors available", lookup.records.len()));
        }
        ProxyCommands::Clear => {
            let cleared = catalog(env)?
                .clear()
                .context("Failed to clear mirror cache")?;
            if cleared {
                ui::success(format!("removed {}", env.cache_file().display()));
            } else {
                ui::info("no mirror cache to clear");
            }
        }
        ProxyCommands::Path => println!("{}", env.cache_file().display()),
    }
    Ok(())
}

fn catalog(env: &RmmpEnv) -> Result<Catalog> {
    Ok(env.catalog(env.client()?))
}

fn report_lookup(lookup: &CatalogLookup) {
    ui::info(describe_origin(&lookup.origin));
    if let CatalogOrigin::Directory {
        persist_error: Some(error),
        ..
    } = &lookup.origin
    {
        ui::warn(format!("mirror list not cached: {error}"));
    }
}

fn list(records: &[MirrorRecord]) {
    let Ok(recommended) = best(records) else {
        ui::warn("no mirrors available");
        return;
    };

    let table = Formatter::render(
        MirrorRow::rows(records),
        FormatConfig {
            header: Some(format!("GitHub mirrors ({})", records.len())),
            ..FormatConfig::default()
        },
    );
    println!("{table}");
    print_best(recommended);
}

fn print_best(mirror: &MirrorRecord) {
    println!(
        "{} recommended: {} ({} ms, {:.2} MB/s)",
        style("★").yellow().bold(),
        style(&mirror.url).bold(),
        mirror.latency_ms,
        mirror.speed_mbs
    );
}
