use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use rmmp_fetch::{ReleaseManifest, RepoSlug, TransferProgress};
use rmmp_root::RootRuntime;
use tracing::debug;

use crate::env::RmmpEnv;
use crate::ui::{
    self,
    prompt::confirm,
    report,
    tracker::{ProgressTracker, ProgressTrackerConfig, Tracker},
};

#[derive(Args, Clone, Debug)]
pub struct GetArg {
    /// Repository in owner/repo form
    pub repo: RepoSlug,
    /// Install without asking
    #[arg(short, long)]
    pub yes: bool,
    /// Only download the archive
    #[arg(long, conflicts_with = "yes")]
    pub no_install: bool,
}

pub async fn run(arg: GetArg, env: &RmmpEnv) -> Result<()> {
    ui::info(format!("target repository: {}", style(&arg.repo).bold()));

    let tracker = ProgressTracker::new(ProgressTrackerConfig { len: None });
    let fetcher = env.fetcher(env.client()?, report::printer(tracker.pb.clone()));

    let manifest = fetcher
        .fetch_manifest(&arg.repo.manifest_url())
        .await
        .with_context(|| format!("Failed to fetch release manifest of {}", arg.repo))?;
    ui::success(format!(
        "found {} (version code {})",
        manifest.version, manifest.version_code
    ));

    let dest = env.downloads_dir().join(manifest.archive_file_name());
    ui::info(format!("saving to {}", dest.display()));
    debug!(payload = %manifest.payload_url, "downloading module archive");

    tracker.show();
    let on_progress = |progress: &TransferProgress| tracker.update(progress);
    let downloaded = fetcher
        .fetch_payload(&manifest.payload_url, &dest, Some(&on_progress))
        .await;
    tracker.finish();
    downloaded.with_context(|| format!("Failed to download {}", manifest.payload_url))?;

    print_summary(&manifest, &dest);

    if arg.no_install {
        print_manual_hint(&dest);
        return Ok(());
    }

    let Some(runtime) = RootRuntime::detect() else {
        ui::warn("no supported root manager found (KernelSU, APatch, Magisk)");
        print_manual_hint(&dest);
        return Ok(());
    };

    if !arg.yes && !confirm(&format!("Install with {}?", runtime.kind()))? {
        ui::warn("installation cancelled, archive kept");
        print_manual_hint(&dest);
        return Ok(());
    }

    ui::info(format!("installing with {}", runtime.kind()));
    runtime
        .install(&dest)
        .with_context(|| format!("Failed to install {}", dest.display()))?;
    ui::success("module installed");
    Ok(())
}

fn print_summary(manifest: &ReleaseManifest, dest: &Path) {
    let rule = style("━".repeat(60)).dim();
    println!("\n{rule}");
    ui::success("module downloaded");
    println!("  version:      {}", manifest.version);
    println!("  version code: {}", manifest.version_code);
    println!("  file:         {}", dest.display());
    if let Some(changelog) = &manifest.changelog {
        println!("  changelog:    {changelog}");
    }
    println!("{rule}");
}

fn print_manual_hint(dest: &Path) {
    println!("install it later with:");
    println!("  rmmp module install \"{}\"", dest.display());
}
