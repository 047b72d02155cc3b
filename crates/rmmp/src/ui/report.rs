use std::sync::Arc;

use console::style;
use indicatif::ProgressBar;
use rmmp_fetch::{CatalogOrigin, EventCallback, FallbackEvent};

/// Print fallback steps above the progress bar, restarting it on each attempt.
pub fn printer(pb: ProgressBar) -> EventCallback {
    Arc::new(move |event| {
        let line = render(event);
        pb.suspend(|| println!("{line}"));
        if matches!(
            event,
            FallbackEvent::DirectAttempt { .. } | FallbackEvent::MirrorAttempt { .. }
        ) {
            pb.reset();
        }
    })
}

pub fn render(event: &FallbackEvent) -> String {
    match event {
        FallbackEvent::DirectAttempt { url } => {
            format!("{} trying {}", style("→").cyan(), style(url).dim())
        }
        FallbackEvent::DirectFailed { error, .. } => {
            format!("{} direct download failed: {error}", style("!").yellow())
        }
        FallbackEvent::CatalogUnavailable { error } => {
            format!("{} mirror list unavailable: {error}", style("✗").red())
        }
        FallbackEvent::MirrorAttempt {
            attempt,
            ceiling,
            mirror,
            ..
        } => format!(
            "{} mirror [{attempt}/{ceiling}] {} ({:.2} MB/s, {} ms)",
            style("→").cyan(),
            mirror.url,
            mirror.speed_mbs,
            mirror.latency_ms
        ),
        FallbackEvent::MirrorFailed { mirror, error } => {
            format!("{} {} failed: {error}", style("✗").red(), mirror.url)
        }
        FallbackEvent::Succeeded { mirror: None, .. } => {
            format!("{} fetched directly", style("✓").green())
        }
        FallbackEvent::Succeeded {
            mirror: Some(mirror),
            ..
        } => format!("{} fetched via {}", style("✓").green(), mirror.url),
    }
}

/// One-line description of where catalog records came from.
pub fn describe_origin(origin: &CatalogOrigin) -> String {
    match origin {
        CatalogOrigin::Cache { age } => {
            let hours = age.num_minutes() as f64 / 60.0;
            format!("using cached mirror list ({hours:.1}h old)")
        }
        CatalogOrigin::Directory {
            server_updated_at,
            total,
            ..
        } => format!("fetched {total} mirrors from directory (server updated {server_updated_at})"),
    }
}
