use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;
use rmmp_fetch::TransferProgress;

pub trait Tracker {
    type Ctx: Clone;
    fn new(ctx: Self::Ctx) -> Self;
    fn finish(&self);
}

const PB_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<ProgressStyle> = Lazy::new(|| match ProgressStyle::with_template(PB_STYLE) {
    Ok(style) => style.tick_chars(TICK).progress_chars(PB_CHARS),
    Err(_) => ProgressStyle::default_bar(),
});

/// Download progress bar.
///
/// Starts hidden; [`ProgressTracker::show`] draws it once the payload
/// transfer begins.
pub struct ProgressTracker {
    pub pb: ProgressBar,
}

#[derive(Debug, Clone)]
pub struct ProgressTrackerConfig {
    pub len: Option<u64>,
}

impl Tracker for ProgressTracker {
    type Ctx = ProgressTrackerConfig;

    fn new(ctx: Self::Ctx) -> Self {
        let pb = ProgressBar::with_draw_target(ctx.len, ProgressDrawTarget::hidden());
        pb.set_style(PB_TEMPLATE.clone());
        ProgressTracker { pb }
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressTracker {
    /// Start drawing on stderr.
    pub fn show(&self) {
        self.pb.set_draw_target(ProgressDrawTarget::stderr());
    }

    /// Feed a progress sample from the current attempt.
    pub fn update(&self, progress: &TransferProgress) {
        if let Some(total) = progress.total_bytes {
            self.pb.set_length(total);
        }
        self.pb.set_position(progress.bytes_downloaded);
    }
}
