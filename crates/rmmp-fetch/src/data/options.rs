use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::progress::FallbackEvent;

/// Observer invoked on every step of the fallback chain.
pub type EventCallback = Arc<dyn Fn(&FallbackEvent) + Send + Sync>;

/// Configuration of the fallback chain.
///
/// # Examples
///
/// ```
/// use rmmp_fetch::FallbackOptions;
/// use std::time::Duration;
///
/// let options = FallbackOptions::default()
///     .manifest_timeout(Duration::from_secs(5))
///     .max_mirror_attempts(3);
/// assert_eq!(options.max_mirror_attempts, 3);
/// ```
#[derive(Clone)]
pub struct FallbackOptions {
    /// Deadline of each attempt when fetching a release manifest.
    ///
    /// Default: 3s
    pub manifest_timeout: Duration,

    /// Deadline of each attempt when downloading a module archive.
    ///
    /// Default: 30s
    pub payload_timeout: Duration,

    /// How many mirrors are tried after the direct attempt fails.
    ///
    /// Total attempts = 1 (direct) + max_mirror_attempts.
    ///
    /// Default: 10
    pub max_mirror_attempts: usize,

    /// Step observer, used by front ends to print progress.
    ///
    /// Default: None
    pub on_event: Option<EventCallback>,
}

impl fmt::Debug for FallbackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackOptions")
            .field("manifest_timeout", &self.manifest_timeout)
            .field("payload_timeout", &self.payload_timeout)
            .field("max_mirror_attempts", &self.max_mirror_attempts)
            .field("on_event", &self.on_event.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            manifest_timeout: Duration::from_secs(3),
            payload_timeout: Duration::from_secs(30),
            max_mirror_attempts: 10,
            on_event: None,
        }
    }
}

impl FallbackOptions {
    #[must_use]
    pub fn manifest_timeout(mut self, timeout: Duration) -> Self {
        self.manifest_timeout = timeout;
        self
    }

    #[must_use]
    pub fn payload_timeout(mut self, timeout: Duration) -> Self {
        self.payload_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_mirror_attempts(mut self, attempts: usize) -> Self {
        self.max_mirror_attempts = attempts;
        self
    }

    #[must_use]
    pub fn on_event(mut self, on_event: EventCallback) -> Self {
        self.on_event = Some(on_event);
        self
    }

    pub(crate) fn emit(&self, event: FallbackEvent) {
        if let Some(ref callback) = self.on_event {
            callback(&event);
        }
    }
}
