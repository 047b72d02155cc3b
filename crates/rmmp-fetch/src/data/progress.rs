use super::mirror::MirrorRecord;

/// Byte progress of a single streamed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferProgress {
    pub bytes_downloaded: u64,
    /// Taken from `Content-Length` when the server sends one.
    pub total_bytes: Option<u64>,
}

/// Steps of the fallback chain, in the order they can occur.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackEvent {
    DirectAttempt {
        url: String,
    },
    DirectFailed {
        url: String,
        error: String,
    },
    /// The mirror list could not be obtained, so the chain ends after the direct attempt.
    CatalogUnavailable {
        error: String,
    },
    MirrorAttempt {
        /// 1-based attempt number among mirrors.
        attempt: usize,
        ceiling: usize,
        mirror: MirrorRecord,
        url: String,
    },
    MirrorFailed {
        mirror: MirrorRecord,
        error: String,
    },
    Succeeded {
        url: String,
        /// `None` when the origin answered directly.
        mirror: Option<MirrorRecord>,
    },
}

