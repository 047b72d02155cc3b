//! Host detection.

/// Whether this binary was built for Android.
///
/// Root managers only exist there, so every device-specific path and probe
/// keys off this.
pub const fn is_android() -> bool {
    cfg!(target_os = "android")
}
