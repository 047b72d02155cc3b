/// Mirror prefixes that may already be baked into URLs published in manifests.
pub const KNOWN_MIRROR_PREFIXES: &[&str] = &[
    "https://ghproxy.cc/",
    "https://ghproxy.cn/",
    "https://gh.b52m.cn/",
    "https://github.moeyy.xyz/",
    "https://mirror.ghproxy.com/",
];

/// Strip a known mirror prefix, recovering the origin URL.
///
/// Only a literal match of a whole prefix is removed; anything else is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use rmmp_fetch::canonicalize;
///
/// assert_eq!(
///     canonicalize("https://mirror.ghproxy.com/https://github.com/a/b/releases/x.zip"),
///     "https://github.com/a/b/releases/x.zip"
/// );
/// assert_eq!(canonicalize("https://example.com/x.zip"), "https://example.com/x.zip");
/// ```
pub fn canonicalize(url: &str) -> &str {
    KNOWN_MIRROR_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .unwrap_or(url)
}

/// Route `canonical` through the mirror at `base`.
///
/// A single trailing slash on `base` is dropped before joining.
pub fn mirror_url(base: &str, canonical: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}/{canonical}")
}
