//! Path utilities: the on-disk naming convention and name sanitizing.
//!
//! Every identifier that arrives from a request (asset name, stream name,
//! segment name) passes through [`safe_component`] before it is joined onto a
//! root directory, so the joined path can never leave that root. Free-text
//! names supplied with uploads additionally go through [`sanitize_name`].

use regex::Regex;
use std::sync::LazyLock;

/// File name of the index playlist inside every asset directory.
pub const INDEX_PLAYLIST: &str = "index.m3u8";

/// Prefix shared by all segment files written by the encoder.
pub const SEGMENT_PREFIX: &str = "segment";

/// Extension of media segment files (MPEG-TS).
pub const SEGMENT_EXTENSION: &str = "ts";

/// printf-style pattern handed to the encoder for segment file names.
pub const SEGMENT_FILENAME_PATTERN: &str = "segment%03d.ts";

static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("static regex is valid"));

/// Reduce `raw` to its final path component.
///
/// Both `/` and `\` count as separators and trailing separators are ignored.
/// Components that would still navigate (`.`, `..`) or that contain NUL come
/// back as an empty string, which callers treat as "no usable name".
///
/// # Examples
///
/// ```
/// use hlsvault_common::paths::safe_component;
///
/// assert_eq!(safe_component("movie"), "movie");
/// assert_eq!(safe_component("../../etc/passwd"), "passwd");
/// assert_eq!(safe_component("a\\b\\c"), "c");
/// assert_eq!(safe_component(".."), "");
/// ```
pub fn safe_component(raw: &str) -> String {
    let last = raw
        .rsplit(|c| c == '/' || c == '\\')
        .find(|part| !part.is_empty())
        .unwrap_or("");

    if last == "." || last == ".." || last.contains('\0') {
        return String::new();
    }

    last.to_string()
}

/// Sanitize a free-text name supplied with an upload.
///
/// Applies [`safe_component`], then collapses every run of characters outside
/// `[A-Za-z0-9_-]` into a single `-` and trims `-` from both ends. The result
/// may be empty.
///
/// # Examples
///
/// ```
/// use hlsvault_common::paths::sanitize_name;
///
/// assert_eq!(sanitize_name("My Holiday Video!"), "My-Holiday-Video");
/// assert_eq!(sanitize_name("  clip_01  "), "clip_01");
/// assert_eq!(sanitize_name("***"), "");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let component = safe_component(raw.trim());
    DISALLOWED_RUN
        .replace_all(&component, "-")
        .trim_matches('-')
        .to_string()
}

/// Append the segment extension when `name` lacks it.
///
/// # Examples
///
/// ```
/// use hlsvault_common::paths::with_segment_extension;
///
/// assert_eq!(with_segment_extension("segment001"), "segment001.ts");
/// assert_eq!(with_segment_extension("segment001.ts"), "segment001.ts");
/// ```
pub fn with_segment_extension(name: &str) -> String {
    let suffix = format!(".{SEGMENT_EXTENSION}");
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}
