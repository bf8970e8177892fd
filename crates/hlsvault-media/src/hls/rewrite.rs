//! Segment reference rewriting for stored playlists.

use hlsvault_common::paths::{SEGMENT_EXTENSION, SEGMENT_PREFIX};
use hlsvault_common::AssetKind;

/// Build the URL prefix that rewritten segment references hang off.
///
/// The result is `<api_prefix>/<kind route>/<asset>/segment/`, e.g.
/// `/api/live/cam1/segment/`. A trailing `/` on `api_prefix` is ignored.
pub fn segment_base_url(api_prefix: &str, kind: AssetKind, asset: &str) -> String {
    format!(
        "{}/{}/{}/segment/",
        api_prefix.trim_end_matches('/'),
        kind.route(),
        asset
    )
}

/// Whether a trimmed playlist line is a bare segment reference.
///
/// Matching is textual: the encoder names every segment `segmentNNN.ts`, so a
/// line that starts with `segment` and ends with `.ts` is a reference.
/// Directives, comments, and already-rewritten URLs never match. The line is
/// compared as raw bytes, so it need not be valid UTF-8.
pub fn is_segment_reference(trimmed: &[u8]) -> bool {
    trimmed.starts_with(SEGMENT_PREFIX.as_bytes())
        && trimmed
            .strip_suffix(SEGMENT_EXTENSION.as_bytes())
            .is_some_and(|rest| rest.ends_with(b"."))
}

/// Rewrite bare segment references in `content` into API URLs.
///
/// Lines are split on `\n`. A line whose ASCII-trimmed form is a segment
/// reference is replaced entirely by `base_segment_url + trimmed`; its
/// surrounding whitespace is dropped. Every other line is kept byte for byte,
/// including any `\r` left over from CRLF input and any bytes that are not
/// valid UTF-8. The output is joined with `\n`.
///
/// This never fails: lines it does not understand pass through unchanged.
pub fn rewrite_playlist(content: &[u8], base_segment_url: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + 64);

    for (i, line) in content.split(|&b| b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }

        let trimmed = line.trim_ascii();
        if is_segment_reference(trimmed) {
            out.extend_from_slice(base_segment_url.as_bytes());
            out.extend_from_slice(trimmed);
        } else {
            out.extend_from_slice(line);
        }
    }

    out
}
