//! HLS playlist rewriting.
//!
//! This module turns stored M3U8 playlists into playlists whose segment
//! references are routed through the API.

mod rewrite;

pub use rewrite::{is_segment_reference, rewrite_playlist, segment_base_url};
