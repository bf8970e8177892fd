//! # hlsvault-media
//!
//! HLS playlist handling for hlsvault.
//!
//! Stored playlists reference their segments by bare file name, exactly as the
//! encoder wrote them. Before a playlist is served those references are
//! rewritten into API URLs so that clients fetch segments through the server:
//!
//! ```
//! use hlsvault_common::AssetKind;
//! use hlsvault_media::hls::{rewrite_playlist, segment_base_url};
//!
//! let base = segment_base_url("/api", AssetKind::Vod, "intro");
//! let out = rewrite_playlist(b"#EXTM3U\nsegment000.ts", &base);
//! assert_eq!(out, b"#EXTM3U\n/api/assets/intro/segment/segment000.ts");
//! ```

pub mod hls;
