//! Core type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which storage root an asset lives in.
///
/// The two kinds share the same on-disk shape; they differ in the route they
/// are served under and in how long clients may cache their segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Pre-transcoded video-on-demand asset.
    Vod,
    /// Externally populated live stream.
    Live,
}

impl AssetKind {
    /// Route segment the kind is served under (`/api/<route>/...`).
    pub fn route(&self) -> &'static str {
        match self {
            Self::Vod => "assets",
            Self::Live => "live",
        }
    }

    /// Key holding the names in a listing response.
    pub fn listing_key(&self) -> &'static str {
        self.route()
    }

    /// Segment `max-age` used when no configuration overrides it.
    pub fn default_segment_max_age_secs(&self) -> u64 {
        match self {
            Self::Vod => 3600,
            // Live segments get rotated by the producer.
            Self::Live => 15,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vod => write!(f, "vod"),
            Self::Live => write!(f, "live"),
        }
    }
}
