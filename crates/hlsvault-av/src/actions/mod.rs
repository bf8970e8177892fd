//! Media processing actions.
//!
//! - HLS transcoding of an uploaded source file

mod hls;

pub use hls::{encode_hls, hls_args, HlsEncodeOptions, HlsOutput};
