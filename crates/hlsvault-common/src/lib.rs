//! hlsvault-common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across hlsvault:
//!
//! - **Error Handling**: The request-facing error taxonomy and result alias
//! - **Core Types**: [`AssetKind`] selecting the VOD or live root
//! - **Path Utilities**: Name sanitizing and the on-disk naming convention
//!
//! # Examples
//!
//! ```
//! use hlsvault_common::{AssetKind, Error, Result};
//! use hlsvault_common::paths::safe_component;
//!
//! // Traversal sequences collapse to the final component
//! assert_eq!(safe_component("../../etc/passwd"), "passwd");
//!
//! // Asset kinds know their route segment
//! assert_eq!(AssetKind::Live.route(), "live");
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("asset"))
//! }
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
