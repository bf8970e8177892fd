//! hlsvault - HLS video-on-demand and live playlist server
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod ingest;
pub mod library;
pub mod server;
pub mod streaming;
