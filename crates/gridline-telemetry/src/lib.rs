#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Logging primitives shared across the Gridline workspace.
//!
//! Native hosts (demo binaries, integration suites) install a `tracing` subscriber
//! through [`init_logging`] so events emitted by `gridline-core` land somewhere useful.

mod error;
mod init;

pub use error::{Result, TelemetryError};
pub use init::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_ENV, LogFormat, LoggingConfig, build_sha, init_logging,
};
