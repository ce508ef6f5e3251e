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

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (rows/columns), mocks.rs (recording callbacks, fake stores), logging.rs (subscriber).

pub mod fixtures;
pub mod logging;
pub mod mocks;
