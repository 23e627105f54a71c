#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(missing_docs, unreachable_pub, clippy::all, clippy::pedantic, clippy::nursery)]

//! Logging setup shared by the Fleetdeck crates.
//!
//! Layout: `init.rs` (subscriber installation and format selection),
//! `session.rs` (process-wide span carrying the session id and build).

pub mod init;
pub mod session;

pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging, log_format_from_str,
};
pub use session::SessionGuard;
