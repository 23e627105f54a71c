#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(missing_docs, unreachable_pub, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Client core for the Fleetdeck console.
//!
//! Layout:
//! - `bridge.rs`: host bridge trait and the reqwest-backed implementation
//! - `facade.rs`: typed `get/post/put/delete` over a bridge
//! - `error.rs`: `ApiError` and user-facing messages
//! - `api/`: one client per backend resource
//! - `store/`: collection stores, settings state, and toasts
//! - `explorer/`: remote file-explorer state machine and controller
//! - `dashboard.rs`: stat cards derived from the stores
//! - `format.rs`: size and time formatting helpers
//! - `context.rs`: `AppContext` wiring everything together

pub mod api;
pub mod bridge;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod explorer;
pub mod facade;
pub mod format;
pub mod store;

pub use bridge::{
    Bridge, BridgeError, BridgeOptions, BridgeResult, DEFAULT_TIMEOUT, HttpBridge, UploadPart,
};
pub use context::AppContext;
pub use error::{ApiError, ApiResult};
pub use explorer::FileExplorer;
pub use facade::Facade;
