#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Local settings persistence for the Fleetdeck console.
//!
//! Layout: `model.rs` (the persisted settings document), `validate.rs`
//! (field validation), `store.rs` (`SettingsStore` and its file/in-memory
//! implementations).

pub mod error;
pub mod model;
pub mod store;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{AppSettings, DEFAULT_API_URL, DEFAULT_REFRESH_INTERVAL_SECS};
pub use store::{
    CONFIG_DIR_ENV, FileSettingsStore, MemorySettingsStore, SETTINGS_FILE_NAME, SettingsStore,
    default_config_dir,
};
pub use validate::{REFRESH_INTERVAL_RANGE, validate_settings};
