//! Client state containers.
//!
//! # Design
//! - Each store owns its collection plus `loading`/`error` flags.
//! - Remote actions set `loading`, call the API, and on success merge the
//!   result; on failure they record the message and keep the prior
//!   collection.
//! - List fetches replace the whole collection.

pub mod nodes;
pub mod servers;
pub mod settings;
pub mod toast;

pub use nodes::NodesStore;
pub use servers::ServersStore;
pub use settings::{SettingField, SettingsState};
pub use toast::{TOAST_LIFETIME, Toast, ToastKind, ToastStore};

use crate::error::ApiResult;

/// Loading and error flags shared by the collection stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    /// A remote call is in flight.
    pub loading: bool,
    /// Message from the last failed call.
    pub error: Option<String>,
}

impl RequestState {
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn finish<T>(&mut self, store: &'static str, result: &ApiResult<T>) {
        self.loading = false;
        if let Err(err) = result {
            let message = err.user_message();
            tracing::warn!(store, error = %message, "store action failed");
            self.error = Some(message);
        }
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
