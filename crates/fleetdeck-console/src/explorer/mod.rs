//! Remote file explorer.
//!
//! `path` and `state` are pure; `controller` adds the agent calls and
//! notifications.

pub mod controller;
pub mod path;
pub mod state;

pub use controller::{Confirm, DeleteOutcome, DeleteReport, DownloadedArchive, FileExplorer};
pub use path::{Breadcrumb, ROOT, basename, breadcrumbs, join, navigate_up, normalize, parent_of};
pub use state::{Clipboard, ClipboardOp, ExplorerState, ListingTicket, PastePlan, Selection};
