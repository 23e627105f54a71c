//! Pure explorer state machine: path, selection, clipboard, and listing.
//!
//! # Design
//! - Every transition is synchronous and side-effect free; the controller
//!   decides when to call the agent.
//! - Selection is cleared whenever the current path changes.
//! - Listings are tagged with a sequence number and only the latest request
//!   may replace the visible entries.

use fleetdeck_api_models::FileInfo;

use super::path::{self, ROOT};

/// Insertion-ordered set of selected paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<String>,
}

impl Selection {
    /// Add `path` if absent, remove it if present.
    pub fn toggle(&mut self, path: &str) {
        if let Some(index) = self.paths.iter().position(|selected| selected == path) {
            self.paths.remove(index);
        } else {
            self.paths.push(path.to_string());
        }
    }

    /// Replace the selection with `paths`.
    pub fn set_all<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.paths.clear();
        for path in paths {
            if !self.paths.contains(&path) {
                self.paths.push(path);
            }
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Whether `path` is selected.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|selected| selected == path)
    }

    /// Earliest selected path still selected.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    /// Selected paths in selection order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Number of selected paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Pending clipboard operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    /// Paste copies; the clipboard survives.
    Copy,
    /// Paste moves; the clipboard is cleared afterwards.
    Cut,
}

/// Single clipboard entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
    /// Source path.
    pub path: String,
    /// Operation applied on paste.
    pub operation: ClipboardOp,
}

/// Remote call implied by a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastePlan {
    /// Source path from the clipboard.
    pub source: String,
    /// Destination inside the current directory.
    pub dest: String,
    /// Copy or move.
    pub operation: ClipboardOp,
}

/// Token identifying one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTicket {
    seq: u64,
    path: String,
}

impl ListingTicket {
    /// Directory the listing was requested for.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Navigation, selection, clipboard, and last listing for one node.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    node_id: String,
    current_path: String,
    files: Vec<FileInfo>,
    selection: Selection,
    clipboard: Option<Clipboard>,
    listing_seq: u64,
}

impl ExplorerState {
    /// Fresh state at `/` for `node_id`.
    #[must_use]
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            current_path: ROOT.to_string(),
            files: Vec::new(),
            selection: Selection::default(),
            clipboard: None,
            listing_seq: 0,
        }
    }

    /// Node whose filesystem is browsed.
    #[must_use]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Directory being shown.
    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Entries from the latest applied listing.
    #[must_use]
    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    /// Entry in the current listing named `name`.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&FileInfo> {
        self.files.iter().find(|file| file.name == name)
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current clipboard entry.
    #[must_use]
    pub const fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    /// Whether the current path is `/`.
    #[must_use]
    pub fn at_root(&self) -> bool {
        self.current_path == ROOT
    }

    fn set_path(&mut self, path: String) {
        self.current_path = path;
        self.selection.clear();
        self.files.clear();
    }

    /// Enter child directory `name`; returns the new path.
    pub fn navigate_into(&mut self, name: &str) -> &str {
        let next = path::join(&self.current_path, name);
        self.set_path(next);
        &self.current_path
    }

    /// Move to the parent directory; returns `false` at `/`.
    pub fn navigate_up(&mut self) -> bool {
        if self.at_root() {
            return false;
        }
        let next = path::navigate_up(&self.current_path);
        self.set_path(next);
        true
    }

    /// Jump to `path` (a breadcrumb); relative input is anchored at `/`.
    pub fn navigate_to(&mut self, path: &str) {
        self.set_path(path::normalize(path));
    }

    /// Toggle one path in the selection.
    pub fn toggle_selection(&mut self, path: &str) {
        self.selection.toggle(path);
    }

    /// Select every entry of the current listing.
    pub fn select_all(&mut self) {
        let paths = self.files.iter().map(|file| file.path.clone());
        self.selection.set_all(paths);
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Put the first selected path on the clipboard for copying.
    pub fn copy(&mut self) -> Option<&Clipboard> {
        self.stage(ClipboardOp::Copy)
    }

    /// Put the first selected path on the clipboard for moving.
    pub fn cut(&mut self) -> Option<&Clipboard> {
        self.stage(ClipboardOp::Cut)
    }

    fn stage(&mut self, operation: ClipboardOp) -> Option<&Clipboard> {
        let path = self.selection.first()?.to_string();
        self.clipboard = Some(Clipboard { path, operation });
        self.clipboard.as_ref()
    }

    /// Remote call a paste into the current directory would make.
    #[must_use]
    pub fn paste_plan(&self) -> Option<PastePlan> {
        let clipboard = self.clipboard.as_ref()?;
        Some(PastePlan {
            source: clipboard.path.clone(),
            dest: path::join(&self.current_path, path::basename(&clipboard.path)),
            operation: clipboard.operation,
        })
    }

    /// Record a successful paste; a cut clipboard is consumed.
    pub fn complete_paste(&mut self, operation: ClipboardOp) {
        if operation == ClipboardOp::Cut {
            self.clipboard = None;
        }
    }

    /// Start a listing request for the current path.
    pub fn begin_listing(&mut self) -> ListingTicket {
        self.listing_seq += 1;
        ListingTicket {
            seq: self.listing_seq,
            path: self.current_path.clone(),
        }
    }

    /// Whether `ticket` belongs to the most recent listing request.
    #[must_use]
    pub fn is_current(&self, ticket: &ListingTicket) -> bool {
        ticket.seq == self.listing_seq && ticket.path == self.current_path
    }

    /// Apply a listing; stale tickets are ignored and `false` is returned.
    pub fn apply_listing(&mut self, ticket: &ListingTicket, files: Vec<FileInfo>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                node_id = %self.node_id,
                path = %ticket.path,
                "discarding stale listing"
            );
            return false;
        }
        self.files = files;
        true
    }
}
