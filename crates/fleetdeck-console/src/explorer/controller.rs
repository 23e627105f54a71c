//! Async file-explorer controller.
//!
//! # Design
//! - Owns an [`ExplorerState`] and drives it from [`FilesApi`] results.
//! - Every remote failure ends here: it becomes an error toast and a `warn`
//!   log, and navigation/selection state is left as it was.
//! - Mutations re-list the current directory after success; the backend is
//!   the only source of truth.

use std::path::{Path, PathBuf};

use fleetdeck_api_models::FileInfo;
use futures_util::future::join_all;

use super::path::{self, Breadcrumb};
use super::state::{ClipboardOp, ExplorerState};
use crate::api::FilesApi;
use crate::bridge::UploadPart;
use crate::error::ApiError;
use crate::store::ToastStore;

/// Archive name used when the folder has no name of its own.
const FALLBACK_ARCHIVE_STEM: &str = "folder";

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    /// Return `true` to proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of deleting one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Path that was deleted.
    pub path: String,
    /// Failure message, `None` on success.
    pub error: Option<String>,
}

impl DeleteOutcome {
    /// Whether the delete succeeded.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-path results of a batch delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Outcomes in request order.
    pub outcomes: Vec<DeleteOutcome>,
}

impl DeleteReport {
    /// Whether every path was deleted.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(DeleteOutcome::ok)
    }

    /// Whether at least one path was deleted.
    #[must_use]
    pub fn any_ok(&self) -> bool {
        self.outcomes.iter().any(DeleteOutcome::ok)
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DeleteOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.ok())
    }
}

/// Folder archive fetched by [`FileExplorer::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArchive {
    /// Suggested file name (`<folder>.zip`).
    pub file_name: String,
    /// Archive bytes.
    pub bytes: Vec<u8>,
}

/// Explorer for one node's filesystem.
#[derive(Debug)]
pub struct FileExplorer {
    api: FilesApi,
    state: ExplorerState,
    toasts: ToastStore,
    loading: bool,
    uploading: bool,
    downloading: Option<String>,
    new_item_name: String,
    rename_target: Option<FileInfo>,
    pending_upload: Option<PathBuf>,
}

impl FileExplorer {
    /// Explorer at `/` on `node_id`. Call [`FileExplorer::refresh`] to load.
    #[must_use]
    pub fn new(api: FilesApi, node_id: impl Into<String>) -> Self {
        Self {
            api,
            state: ExplorerState::new(node_id),
            toasts: ToastStore::default(),
            loading: false,
            uploading: false,
            downloading: None,
            new_item_name: String::new(),
            rename_target: None,
            pending_upload: None,
        }
    }

    /// Navigation, selection, and clipboard state.
    #[must_use]
    pub const fn state(&self) -> &ExplorerState {
        &self.state
    }

    /// Notifications raised so far.
    #[must_use]
    pub const fn toasts(&self) -> &ToastStore {
        &self.toasts
    }

    /// Mutable access for dismissing or expiring toasts.
    pub const fn toasts_mut(&mut self) -> &mut ToastStore {
        &mut self.toasts
    }

    /// Whether a listing is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Whether an upload is in flight.
    #[must_use]
    pub const fn uploading(&self) -> bool {
        self.uploading
    }

    /// Path being downloaded, if any.
    #[must_use]
    pub fn downloading(&self) -> Option<&str> {
        self.downloading.as_deref()
    }

    /// Text of the new-folder/new-file input.
    #[must_use]
    pub fn new_item_name(&self) -> &str {
        &self.new_item_name
    }

    /// Entry awaiting a new name.
    #[must_use]
    pub const fn rename_target(&self) -> Option<&FileInfo> {
        self.rename_target.as_ref()
    }

    /// Local archive chosen for upload.
    #[must_use]
    pub fn pending_upload(&self) -> Option<&Path> {
        self.pending_upload.as_deref()
    }

    /// Breadcrumb trail for the current path.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        path::breadcrumbs(self.state.current_path())
    }

    fn report_failure(&mut self, action: &'static str, prefix: &str, err: &ApiError) {
        let message = err.user_message();
        tracing::warn!(
            node_id = %self.state.node_id(),
            path = %self.state.current_path(),
            action,
            error = %message,
            "file explorer action failed"
        );
        self.toasts.error(format!("{prefix}: {message}"));
    }

    /// Re-list the current directory. Returns whether the listing applied.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.state.begin_listing();
        self.loading = true;
        let result = self
            .api
            .list(self.state.node_id(), ticket.path(), false)
            .await;
        self.loading = false;
        match result {
            Ok(listing) => self.state.apply_listing(&ticket, listing.files),
            Err(err) => {
                self.report_failure("list", "Failed to load files", &err);
                false
            }
        }
    }

    /// Enter the child directory `name` and list it.
    pub async fn open(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if let Some(entry) = self.state.entry(name)
            && !entry.is_directory
        {
            self.toasts.warning(format!("{name} is not a folder"));
            return false;
        }
        self.state.navigate_into(name);
        self.refresh().await
    }

    /// Go to the parent directory; no-op at `/`.
    pub async fn up(&mut self) -> bool {
        if !self.state.navigate_up() {
            return false;
        }
        self.refresh().await
    }

    /// Jump to `path` (a breadcrumb) and list it.
    pub async fn go(&mut self, path: &str) -> bool {
        self.state.navigate_to(path);
        self.refresh().await
    }

    /// Toggle one path in the selection.
    pub fn toggle(&mut self, path: &str) {
        self.state.toggle_selection(path);
    }

    /// Select every entry of the current listing.
    pub fn select_all(&mut self) {
        self.state.select_all();
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    /// Stage the first selected path for copying.
    pub fn copy(&mut self) -> bool {
        if self.state.copy().is_none() {
            return false;
        }
        self.toasts.info("Copied to clipboard");
        true
    }

    /// Stage the first selected path for moving.
    pub fn cut(&mut self) -> bool {
        if self.state.cut().is_none() {
            return false;
        }
        self.toasts.info("Cut to clipboard");
        true
    }

    /// Paste the clipboard into the current directory.
    pub async fn paste(&mut self) -> bool {
        let Some(plan) = self.state.paste_plan() else {
            return false;
        };
        let node_id = self.state.node_id().to_string();
        let result = match plan.operation {
            ClipboardOp::Copy => {
                self.api
                    .copy(&node_id, &plan.source, &plan.dest, true)
                    .await
            }
            ClipboardOp::Cut => self.api.move_path(&node_id, &plan.source, &plan.dest).await,
        };
        if let Err(err) = result {
            self.report_failure("paste", "Failed to paste", &err);
            return false;
        }
        tracing::info!(
            node_id = %node_id,
            source = %plan.source,
            dest = %plan.dest,
            "paste completed"
        );
        self.state.complete_paste(plan.operation);
        self.toasts.success(match plan.operation {
            ClipboardOp::Copy => "Copied successfully",
            ClipboardOp::Cut => "Moved successfully",
        });
        self.refresh().await;
        true
    }

    /// Delete `target`, or the whole selection when `target` is `None`.
    ///
    /// Returns `None` when there is nothing to delete or the operator
    /// declined.
    pub async fn delete(
        &mut self,
        target: Option<&str>,
        confirm: &mut dyn Confirm,
    ) -> Option<DeleteReport> {
        let paths: Vec<String> = match target {
            Some(path) => vec![path.to_string()],
            None => self.state.selection().paths().to_vec(),
        };
        if paths.is_empty() {
            return None;
        }
        let prompt = format!("Are you sure you want to delete {} item(s)?", paths.len());
        if !confirm.confirm(&prompt) {
            return None;
        }

        let api = &self.api;
        let node_id = self.state.node_id();
        let outcomes = join_all(paths.iter().map(|path| async move {
            let result = api.delete(node_id, path, true).await;
            DeleteOutcome {
                path: path.clone(),
                error: result.err().map(|err| err.user_message()),
            }
        }))
        .await;
        let report = DeleteReport { outcomes };

        for failure in report.failures() {
            tracing::warn!(
                node_id = %self.state.node_id(),
                path = %failure.path,
                error = failure.error.as_deref().unwrap_or_default(),
                "delete failed"
            );
            self.toasts.error(format!(
                "Failed to delete {}: {}",
                failure.path,
                failure.error.as_deref().unwrap_or_default()
            ));
        }
        if report.all_ok() {
            tracing::info!(node_id = %self.state.node_id(), count = paths.len(), "paths deleted");
            self.state.clear_selection();
            self.toasts.success("Deleted successfully");
        }
        if report.any_ok() {
            self.refresh().await;
        }
        Some(report)
    }

    /// Replace the new-item input.
    pub fn set_new_item_name(&mut self, name: impl Into<String>) {
        self.new_item_name = name.into();
    }

    /// Create a directory named after the input. Blank names make no call.
    pub async fn create_folder(&mut self) -> bool {
        self.create_item(true).await
    }

    /// Create an empty file named after the input. Blank names make no call.
    pub async fn create_file(&mut self) -> bool {
        self.create_item(false).await
    }

    async fn create_item(&mut self, directory: bool) -> bool {
        let name = self.new_item_name.trim();
        if name.is_empty() {
            return false;
        }
        let target = path::join(self.state.current_path(), name);
        let node_id = self.state.node_id();
        let result = if directory {
            self.api.create_directory(node_id, &target).await
        } else {
            self.api.create_file(node_id, &target).await
        };
        if let Err(err) = result {
            let prefix = if directory {
                "Failed to create folder"
            } else {
                "Failed to create file"
            };
            self.report_failure("create", prefix, &err);
            return false;
        }
        tracing::info!(node_id = %self.state.node_id(), path = %target, directory, "entry created");
        self.new_item_name.clear();
        self.toasts.success(if directory {
            "Folder created successfully"
        } else {
            "File created successfully"
        });
        self.refresh().await;
        true
    }

    /// Mark `entry` for renaming.
    pub fn begin_rename(&mut self, entry: FileInfo) {
        self.rename_target = Some(entry);
    }

    /// Abandon a pending rename.
    pub fn cancel_rename(&mut self) {
        self.rename_target = None;
    }

    /// Rename the pending target to `new_name` within its directory.
    pub async fn rename(&mut self, new_name: &str) -> bool {
        let new_name = new_name.trim();
        let Some(old_path) = self.rename_target.as_ref().map(|entry| entry.path.clone()) else {
            return false;
        };
        if new_name.is_empty() {
            return false;
        }
        let new_path = path::join(&path::parent_of(&old_path), new_name);
        let result = self
            .api
            .rename(self.state.node_id(), &old_path, &new_path)
            .await;
        if let Err(err) = result {
            self.report_failure("rename", "Failed to rename", &err);
            return false;
        }
        tracing::info!(node_id = %self.state.node_id(), old_path = %old_path, new_path = %new_path, "entry renamed");
        self.rename_target = None;
        self.toasts.success("Renamed successfully");
        self.refresh().await;
        true
    }

    /// Choose a local archive for the next upload.
    pub fn select_upload(&mut self, file: impl Into<PathBuf>) {
        self.pending_upload = Some(file.into());
    }

    /// Upload the chosen archive into the current directory.
    ///
    /// The pending file is cleared whether or not the upload succeeds.
    pub async fn upload(&mut self) -> bool {
        let Some(file) = self.pending_upload.take() else {
            return false;
        };
        self.uploading = true;
        let result = self.send_upload(&file).await;
        self.uploading = false;
        if let Err(err) = result {
            self.report_failure("upload", "Failed to upload folder", &err);
            return false;
        }
        tracing::info!(node_id = %self.state.node_id(), file = %file.display(), "archive uploaded");
        self.toasts.success("Folder uploaded successfully");
        self.refresh().await;
        true
    }

    async fn send_upload(&self, file: &Path) -> Result<(), ApiError> {
        let bytes = tokio::fs::read(file).await.map_err(|err| {
            ApiError::Validation(format!("cannot read {}: {err}", file.display()))
        })?;
        let file_name = file
            .file_name()
            .map_or_else(|| "upload.zip".to_string(), |name| name.to_string_lossy().into_owned());
        self.api
            .upload_folder(
                self.state.node_id(),
                self.state.current_path(),
                UploadPart { file_name, bytes },
            )
            .await
    }

    /// Download `target` (or the current directory) as a zip archive.
    ///
    /// Returns `None` at `/` without an explicit target, or on failure.
    pub async fn download(&mut self, target: Option<&FileInfo>) -> Option<DownloadedArchive> {
        if !self.can_download(target) {
            return None;
        }
        let (source, stem) = match target {
            Some(entry) if !entry.name.is_empty() => (entry.path.clone(), entry.name.clone()),
            Some(entry) => (entry.path.clone(), FALLBACK_ARCHIVE_STEM.to_string()),
            None => (
                self.state.current_path().to_string(),
                FALLBACK_ARCHIVE_STEM.to_string(),
            ),
        };

        self.downloading = Some(source.clone());
        let result = self.api.download_folder(self.state.node_id(), &source).await;
        self.downloading = None;
        match result {
            Ok(bytes) => {
                tracing::info!(node_id = %self.state.node_id(), path = %source, bytes = bytes.len(), "archive downloaded");
                self.toasts.success("Download started");
                Some(DownloadedArchive {
                    file_name: format!("{stem}.zip"),
                    bytes,
                })
            }
            Err(err) => {
                self.report_failure("download", "Failed to download", &err);
                None
            }
        }
    }

    /// Whether "up" is enabled.
    #[must_use]
    pub fn can_go_up(&self) -> bool {
        !self.state.at_root()
    }

    /// Whether copy/cut are enabled.
    #[must_use]
    pub fn can_copy(&self) -> bool {
        !self.state.selection().is_empty()
    }

    /// Whether paste is enabled.
    #[must_use]
    pub const fn can_paste(&self) -> bool {
        self.state.clipboard().is_some()
    }

    /// Whether delete-selection is enabled.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        !self.state.selection().is_empty()
    }

    /// Whether create-folder/create-file are enabled.
    #[must_use]
    pub fn can_create(&self) -> bool {
        !self.new_item_name.trim().is_empty()
    }

    /// Whether upload is enabled.
    #[must_use]
    pub const fn can_upload(&self) -> bool {
        self.pending_upload.is_some() && !self.uploading
    }

    /// Whether download is enabled for `target`.
    #[must_use]
    pub fn can_download(&self, target: Option<&FileInfo>) -> bool {
        self.downloading.is_none() && (target.is_some() || !self.state.at_root())
    }
}
