//! Client for the node agent's file endpoints under
//! `/api/v1/nodes/{id}/files`.
//!
//! # Design
//! - Every response is an [`Envelope`]; `success: false` becomes
//!   [`ApiError::Rejected`] carrying the agent message or the operation's
//!   fallback text.
//! - Paths are forwarded verbatim; the agent owns normalization.

use fleetdeck_api_models::{
    Ack, CopyRequest, Envelope, FileContent, FileExistence, FileInfo, FileListing, MkdirRequest,
    MoveRequest, PathRequest, RenameRequest, WriteFileRequest, ZipRequest,
};

use super::{flag, with_query};
use crate::bridge::UploadPart;
use crate::error::{ApiError, ApiResult};
use crate::facade::Facade;

/// Result of a directory listing with the agent's fallbacks applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Entries in the directory.
    pub files: Vec<FileInfo>,
    /// Directory that was listed.
    pub current_path: String,
}

/// Remote file-agent client.
#[derive(Debug, Clone)]
pub struct FilesApi {
    facade: Facade,
}

fn files_root(node_id: &str) -> String {
    format!("/api/v1/nodes/{node_id}/files")
}

fn unwrap<T>(operation: &'static str, fallback: &str, envelope: Envelope<T>) -> ApiResult<T> {
    envelope.into_result(fallback).map_err(|message| {
        tracing::warn!(operation, message = %message, "file operation rejected");
        ApiError::Rejected { operation, message }
    })
}

impl FilesApi {
    /// Client over `facade`.
    #[must_use]
    pub const fn new(facade: Facade) -> Self {
        Self { facade }
    }

    /// List `path` on `node_id`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn list(
        &self,
        node_id: &str,
        path: &str,
        recursive: bool,
    ) -> ApiResult<DirectoryListing> {
        let endpoint = with_query(
            &files_root(node_id),
            &[("path", path), ("recursive", flag(recursive))],
        );
        let envelope: Envelope<FileListing> = self.facade.get_json(&endpoint).await?;
        let listing = unwrap("list_files", "Failed to list files", envelope)?;
        Ok(DirectoryListing {
            files: listing.files,
            current_path: listing.current_path.unwrap_or_else(|| path.to_string()),
        })
    }

    /// Create an empty directory.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn create_directory(&self, node_id: &str, path: &str) -> ApiResult<()> {
        let endpoint = format!("{}/directory", files_root(node_id));
        let body = PathRequest { path: path.to_string() };
        let envelope: Envelope<Ack> = self.facade.post_json(&endpoint, &body).await?;
        unwrap("create_directory", "Failed to create directory", envelope).map(drop)
    }

    /// Create an empty file.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn create_file(&self, node_id: &str, path: &str) -> ApiResult<()> {
        let endpoint = format!("{}/file", files_root(node_id));
        let body = PathRequest { path: path.to_string() };
        let envelope: Envelope<Ack> = self.facade.post_json(&endpoint, &body).await?;
        unwrap("create_file", "Failed to create file", envelope).map(drop)
    }

    /// Delete a file or directory.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn delete(&self, node_id: &str, path: &str, recursive: bool) -> ApiResult<()> {
        let endpoint = with_query(
            &files_root(node_id),
            &[("path", path), ("recursive", flag(recursive))],
        );
        let envelope: Envelope<Ack> = self.facade.delete_json(&endpoint).await?;
        unwrap("delete_file", "Failed to delete file", envelope).map(drop)
    }

    /// Rename `old_path` to `new_path`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn rename(&self, node_id: &str, old_path: &str, new_path: &str) -> ApiResult<()> {
        let endpoint = format!("{}/rename", files_root(node_id));
        let body = RenameRequest {
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
        };
        let envelope: Envelope<Ack> = self.facade.put_json(&endpoint, &body).await?;
        unwrap("rename_file", "Failed to rename file", envelope).map(drop)
    }

    /// Move `source` to `dest`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn move_path(&self, node_id: &str, source: &str, dest: &str) -> ApiResult<()> {
        let endpoint = format!("{}/move", files_root(node_id));
        let body = MoveRequest {
            source_path: source.to_string(),
            dest_path: dest.to_string(),
        };
        let envelope: Envelope<Ack> = self.facade.put_json(&endpoint, &body).await?;
        unwrap("move_file", "Failed to move file", envelope).map(drop)
    }

    /// Copy `source` to `dest`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn copy(
        &self,
        node_id: &str,
        source: &str,
        dest: &str,
        recursive: bool,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/copy", files_root(node_id));
        let body = CopyRequest {
            source_path: source.to_string(),
            dest_path: dest.to_string(),
            recursive,
        };
        let envelope: Envelope<Ack> = self.facade.put_json(&endpoint, &body).await?;
        unwrap("copy_file", "Failed to copy file", envelope).map(drop)
    }

    /// Read a file; the content is Base64 text.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn read(&self, node_id: &str, path: &str) -> ApiResult<FileContent> {
        let endpoint = with_query(&format!("{}/read", files_root(node_id)), &[("path", path)]);
        let envelope: Envelope<FileContent> = self.facade.get_json(&endpoint).await?;
        unwrap("read_file", "Failed to read file", envelope)
    }

    /// Write (or append) text content.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn write(
        &self,
        node_id: &str,
        path: &str,
        content: &str,
        append: bool,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/write", files_root(node_id));
        let body = WriteFileRequest {
            path: path.to_string(),
            content: content.to_string(),
            append,
        };
        let envelope: Envelope<Ack> = self.facade.post_json(&endpoint, &body).await?;
        unwrap("write_file", "Failed to write file", envelope).map(drop)
    }

    /// Check whether `path` exists.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn exists(&self, node_id: &str, path: &str) -> ApiResult<FileExistence> {
        let endpoint = with_query(&format!("{}/exists", files_root(node_id)), &[("path", path)]);
        let envelope: Envelope<FileExistence> = self.facade.get_json(&endpoint).await?;
        unwrap(
            "file_exists",
            "Failed to check file existence",
            envelope,
        )
    }

    /// Create a directory, optionally with missing parents.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn mkdir(&self, node_id: &str, path: &str, parents: bool) -> ApiResult<()> {
        let endpoint = format!("{}/mkdir", files_root(node_id));
        let body = MkdirRequest {
            path: path.to_string(),
            parents,
        };
        let envelope: Envelope<Ack> = self.facade.post_json(&endpoint, &body).await?;
        unwrap("mkdir", "Failed to create directory", envelope).map(drop)
    }

    /// Archive `source` into the zip file `dest`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn zip(
        &self,
        node_id: &str,
        source: &str,
        dest: &str,
        recursive: bool,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/zip", files_root(node_id));
        let body = ZipRequest {
            source_path: source.to_string(),
            dest_path: dest.to_string(),
            recursive,
        };
        let envelope: Envelope<Ack> = self.facade.post_json(&endpoint, &body).await?;
        unwrap("zip_files", "Failed to zip files", envelope).map(drop)
    }

    /// Extract the archive `source` into `dest`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn unzip(&self, node_id: &str, source: &str, dest: &str) -> ApiResult<()> {
        let endpoint = format!("{}/unzip", files_root(node_id));
        let body = MoveRequest {
            source_path: source.to_string(),
            dest_path: dest.to_string(),
        };
        let envelope: Envelope<Ack> = self.facade.post_json(&endpoint, &body).await?;
        unwrap("unzip_files", "Failed to unzip files", envelope).map(drop)
    }

    /// Download `path` as a zip archive.
    ///
    /// # Errors
    /// Returns bridge failures.
    pub async fn download_folder(&self, node_id: &str, path: &str) -> ApiResult<Vec<u8>> {
        let endpoint = with_query(
            &format!("{}/download", files_root(node_id)),
            &[("path", path)],
        );
        self.facade.download(&endpoint).await
    }

    /// Upload an archive into `dest_path`.
    ///
    /// # Errors
    /// Returns bridge failures or the agent's rejection.
    pub async fn upload_folder(
        &self,
        node_id: &str,
        dest_path: &str,
        part: UploadPart,
    ) -> ApiResult<()> {
        let endpoint = with_query(
            &format!("{}/upload", files_root(node_id)),
            &[("dest_path", dest_path)],
        );
        let envelope: Envelope<Ack> = self.facade.upload(&endpoint, part).await?;
        unwrap("upload_folder", "Failed to upload folder", envelope).map(drop)
    }
}
