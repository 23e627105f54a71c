//! Remote file-agent DTOs.
//!
//! Every file endpoint answers with the same envelope:
//! `{ "success": bool, "error": "...", ...payload }`. The payload structs
//! default all of their fields so a failed envelope, which usually carries
//! only `success` and `error`, still decodes.

use serde::{Deserialize, Serialize};

/// Response envelope used by the file endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    /// Whether the agent completed the operation. A missing flag counts as
    /// failure.
    #[serde(default)]
    pub success: bool,
    /// Agent-supplied failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Operation-specific payload fields.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, or return the agent's error message (falling back
    /// to `fallback` when the agent did not provide one).
    ///
    /// # Errors
    /// Returns the failure message when `success` is `false`.
    pub fn into_result(self, fallback: &str) -> Result<T, String> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(self
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()))
        }
    }
}

/// One directory entry as reported by the node agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    /// Entry name without its parent directory.
    pub name: String,
    /// Absolute POSIX path.
    pub path: String,
    /// Whether the entry is a directory.
    #[serde(default)]
    pub is_directory: bool,
    /// Size in bytes (zero for directories on most agents).
    #[serde(default)]
    pub size: u64,
    /// Modification time in Unix seconds.
    #[serde(default)]
    pub modified_time: i64,
    /// Creation time in Unix seconds.
    #[serde(default)]
    pub created_time: i64,
    /// Permission string (for example `rwxr-xr-x`).
    #[serde(default)]
    pub permissions: String,
}

/// Listing payload for `GET /files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileListing {
    /// Entries in the requested directory.
    pub files: Vec<FileInfo>,
    /// Directory the agent actually listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_path: Option<String>,
}

/// Payload for `GET /files/read`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileContent {
    /// Base64-encoded file content.
    pub content: String,
    /// Total file size in bytes.
    pub total_size: u64,
}

/// Payload for `GET /files/exists`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileExistence {
    /// Whether the path exists.
    pub exists: bool,
    /// Whether the path is a directory.
    pub is_directory: bool,
}

/// Payload for operations that only acknowledge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Ack {
    /// Optional agent message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body for create-directory and create-file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathRequest {
    /// Target path.
    pub path: String,
}

/// Body for `PUT /files/rename`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameRequest {
    /// Existing path.
    pub old_path: String,
    /// Replacement path.
    pub new_path: String,
}

/// Body for `PUT /files/move` and `POST /files/unzip`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveRequest {
    /// Source path.
    pub source_path: String,
    /// Destination path.
    pub dest_path: String,
}

/// Body for `PUT /files/copy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyRequest {
    /// Source path.
    pub source_path: String,
    /// Destination path.
    pub dest_path: String,
    /// Copy directory contents.
    pub recursive: bool,
}

/// Body for `POST /files/zip`.
pub type ZipRequest = CopyRequest;

/// Body for `POST /files/write`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteFileRequest {
    /// Target path.
    pub path: String,
    /// Text to write.
    pub content: String,
    /// Append instead of truncating.
    pub append: bool,
}

/// Body for `POST /files/mkdir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MkdirRequest {
    /// Target path.
    pub path: String,
    /// Create missing parents.
    pub parents: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_envelope_prefers_agent_message() {
        let envelope: Envelope<FileListing> =
            serde_json::from_value(json!({"success": false, "error": "permission denied"}))
                .expect("decode");
        assert_eq!(
            envelope.into_result("Failed to list files"),
            Err("permission denied".to_string())
        );
    }

    #[test]
    fn failed_envelope_without_message_uses_fallback() {
        let envelope: Envelope<Ack> =
            serde_json::from_value(json!({"success": false})).expect("decode");
        assert_eq!(
            envelope.into_result("Failed to move file"),
            Err("Failed to move file".to_string())
        );
    }

    #[test]
    fn missing_success_flag_counts_as_failure() {
        let envelope: Envelope<Ack> = serde_json::from_value(json!({})).expect("decode");
        assert!(envelope.into_result("Failed to copy file").is_err());
    }

    #[test]
    fn listing_payload_flattens_out_of_envelope() {
        let envelope: Envelope<FileListing> = serde_json::from_value(json!({
            "success": true,
            "current_path": "/srv",
            "files": [{
                "name": "world",
                "path": "/srv/world",
                "is_directory": true,
                "size": 0,
                "modified_time": 1_700_000_000,
                "created_time": 1_690_000_000,
                "permissions": "rwxr-xr-x"
            }]
        }))
        .expect("decode");
        let listing = envelope.into_result("Failed to list files").expect("listing");
        assert_eq!(listing.current_path.as_deref(), Some("/srv"));
        assert_eq!(listing.files.len(), 1);
        assert!(listing.files[0].is_directory);
    }
}
