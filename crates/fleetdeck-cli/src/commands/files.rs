use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use base64::{Engine as _, engine::general_purpose};
use fleetdeck_console::AppContext;
use fleetdeck_console::UploadPart;
use fleetdeck_console::api::FilesApi;
use fleetdeck_console::explorer::{basename, join, parent_of};
use fleetdeck_console::format::format_size;

use crate::cli::{FilesArgs, FilesOp, OutputFormat};
use crate::client::{CliError, CliResult};
use crate::output::{render_existence, render_listing};

const FALLBACK_ARCHIVE_STEM: &str = "folder";

pub(crate) async fn handle_files(
    ctx: &AppContext,
    args: FilesArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let api = ctx.files();
    let node = args.node.as_str();
    match args.op {
        FilesOp::Ls { path, recursive } => {
            let listing = api
                .list(node, &path, recursive)
                .await
                .map_err(CliError::from_api)?;
            render_listing(&listing.current_path, &listing.files, format)
        }
        FilesOp::Mkdir { path, parents } => {
            let path = require_path(&path)?;
            if parents {
                api.mkdir(node, path, true).await
            } else {
                api.create_directory(node, path).await
            }
            .map_err(CliError::from_api)?;
            println!("Created {path}");
            Ok(())
        }
        FilesOp::Touch { path } => {
            let path = require_path(&path)?;
            api.create_file(node, path)
                .await
                .map_err(CliError::from_api)?;
            println!("Created {path}");
            Ok(())
        }
        FilesOp::Rm { path, recursive } => {
            let path = require_path(&path)?;
            api.delete(node, path, recursive)
                .await
                .map_err(CliError::from_api)?;
            println!("Deleted {path}");
            Ok(())
        }
        FilesOp::Mv { source, dest } => {
            api.move_path(node, require_path(&source)?, require_path(&dest)?)
                .await
                .map_err(CliError::from_api)?;
            println!("Moved {source} -> {dest}");
            Ok(())
        }
        FilesOp::Cp {
            source,
            dest,
            recursive,
        } => {
            api.copy(node, require_path(&source)?, require_path(&dest)?, recursive)
                .await
                .map_err(CliError::from_api)?;
            println!("Copied {source} -> {dest}");
            Ok(())
        }
        FilesOp::Rename { path, new_name } => {
            let path = require_path(&path)?;
            let new_path = renamed_path(path, &new_name)?;
            api.rename(node, path, &new_path)
                .await
                .map_err(CliError::from_api)?;
            println!("Renamed {path} -> {new_path}");
            Ok(())
        }
        FilesOp::Cat { path } => cat(&api, node, require_path(&path)?).await,
        FilesOp::Write {
            path,
            content,
            from_file,
            append,
        } => {
            let content = write_content(content, from_file.as_deref()).await?;
            api.write(node, require_path(&path)?, &content, append)
                .await
                .map_err(CliError::from_api)?;
            println!("Wrote {} to {path}", format_size(byte_len(content.as_bytes())));
            Ok(())
        }
        FilesOp::Exists { path } => {
            let existence = api
                .exists(node, require_path(&path)?)
                .await
                .map_err(CliError::from_api)?;
            render_existence(&path, existence, format)
        }
        FilesOp::Zip {
            source,
            dest,
            recursive,
        } => {
            api.zip(node, require_path(&source)?, require_path(&dest)?, recursive)
                .await
                .map_err(CliError::from_api)?;
            println!("Archived {source} -> {dest}");
            Ok(())
        }
        FilesOp::Unzip { source, dest } => {
            api.unzip(node, require_path(&source)?, require_path(&dest)?)
                .await
                .map_err(CliError::from_api)?;
            println!("Extracted {source} -> {dest}");
            Ok(())
        }
        FilesOp::Download { path, out } => {
            let bytes = api
                .download_folder(node, require_path(&path)?)
                .await
                .map_err(CliError::from_api)?;
            let out = out.unwrap_or_else(|| PathBuf::from(archive_name(&path)));
            save_archive(&out, &bytes).await?;
            println!("Saved {} ({})", out.display(), format_size(byte_len(&bytes)));
            Ok(())
        }
        FilesOp::Upload { file, dest } => {
            let part = read_upload(&file).await?;
            let size = byte_len(&part.bytes);
            api.upload_folder(node, require_path(&dest)?, part)
                .await
                .map_err(CliError::from_api)?;
            println!("Uploaded {} ({}) to {dest}", file.display(), format_size(size));
            Ok(())
        }
    }
}

async fn cat(api: &FilesApi, node: &str, path: &str) -> CliResult<()> {
    let content = api.read(node, path).await.map_err(CliError::from_api)?;
    let bytes = general_purpose::STANDARD
        .decode(content.content.as_bytes())
        .map_err(|err| CliError::failure(anyhow!("file content is not valid base64: {err}")))?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&bytes)
        .and_then(|()| stdout.flush())
        .map_err(|err| CliError::failure(anyhow!("failed to write to stdout: {err}")))
}

fn byte_len(bytes: &[u8]) -> u64 {
    u64::try_from(bytes.len()).unwrap_or(u64::MAX)
}

fn require_path(path: &str) -> CliResult<&str> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation("path must not be empty"));
    }
    Ok(trimmed)
}

pub(crate) fn renamed_path(path: &str, new_name: &str) -> CliResult<String> {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name.contains('/') {
        return Err(CliError::validation(
            "new name must be a single non-empty path segment",
        ));
    }
    Ok(join(&parent_of(path), new_name))
}

/// `<folder>.zip` for the downloaded path.
pub(crate) fn archive_name(path: &str) -> String {
    let stem = basename(path);
    let stem = if stem.is_empty() {
        FALLBACK_ARCHIVE_STEM
    } else {
        stem
    };
    format!("{stem}.zip")
}

pub(crate) async fn save_archive(out: &Path, bytes: &[u8]) -> CliResult<()> {
    tokio::fs::write(out, bytes)
        .await
        .with_context(|| format!("failed to write {}", out.display()))
        .map_err(CliError::failure)
}

async fn read_upload(file: &Path) -> CliResult<UploadPart> {
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::validation("upload path must name a file"))?
        .to_string();
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))
        .map_err(CliError::failure)?;
    Ok(UploadPart { file_name, bytes })
}

async fn write_content(content: Option<String>, from_file: Option<&Path>) -> CliResult<String> {
    match (content, from_file) {
        (Some(content), None) => Ok(content),
        (None, Some(file)) => tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))
            .map_err(CliError::failure),
        _ => Err(CliError::validation(
            "pass exactly one of --content or --from-file",
        )),
    }
}
