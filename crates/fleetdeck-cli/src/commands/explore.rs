//! Line-driven file explorer over one node.
//!
//! Reads commands from any `BufRead` and writes to any `Write`, so the
//! session can be scripted in tests. Delete confirmations are answered by
//! the next input line.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::anyhow;
use fleetdeck_console::AppContext;
use fleetdeck_console::explorer::{ClipboardOp, FileExplorer, join};
use fleetdeck_console::store::Toast;

use crate::cli::ExploreArgs;
use crate::client::{CliError, CliResult};
use crate::commands::files::save_archive;
use crate::output::listing_lines;

const HELP: &str = "\
commands:
  ls                     list the current folder
  cd <name|path|..>      enter a folder, jump to an absolute path, or go up
  go <path>              jump to an absolute path
  up                     go to the parent folder
  pwd | crumbs           print the current path / its breadcrumb trail
  select <name>          toggle an entry in the selection
  select-all | clear     select every entry / clear the selection
  copy | cut | paste     clipboard (first selected entry)
  rm [name]              delete an entry, or the selection
  mkdir <name>           create a folder here
  touch <name>           create an empty file here
  rename <name> <new>    rename an entry
  upload <local file>    upload an archive into this folder
  download [name]        save an entry (or this folder) as a zip
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Ls,
    Cd(String),
    Go(String),
    Up,
    Pwd,
    Crumbs,
    Select(String),
    All,
    ClearSelection,
    Copy,
    Cut,
    Paste,
    Rm(Option<String>),
    Mkdir(String),
    Touch(String),
    Rename { name: String, new_name: String },
    Upload(String),
    Download(Option<String>),
    Help,
    Quit,
    Blank,
    Unknown(String),
}

fn parse_line(raw: &str) -> Line {
    let raw = raw.trim();
    let (command, rest) = raw
        .split_once(char::is_whitespace)
        .map_or((raw, ""), |(command, rest)| (command, rest.trim()));
    let arg = || Some(rest.to_string()).filter(|value| !value.is_empty());
    match command {
        "" => Line::Blank,
        "ls" | "refresh" => Line::Ls,
        "cd" if !rest.is_empty() => Line::Cd(rest.to_string()),
        "go" if !rest.is_empty() => Line::Go(rest.to_string()),
        "up" | ".." => Line::Up,
        "pwd" => Line::Pwd,
        "crumbs" => Line::Crumbs,
        "select" | "sel" if !rest.is_empty() => Line::Select(rest.to_string()),
        "select-all" | "all" => Line::All,
        "clear" | "none" => Line::ClearSelection,
        "copy" => Line::Copy,
        "cut" => Line::Cut,
        "paste" => Line::Paste,
        "rm" | "delete" => Line::Rm(arg()),
        "mkdir" if !rest.is_empty() => Line::Mkdir(rest.to_string()),
        "touch" if !rest.is_empty() => Line::Touch(rest.to_string()),
        "rename" => rest
            .rsplit_once(char::is_whitespace)
            .map_or_else(
                || Line::Unknown(raw.to_string()),
                |(name, new_name)| Line::Rename {
                    name: name.trim().to_string(),
                    new_name: new_name.to_string(),
                },
            ),
        "upload" if !rest.is_empty() => Line::Upload(rest.to_string()),
        "download" => Line::Download(arg()),
        "help" | "?" => Line::Help,
        "quit" | "exit" | "q" => Line::Quit,
        _ => Line::Unknown(raw.to_string()),
    }
}

pub(crate) async fn handle_explore(ctx: &AppContext, args: ExploreArgs) -> CliResult<()> {
    let mut explorer = ctx.explorer(&args.node);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_session(&mut explorer, &mut input, &mut output, &args.download_dir).await
}

/// Drive `explorer` until `quit` or end of input.
pub(crate) async fn run_session<R, W>(
    explorer: &mut FileExplorer,
    input: &mut R,
    output: &mut W,
    download_dir: &Path,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    if explorer.refresh().await {
        print_listing(explorer, output)?;
    }
    flush_toasts(explorer, output)?;

    loop {
        write!(
            output,
            "{}:{}> ",
            explorer.state().node_id(),
            explorer.state().current_path()
        )
        .and_then(|()| output.flush())
        .map_err(io_failure)?;
        let Some(line) = read_line(input)? else {
            break;
        };
        let line = parse_line(&line);
        if line == Line::Quit {
            break;
        }
        execute(explorer, line, input, output, download_dir).await?;
        flush_toasts(explorer, output)?;
    }
    Ok(())
}

async fn execute<R, W>(
    explorer: &mut FileExplorer,
    line: Line,
    input: &mut R,
    output: &mut W,
    download_dir: &Path,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    match line {
        Line::Ls => {
            if explorer.refresh().await {
                print_listing(explorer, output)?;
            }
        }
        Line::Cd(target) => {
            let moved = match target.as_str() {
                ".." => explorer.up().await,
                path if path.starts_with('/') => explorer.go(path).await,
                name => explorer.open(name).await,
            };
            if moved {
                print_listing(explorer, output)?;
            }
        }
        Line::Go(path) => {
            if explorer.go(&path).await {
                print_listing(explorer, output)?;
            }
        }
        Line::Up => {
            if explorer.up().await {
                print_listing(explorer, output)?;
            }
        }
        Line::Pwd => say(output, explorer.state().current_path())?,
        Line::Crumbs => {
            for crumb in explorer.breadcrumbs() {
                say(output, &format!("{:<16} {}", crumb.label, crumb.path))?;
            }
        }
        Line::Select(name) => {
            let path = entry_path(explorer, &name);
            explorer.toggle(&path);
            say(
                output,
                &format!("{} selected", explorer.state().selection().len()),
            )?;
        }
        Line::All => {
            explorer.select_all();
            say(
                output,
                &format!("{} selected", explorer.state().selection().len()),
            )?;
        }
        Line::ClearSelection => explorer.clear_selection(),
        Line::Copy => {
            if !explorer.copy() {
                say(output, "select an entry first")?;
            }
        }
        Line::Cut => {
            if !explorer.cut() {
                say(output, "select an entry first")?;
            }
        }
        Line::Paste => {
            if !explorer.can_paste() {
                say(output, "clipboard is empty")?;
            } else if explorer.paste().await {
                print_listing(explorer, output)?;
            }
        }
        Line::Rm(name) => {
            let target = name.map(|name| entry_path(explorer, &name));
            let mut confirm = |prompt: &str| ask(input, output, prompt);
            match explorer.delete(target.as_deref(), &mut confirm).await {
                Some(report) if report.any_ok() => print_listing(explorer, output)?,
                Some(_) => {}
                None if target.is_none() && !explorer.can_delete() => {
                    say(output, "nothing selected")?;
                }
                None => {}
            }
        }
        Line::Mkdir(name) => {
            explorer.set_new_item_name(name);
            if explorer.create_folder().await {
                print_listing(explorer, output)?;
            }
        }
        Line::Touch(name) => {
            explorer.set_new_item_name(name);
            if explorer.create_file().await {
                print_listing(explorer, output)?;
            }
        }
        Line::Rename { name, new_name } => {
            let Some(entry) = explorer.state().entry(&name).cloned() else {
                return say(output, &format!("no entry named {name}"));
            };
            explorer.begin_rename(entry);
            if explorer.rename(&new_name).await {
                print_listing(explorer, output)?;
            } else {
                explorer.cancel_rename();
            }
        }
        Line::Upload(file) => {
            explorer.select_upload(file);
            if explorer.upload().await {
                print_listing(explorer, output)?;
            }
        }
        Line::Download(name) => {
            let target = match name {
                Some(name) => {
                    let Some(entry) = explorer.state().entry(&name).cloned() else {
                        return say(output, &format!("no entry named {name}"));
                    };
                    Some(entry)
                }
                None => None,
            };
            if !explorer.can_download(target.as_ref()) {
                return say(output, "choose an entry to download from /");
            }
            if let Some(archive) = explorer.download(target.as_ref()).await {
                let out = download_dir.join(&archive.file_name);
                save_archive(&out, &archive.bytes).await?;
                say(output, &format!("saved {}", out.display()))?;
            }
        }
        Line::Help => say(output, HELP)?,
        Line::Unknown(raw) => say(output, &format!("unknown command: {raw} (try help)"))?,
        Line::Blank | Line::Quit => {}
    }
    Ok(())
}

fn entry_path(explorer: &FileExplorer, name: &str) -> String {
    explorer.state().entry(name).map_or_else(
        || join(explorer.state().current_path(), name),
        |entry| entry.path.clone(),
    )
}

fn print_listing<W: Write>(explorer: &FileExplorer, output: &mut W) -> CliResult<()> {
    let state = explorer.state();
    let crumbs: Vec<String> = explorer
        .breadcrumbs()
        .into_iter()
        .map(|crumb| crumb.label)
        .collect();
    say(output, &crumbs.join(" > "))?;
    if state.files().is_empty() {
        say(output, "  (empty)")?;
    }
    for (file, line) in state.files().iter().zip(listing_lines(state.files())) {
        let marker = if state.selection().contains(&file.path) {
            '*'
        } else {
            ' '
        };
        say(output, &format!("{marker} {line}"))?;
    }
    if let Some(clipboard) = state.clipboard() {
        let verb = match clipboard.operation {
            ClipboardOp::Copy => "copy",
            ClipboardOp::Cut => "cut",
        };
        say(output, &format!("clipboard: {verb} {}", clipboard.path))?;
    }
    Ok(())
}

fn flush_toasts<W: Write>(explorer: &mut FileExplorer, output: &mut W) -> CliResult<()> {
    let toasts: Vec<Toast> = explorer.toasts_mut().drain();
    for toast in toasts {
        say(output, &format!("[{}] {}", toast.kind.label(), toast.message))?;
    }
    Ok(())
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    if write!(output, "{prompt} [y/N] ")
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }
    matches!(
        read_line(input).ok().flatten().as_deref().map(str::trim),
        Some("y" | "Y" | "yes")
    )
}

fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_failure)?;
    Ok((read > 0).then_some(line))
}

fn say<W: Write>(output: &mut W, text: &str) -> CliResult<()> {
    writeln!(output, "{text}").map_err(io_failure)
}

fn io_failure(err: std::io::Error) -> CliError {
    CliError::failure(anyhow!("terminal I/O failed: {err}"))
}
