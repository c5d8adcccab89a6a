// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::{bail, Context, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Platform clipboard tools, tried in order.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Copy `text` with the first tool that accepts it. Returns the tool name.
pub fn copy(text: &str) -> Result<&'static str> {
    for &(program, args) in TOOLS {
        match pipe_to(program, args, text) {
            Ok(true) => return Ok(program),
            Ok(false) => debug!(target: "cli", program, "clipboard tool exited with failure"),
            Err(e) => debug!(target: "cli", program, error = %e, "clipboard tool unavailable"),
        }
    }
    bail!("no clipboard tool available (tried pbcopy, wl-copy, xclip, xsel, clip)")
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<bool> {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("spawn {program}")),
    };

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(text.as_bytes()) {
            // the exit status below reports why the tool stopped reading
            Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(e).with_context(|| format!("write to {program}"))
            }
            _ => {}
        }
    }

    let status = child.wait().with_context(|| format!("wait for {program}"))?;
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_skipped() {
        let accepted = pipe_to("songlink-no-such-clipboard-tool", &[], "text").unwrap();
        assert!(!accepted);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_program_accepts_text() {
        assert!(pipe_to("cat", &[], "https://song.link/x").unwrap());
        assert!(!pipe_to("false", &[], "https://song.link/x").unwrap());
    }
}
