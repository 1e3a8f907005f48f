use std::io::{self, Write};
use std::process::{Command, Stdio};

use arboard::Clipboard;

use crate::error::{GreetingError, Result};

// Tried in order when arboard cannot reach a clipboard.
const FALLBACK_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard through arboard, then platform copy commands.
pub struct SystemClipboard {
    // kept alive so X11 selections survive until exit
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let clipboard = Clipboard::new()
            .map_err(|e| tracing::debug!(error = %e, "arboard unavailable"))
            .ok();
        Self { clipboard }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if let Some(cb) = self.clipboard.as_mut() {
            match cb.set_text(text.to_string()) {
                Ok(()) => return Ok(()),
                Err(e) => tracing::debug!(error = %e, "arboard copy failed, trying commands"),
            }
        }
        fallback_copy(text)
    }
}

fn fallback_copy(text: &str) -> Result<()> {
    for (program, args) in FALLBACK_COMMANDS {
        match pipe_to_command(program, args, text, &[]) {
            Ok(()) => {
                tracing::debug!(program, "copied via command");
                return Ok(());
            }
            Err(e) => tracing::trace!(program, error = %e, "copy command failed"),
        }
    }
    Err(GreetingError::Clipboard(
        "no clipboard backend or copy command available".to_string(),
    ))
}

/// Runs `program` with `text` on stdin and waits for a zero exit.
pub fn pipe_to_command(
    program: &str,
    args: &[&str],
    text: &str,
    envs: &[(&str, &str)],
) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_an_error() {
        assert!(pipe_to_command("seollal-no-such-program", &[], "hi", &[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_checked() {
        assert!(pipe_to_command("cat", &[], "hi", &[]).is_ok());
        assert!(pipe_to_command("false", &[], "hi", &[]).is_err());
    }
}
