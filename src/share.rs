use crate::clipboard::{ClipboardSink, pipe_to_command};
use crate::error::{GreetingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
}

/// Hands `text` to the configured share command, copying it when that is not possible.
pub fn share(
    text: &str,
    title: &str,
    command: Option<&str>,
    clipboard: &mut dyn ClipboardSink,
) -> Result<ShareOutcome> {
    if let Some(command) = command {
        match run_share_command(command, text, title) {
            Ok(()) => return Ok(ShareOutcome::Shared),
            Err(e) => tracing::warn!(command, error = %e, "share command failed, copying instead"),
        }
    }
    clipboard.copy(text)?;
    Ok(ShareOutcome::Copied)
}

fn run_share_command(command: &str, text: &str, title: &str) -> Result<()> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| GreetingError::Share("empty share command".to_string()))?;
    let args: Vec<&str> = parts.collect();
    pipe_to_command(program, &args, text, &[("SEOLLAL_SHARE_TITLE", title)])?;
    Ok(())
}
