//! Shared runner for external keystroke tools

use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::KeystrokeError;

/// Run `program` with `args`, discarding its output.
///
/// A missing binary maps to `not_found`; a non-zero exit to `SendFailed`.
pub(super) async fn run_tool(
    program: &str,
    args: &[String],
    not_found: impl FnOnce() -> KeystrokeError,
) -> Result<(), KeystrokeError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                not_found()
            } else {
                KeystrokeError::SendFailed(e.to_string())
            }
        })?;

    if !status.success() {
        return Err(KeystrokeError::SendFailed(format!(
            "{} exited with status: {}",
            program, status
        )));
    }

    Ok(())
}
