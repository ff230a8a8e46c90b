//! Vendor tool invocation.

use std::process::Command;

use tracing::debug;

/// Run `cmd args...` and return its stdout if it exited successfully.
///
/// A missing tool or a non-zero exit is not an error for probing purposes,
/// just an absent answer.
pub fn command_stdout(cmd: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(cmd).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            debug!(target: "edgewriter.probe", cmd, error = %e, "Probe command unavailable");
            return None;
        }
    };

    if !output.status.success() {
        debug!(target: "edgewriter.probe", cmd, status = %output.status, "Probe command failed");
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
