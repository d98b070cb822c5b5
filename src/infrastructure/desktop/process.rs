//! Process liveness checks

use std::process::Stdio;

use tokio::process::Command;

/// Whether a process with `pid` exists.
///
/// Sends signal 0, which performs the permission and existence checks
/// without delivering anything. EPERM still means the process exists.
#[cfg(unix)]
pub fn is_pid_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    match kill(Pid::from_raw(raw), None::<Signal>) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_pid_alive(_pid: u32) -> bool {
    true
}

/// Whether any process named exactly `name` is running
pub async fn is_process_running(name: &str) -> bool {
    Command::new("pgrep")
        .arg("-x")
        .arg(name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn own_process_is_alive() {
        assert!(is_pid_alive(std::process::id()));
    }

    #[test]
    fn out_of_range_pid_is_not_alive() {
        assert!(!is_pid_alive(u32::MAX));
    }
}
