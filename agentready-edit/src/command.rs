//! Shell command execution with a wall-clock timeout.

use crate::error::{EditError, EditResult};
use camino::Utf8Path;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        cmd
    }
}

/// Run `command` through the platform shell in `cwd`, killing it after `timeout`.
///
/// The deadline covers both the shell and anything it leaves holding its
/// output pipes. A non-zero exit, a spawn failure, and a timeout are all errors.
pub fn run_command(command: &str, cwd: &Utf8Path, timeout: Duration) -> EditResult<CommandOutput> {
    debug!(command, cwd = %cwd, timeout_secs = timeout.as_secs(), "running command");

    let mut child = shell(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| EditError::CommandSpawn {
            command: command.to_string(),
            source,
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let timed_out = || EditError::CommandTimedOut {
        command: command.to_string(),
        seconds: timeout.as_secs().max(1),
    };

    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                kill(&mut child);
                warn!(command, "command timed out");
                return Err(timed_out());
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    // Background processes spawned by the shell may still hold the pipes.
    let (Some(stdout), Some(stderr)) = (collect(&stdout, deadline), collect(&stderr, deadline))
    else {
        kill_group(child.id());
        warn!(command, "command output still open at deadline");
        return Err(timed_out());
    };

    if !status.success() {
        return Err(EditError::CommandFailed {
            command: command.to_string(),
            status: status.to_string(),
            stderr,
        });
    }
    Ok(CommandOutput { stdout, stderr })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a drained pipe until `deadline`. `None` means it is still open.
fn collect(rx: &Receiver<String>, deadline: Instant) -> Option<String> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
        Err(RecvTimeoutError::Timeout) => None,
    }
}

fn kill(child: &mut Child) {
    kill_group(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

/// Kill the process group led by `pid`; the shell was spawned as its leader.
fn kill_group(pid: u32) {
    if cfg!(unix) {
        let _ = Command::new("kill")
            .args(["-KILL", "--", &format!("-{pid}")])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}
