//! Live shell executor using `std::process::Command`.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::ports::shell::{ShellError, ShellExecutor, ShellOutput, ShellRequest};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Live shell executor that runs commands via the system shell.
pub struct LiveShellExecutor;

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Reads a child pipe to EOF on its own thread so the child never blocks on a full pipe.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

/// Collects a finished reader, mapping panics and read errors to [`ShellError::Io`].
fn collect(reader: JoinHandle<io::Result<Vec<u8>>>, stream: &str) -> Result<String, ShellError> {
    let bytes = reader
        .join()
        .map_err(|_| ShellError::Io(format!("{stream} reader panicked")))?
        .map_err(|e| ShellError::Io(format!("failed to read {stream}: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Kill a process and reap it.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, request: &ShellRequest) -> Result<ShellOutput, ShellError> {
        let mut cmd = shell_command(&request.command);
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = &request.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| ShellError::Spawn(e.to_string()))?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // The deadline covers both the shell's exit and EOF on its pipes: a
        // backgrounded job holding stdout open counts against the timeout.
        let start = Instant::now();
        let mut exited = None;
        let status = loop {
            if exited.is_none() {
                match child.try_wait() {
                    Ok(status) => exited = status,
                    Err(e) => {
                        kill_process(&mut child);
                        return Err(ShellError::Io(format!("failed to check process status: {e}")));
                    }
                }
            }
            if let Some(status) = exited {
                if stdout.is_finished() && stderr.is_finished() {
                    break status;
                }
            }
            if start.elapsed() >= request.timeout {
                warn!(
                    command = %request.command,
                    timeout = ?request.timeout,
                    shell_exited = exited.is_some(),
                    "Killing timed out command"
                );
                kill_process(&mut child);
                // Readers are left detached: a background job may still hold the pipes.
                return Err(ShellError::TimedOut(request.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stdout = collect(stdout, "stdout")?;
        let stderr = collect(stderr, "stderr")?;
        let exit_code = status.code().unwrap_or(-1);
        debug!(command = %request.command, exit_code, elapsed = ?start.elapsed(), "Command finished");

        Ok(ShellOutput { exit_code, stdout, stderr })
    }
}
