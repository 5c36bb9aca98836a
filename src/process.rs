use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// One external command invocation.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Option<Duration>,
    pub env: Vec<(String, String)>,
}

/// Captured result of a finished command.
#[derive(Debug)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The most useful failure text: stderr, or stdout when stderr is empty.
    pub fn detail(&self) -> &str {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim()
        } else {
            err
        }
    }
}

/// Run a command to completion with stdin closed and output captured.
///
/// A non-zero exit is returned as output, not an error. Spawn failures and
/// timeouts are errors; on timeout the command's whole process group is
/// killed. Dropping the future kills the child.
pub async fn run_captured(config: ProcessConfig) -> Result<ProcessOutput> {
    let mut cmd = Command::new(&config.command);
    cmd.args(&config.args)
        .current_dir(&config.working_dir)
        .envs(config.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    let child = cmd
        .spawn()
        .map_err(|e| Error::Process(format!("failed to spawn '{}': {e}", config.command)))?;
    let pid = child.id();
    let finished = child.wait_with_output();

    let output = match config.timeout {
        None => finished.await?,
        Some(limit) => match tokio::time::timeout(limit, finished).await {
            Ok(result) => result?,
            Err(_) => {
                #[cfg(unix)]
                if let Some(pid) = pid {
                    unsafe {
                        libc::killpg(pid as i32, libc::SIGKILL);
                    }
                }
                return Err(Error::Process(format!(
                    "'{}' timed out after {limit:?}",
                    config.command
                )));
            }
        },
    };

    let result = ProcessOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(
        command = %config.command,
        args = ?config.args,
        exit_code = ?result.exit_code,
        "command finished"
    );
    Ok(result)
}
