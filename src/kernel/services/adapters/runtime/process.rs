use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use super::super::decode::{decode_output, normalize_newlines};
use crate::kernel::services::ports::{CommandOutput, CommandRequest};

const READ_CHUNK: usize = 8 * 1024;

/// Runs the request to completion. Spawn errors come back as output text so
/// they go through the same fail-pattern check as real output.
pub async fn run_request(request: &CommandRequest) -> CommandOutput {
    match capture_merged(&request.argv, request.working_dir.as_deref()).await {
        Ok((bytes, status)) => {
            let text = normalize_newlines(decode_output(&bytes, &request.fallback_encoding));
            CommandOutput::exited(text, status.code())
        }
        Err(e) => {
            let program = request.argv.first().map(String::as_str).unwrap_or("");
            tracing::warn!(program, error = %e, "spawn documentation command failed");
            CommandOutput::spawn_failed(format!("failed to run `{program}`: {e}"))
        }
    }
}

fn build_command(argv: &[String]) -> io::Result<Command> {
    let Some((program, args)) = argv.split_first() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };

    // cmd.exe resolves PATH/PATHEXT the way the user's shell does.
    #[cfg(windows)]
    let cmd = {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(program).args(args);
        cmd
    };

    #[cfg(not(windows))]
    let cmd = {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd
    };

    Ok(cmd)
}

/// stdout 与 stderr 合并为一个流（按到达顺序交错）
pub async fn capture_merged(
    argv: &[String],
    working_dir: Option<&Path>,
) -> io::Result<(Vec<u8>, ExitStatus)> {
    let mut cmd = build_command(argv)?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn()?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "stdout unavailable"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "stderr unavailable"))?;

    let mut merged = Vec::new();
    let mut out_buf = vec![0u8; READ_CHUNK];
    let mut err_buf = vec![0u8; READ_CHUNK];
    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        tokio::select! {
            read = stdout.read(&mut out_buf), if out_open => match read? {
                0 => out_open = false,
                n => merged.extend_from_slice(&out_buf[..n]),
            },
            read = stderr.read(&mut err_buf), if err_open => match read? {
                0 => err_open = false,
                n => merged.extend_from_slice(&err_buf[..n]),
            },
        }
    }

    let status = child.wait().await?;
    Ok((merged, status))
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/process.rs"]
mod tests;
