use std::path::PathBuf;

/// Identifies one command lookup. Issued in increasing order per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub id: RequestId,
    pub argv: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub fallback_encoding: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// `None` when the process was terminated by a signal.
    Exited(Option<i32>),
    SpawnFailed,
}

/// Decoded, merged stdout+stderr of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub status: CommandStatus,
}

impl CommandOutput {
    pub fn exited(text: impl Into<String>, code: Option<i32>) -> Self {
        Self {
            text: text.into(),
            status: CommandStatus::Exited(code),
        }
    }

    pub fn spawn_failed(error: impl Into<String>) -> Self {
        Self {
            text: error.into(),
            status: CommandStatus::SpawnFailed,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.status, CommandStatus::Exited(Some(0)))
    }
}
