use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

/// Editor-side collaborators: browser, status line and output panels.
///
/// Every method is called from the session loop, never from a worker task.
pub trait EditorHost {
    fn open_url(&mut self, url: &str) -> Result<(), HostError>;

    /// Best-effort transient notification.
    fn show_status(&mut self, message: &str);

    fn show_panel(&mut self, panel: &str, contents: &str);
}
