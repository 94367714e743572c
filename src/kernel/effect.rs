use crate::kernel::services::ports::CommandRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenUrl(String),
    RunCommand(CommandRequest),
    ShowPanel { panel: &'static str },
    ShowStatus(String),
}
