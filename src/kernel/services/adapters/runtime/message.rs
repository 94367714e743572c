use crate::kernel::services::ports::{CommandOutput, RequestId};

#[derive(Debug)]
pub enum AppMessage {
    CommandFinished { id: RequestId, output: CommandOutput },
}
