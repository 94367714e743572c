use crate::kernel::lookup::Query;
use crate::kernel::services::ports::{CommandOutput, RequestId, Settings};

#[derive(Debug, Clone)]
pub enum Action {
    Lookup(Query),
    CommandFinished {
        id: RequestId,
        output: CommandOutput,
    },
    BrowserOpenFailed {
        url: String,
        error: String,
    },
    ReloadSettings(Settings),
    HidePanel,
    ClearStatus,
}
