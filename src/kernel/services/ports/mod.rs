//! Service ports: traits + data contracts.

pub mod host;
pub mod process;
pub mod settings;

pub use host::{EditorHost, HostError};
pub use process::{CommandOutput, CommandRequest, CommandStatus, RequestId};
pub use settings::{
    CommandEntry, DocEntry, Settings, DEFAULT_FALLBACK_ENCODING, DEFAULT_FALLBACK_SCOPE,
};
