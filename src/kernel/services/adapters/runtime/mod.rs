//! Async runtime adapter: runs documentation commands and sends messages back to
//! the session loop.

mod message;
mod process;
mod runtime;

pub use message::AppMessage;
pub use process::{capture_merged, run_request};
pub use runtime::AsyncRuntime;
