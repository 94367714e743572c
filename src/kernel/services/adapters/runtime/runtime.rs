use super::message::AppMessage;
use super::process::run_request;
use crate::kernel::services::ports::CommandRequest;
use std::io;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;

/// Documentation commands are rare and short; one worker is plenty.
const COMMAND_WORKERS: usize = 1;
const WORKER_THREAD_NAME: &str = "gotodoc-worker";

/// Keeps the runtime's workers alive for as long as the session lives.
enum Driver {
    /// Multi-thread runtime; its own workers poll the tasks.
    Workers { _runtime: Runtime },
    /// Current-thread runtime parked in `block_on` on a dedicated thread.
    Parked {
        stop: Option<oneshot::Sender<()>>,
        thread: Option<JoinHandle<()>>,
    },
}

pub struct AsyncRuntime {
    handle: Handle,
    driver: Driver,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        match Builder::new_multi_thread()
            .worker_threads(COMMAND_WORKERS)
            .thread_name(WORKER_THREAD_NAME)
            .enable_all()
            .build()
        {
            Ok(runtime) => Ok(Self {
                handle: runtime.handle().clone(),
                driver: Driver::Workers { _runtime: runtime },
                tx,
            }),
            Err(e) => {
                tracing::error!(error = %e, "worker runtime unavailable, using current-thread");
                Self::current_thread(tx)
            }
        }
    }

    /// 单线程 runtime：spawn 出去的任务只在 `block_on` 期间被推进，
    /// 所以放到专用线程上一直 `block_on`，直到 drop 时发出停止信号
    pub(crate) fn current_thread(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                runtime.block_on(async {
                    let _ = stop_rx.await;
                });
            })?;
        Ok(Self {
            handle,
            driver: Driver::Parked {
                stop: Some(stop_tx),
                thread: Some(thread),
            },
            tx,
        })
    }

    /// The result is only ever delivered through the message channel.
    pub fn run_command(&self, request: CommandRequest) {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let id = request.id;
            let output = run_request(&request).await;
            tracing::debug!(
                id = id.0,
                status = ?output.status,
                bytes = output.text.len(),
                "documentation command finished"
            );
            if tx.send(AppMessage::CommandFinished { id, output }).is_err() {
                tracing::debug!(id = id.0, "session gone, dropping command result");
            }
        });
    }
}

impl Drop for AsyncRuntime {
    fn drop(&mut self) {
        match &mut self.driver {
            Driver::Workers { .. } => {}
            Driver::Parked { stop, thread } => {
                if let Some(stop) = stop.take() {
                    let _ = stop.send(());
                }
                if let Some(thread) = thread.take() {
                    if thread.join().is_err() {
                        tracing::error!("runtime driver thread panicked");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
