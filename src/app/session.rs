//! 会话：把 kernel 的 effect 落到宿主上，并在调用方的循环里回收异步结果

use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::services::ports::{EditorHost, Settings};
use crate::kernel::{Action, AppState, Effect, Query, Store};
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

const MAX_MESSAGE_DRAIN_PER_TICK: usize = 256;

pub struct Session<H: EditorHost> {
    store: Store,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    host: H,
}

impl<H: EditorHost> Session<H> {
    pub fn new(settings: &Settings, host: H) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;
        Ok(Self {
            store: Store::new(AppState::new(settings)),
            runtime,
            rx,
            host,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn pending_commands(&self) -> usize {
        self.store.state().pending_commands()
    }

    pub fn lookup(&mut self, text: &str, scope: &str) -> bool {
        self.dispatch(Action::Lookup(Query::new(text, scope)))
    }

    pub fn reload_settings(&mut self, settings: Settings) -> bool {
        self.dispatch(Action::ReloadSettings(settings))
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        let mut changed = result.state_changed;
        for effect in result.effects {
            changed |= self.run_effect(effect);
        }
        changed
    }

    fn run_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::OpenUrl(url) => match self.host.open_url(&url) {
                Ok(()) => false,
                Err(e) => self.dispatch(Action::BrowserOpenFailed {
                    url,
                    error: e.to_string(),
                }),
            },
            Effect::RunCommand(request) => {
                self.runtime.run_command(request);
                false
            }
            Effect::ShowPanel { panel } => {
                let contents = self.store.state().panel.text();
                self.host.show_panel(panel, contents);
                false
            }
            Effect::ShowStatus(message) => {
                self.host.show_status(&message);
                false
            }
        }
    }

    /// Applies finished commands without blocking (called from the host loop).
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGE_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("runtime message channel disconnected");
                    break;
                }
            }
        }
        changed
    }

    /// Blocks until no command is in flight or `timeout` elapses. Returns
    /// `false` on timeout. A timeout too large for `Instant` means no deadline.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        while self.pending_commands() > 0 {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return false;
                    }
                    match self.rx.recv_timeout(remaining) {
                        Ok(msg) => Ok(msg),
                        Err(RecvTimeoutError::Timeout) => return false,
                        Err(RecvTimeoutError::Disconnected) => Err(()),
                    }
                }
                None => self.rx.recv().map_err(|_| ()),
            };
            match received {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(()) => {
                    tracing::error!("runtime message channel disconnected");
                    return false;
                }
            }
        }
        true
    }

    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::CommandFinished { id, output } => {
                self.dispatch(Action::CommandFinished { id, output })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/session.rs"]
mod tests;
