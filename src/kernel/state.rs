use rustc_hash::FxHashMap;

use super::docs::{CommandSpec, ScopeMap};
use super::panel::OutputPanel;
use crate::kernel::services::ports::{RequestId, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub prefix: String,
    pub suffix: String,
    pub fallback_scope: String,
    pub fallback_encoding: String,
    /// Drop command results older than the newest issued command lookup.
    pub sequence_panel_writes: bool,
}

impl LookupConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            prefix: settings.prefix.clone(),
            suffix: settings.suffix.clone(),
            fallback_scope: settings.fallback_scope.clone(),
            fallback_encoding: settings.fallback_encoding.clone(),
            sequence_panel_writes: settings.sequence_panel_writes,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// A command lookup waiting for its process to finish.
#[derive(Debug, Clone)]
pub struct PendingCommand {
    pub spec: CommandSpec,
    pub query: String,
    pub scope: String,
}

#[derive(Debug)]
pub struct AppState {
    pub config: LookupConfig,
    pub docs: ScopeMap,
    pub panel: OutputPanel,
    pub panel_visible: bool,
    pub status: Option<String>,
    pub pending: FxHashMap<RequestId, PendingCommand>,
    next_request: u64,
    latest_command: Option<RequestId>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            config: LookupConfig::from_settings(settings),
            docs: ScopeMap::from_settings(settings),
            panel: OutputPanel::new(),
            panel_visible: false,
            status: None,
            pending: FxHashMap::default(),
            next_request: 1,
            latest_command: None,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.config = LookupConfig::from_settings(settings);
        self.docs = ScopeMap::from_settings(settings);
    }

    pub fn issue_request(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.latest_command = Some(id);
        id
    }

    pub fn latest_command(&self) -> Option<RequestId> {
        self.latest_command
    }

    pub fn is_stale(&self, id: RequestId) -> bool {
        self.latest_command.is_some_and(|latest| id < latest)
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
