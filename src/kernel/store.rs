use super::docs::LookupSpec;
use super::error::LookupError;
use super::lookup::{build_url, decorate_query, evaluate_output, CommandVerdict, Query};
use super::panel::PANEL_NAME;
use super::scope::resolve;
use super::state::PendingCommand;
use super::{Action, AppState, Effect};
use crate::kernel::services::ports::{CommandOutput, CommandRequest, RequestId};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            state_changed: false,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Lookup(query) => self.lookup(query),
            Action::CommandFinished { id, output } => self.command_finished(id, output),
            Action::BrowserOpenFailed { url, error } => {
                tracing::warn!(url = %url, error = %error, "open url failed");
                self.report(LookupError::BrowserOpen(error))
            }
            Action::ReloadSettings(settings) => {
                self.state.apply_settings(&settings);
                tracing::info!(scopes = self.state.docs.len(), "settings reloaded");
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::HidePanel => {
                let changed = self.state.panel_visible;
                self.state.panel_visible = false;
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: changed,
                }
            }
            Action::ClearStatus => DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.status.take().is_some(),
            },
        }
    }

    fn lookup(&mut self, query: Query) -> DispatchResult {
        if query.text.is_empty() {
            tracing::debug!("empty selection, nothing to look up");
            return DispatchResult::unchanged();
        }

        let scope = query.scope_token().to_string();
        let config = &self.state.config;
        let Some(spec) = resolve(&scope, &self.state.docs, &config.fallback_scope) else {
            return self.report(LookupError::ScopeNotFound { scope });
        };

        match spec {
            LookupSpec::Disabled => self.report(LookupError::ScopeDisabled { scope }),
            LookupSpec::Url(url) => {
                match build_url(url, &query.text, &scope, &config.prefix, &config.suffix) {
                    Ok(url) => {
                        tracing::info!(scope = %scope, url = %url, "opening documentation url");
                        DispatchResult::effect(Effect::OpenUrl(url))
                    }
                    Err(e) => self.report(e.into()),
                }
            }
            LookupSpec::Command(cmd) => {
                let decorated = decorate_query(&query.text, &config.prefix, &config.suffix);
                let argv = match cmd.render_argv(&decorated, &scope) {
                    Ok(argv) => argv,
                    Err(e) => return self.report(e.into()),
                };
                let pending = PendingCommand {
                    spec: cmd.clone(),
                    query: query.text,
                    scope,
                };
                let request = CommandRequest {
                    id: RequestId(0),
                    argv,
                    working_dir: pending.spec.working_dir.clone(),
                    fallback_encoding: config.fallback_encoding.clone(),
                };

                let id = self.state.issue_request();
                tracing::info!(id = id.0, argv = ?request.argv, "running documentation command");
                self.state.pending.insert(id, pending);
                DispatchResult {
                    effects: vec![Effect::RunCommand(CommandRequest { id, ..request })],
                    state_changed: true,
                }
            }
        }
    }

    fn command_finished(&mut self, id: RequestId, output: CommandOutput) -> DispatchResult {
        let Some(pending) = self.state.pending.remove(&id) else {
            tracing::warn!(id = id.0, "completion for unknown command request");
            return DispatchResult::unchanged();
        };

        if !output.success() {
            tracing::debug!(id = id.0, status = ?output.status, "documentation command failed");
        }

        if self.state.config.sequence_panel_writes && self.state.is_stale(id) {
            tracing::debug!(id = id.0, "dropping stale command result");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: true,
            };
        }

        match evaluate_output(&pending.spec, &output.text) {
            CommandVerdict::Display(text) => {
                self.state.panel.replace(&text);
                self.state.panel_visible = true;
                DispatchResult {
                    effects: vec![Effect::ShowPanel { panel: PANEL_NAME }],
                    state_changed: true,
                }
            }
            CommandVerdict::NoDocs => {
                let Some(fallback) = &pending.spec.fallback_url else {
                    return self.report(LookupError::NoDocsFound);
                };
                let config = &self.state.config;
                match build_url(
                    fallback,
                    &pending.query,
                    &pending.scope,
                    &config.prefix,
                    &config.suffix,
                ) {
                    Ok(url) => {
                        tracing::info!(id = id.0, url = %url, "no local docs, opening fallback url");
                        DispatchResult {
                            effects: vec![Effect::OpenUrl(url)],
                            state_changed: true,
                        }
                    }
                    Err(e) => self.report(e.into()),
                }
            }
        }
    }

    fn report(&mut self, error: LookupError) -> DispatchResult {
        let message = error.to_string();
        tracing::info!("Goto Documentation: {message}");
        self.state.status = Some(message.clone());
        DispatchResult {
            effects: vec![Effect::ShowStatus(message)],
            state_changed: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
