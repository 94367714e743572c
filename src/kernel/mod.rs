//! Headless lookup core (state/action/effect).

pub mod action;
pub mod docs;
pub mod effect;
pub mod error;
pub mod lookup;
pub mod panel;
pub mod scope;
pub mod services;
pub mod state;
pub mod store;
pub mod template;

pub use action::Action;
pub use docs::{CommandSpec, FailPattern, LookupSpec, OutputRewrite, ScopeMap, UrlSpec};
pub use effect::Effect;
pub use error::LookupError;
pub use lookup::{build_url, evaluate_output, CommandVerdict, Query};
pub use panel::{OutputPanel, PANEL_NAME};
pub use scope::{extract_scope, resolve};
pub use state::{AppState, LookupConfig};
pub use store::{DispatchResult, Store};
pub use template::TemplateError;
