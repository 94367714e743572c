use super::*;
use crate::kernel::docs::{CommandSpec, FailPattern, OutputRewrite, UrlSpec};
use crate::kernel::services::ports::{DocEntry, Settings};
use pretty_assertions::assert_eq;

const PHP_SCOPE: &str = "text.html.basic source.php.embedded.block.html support.function.php";

fn new_store() -> Store {
    Store::new(AppState::default())
}

fn store_with(settings: Settings) -> Store {
    Store::new(AppState::new(&settings))
}

fn lookup(store: &mut Store, text: &str, scope: &str) -> DispatchResult {
    store.dispatch(Action::Lookup(Query::new(text, scope)))
}

fn take_request(result: &DispatchResult) -> CommandRequest {
    match result.effects.as_slice() {
        [Effect::RunCommand(request)] => request.clone(),
        other => panic!("expected a single RunCommand effect, got {other:?}"),
    }
}

fn with_command(store: &mut Store, scope: &str, spec: CommandSpec) {
    store
        .state
        .docs
        .insert(scope.to_string(), LookupSpec::Command(spec));
}

fn echo_spec() -> CommandSpec {
    CommandSpec {
        command: vec!["doc".to_string(), "%(query)s".to_string()],
        fail_pattern: FailPattern::new("NOT FOUND").unwrap(),
        fallback_url: None,
        output_rewrite: None,
        working_dir: None,
    }
}

#[test]
fn php_lookup_opens_manual_url() {
    let mut store = new_store();
    let result = lookup(&mut store, "strlen", PHP_SCOPE);

    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl(
            "http://php.net/manual-lookup.php?pattern=strlen".to_string()
        )]
    );
    assert!(!store.state().panel.is_created());
}

#[test]
fn prefix_and_suffix_wrap_query() {
    let settings = Settings {
        prefix: "std::".to_string(),
        suffix: "()".to_string(),
        ..Settings::default()
    };
    let mut store = store_with(settings);
    let result = lookup(&mut store, "move", "source.css");

    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl(
            "http://devdocs.io/#q=css+std::move()".to_string()
        )]
    );
}

#[test]
fn unknown_scope_uses_google_fallback() {
    let mut store = new_store();
    let result = lookup(&mut store, "frobnicate", "source.unknownlang");

    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl(
            "https://google.com/search?q=unknownlang+frobnicate".to_string()
        )]
    );
}

#[test]
fn unknown_scope_without_valid_fallback_reports_status() {
    let settings = Settings {
        fallback_scope: "nowhere".to_string(),
        ..Settings::default()
    };
    let mut store = store_with(settings);
    let result = lookup(&mut store, "frobnicate", "source.unknownlang");

    assert_eq!(
        result.effects,
        vec![Effect::ShowStatus(
            "No docs available for the current scope !".to_string()
        )]
    );
    assert_eq!(
        store.state().status.as_deref(),
        Some("No docs available for the current scope !")
    );
    assert!(!store.state().panel.is_created());
}

#[test]
fn disabled_scope_reports_status() {
    let mut settings = Settings::default();
    settings.docs.insert("css".to_string(), None);
    let mut store = store_with(settings);

    let result = lookup(&mut store, "color", "source.css");
    assert_eq!(
        result.effects,
        vec![Effect::ShowStatus("This scope is disabled !".to_string())]
    );
}

#[test]
fn bad_template_reports_status() {
    let mut settings = Settings::default();
    settings.docs.insert(
        "rust".to_string(),
        Some(DocEntry::Url("https://docs.rs/%(crate)s".to_string())),
    );
    let mut store = store_with(settings);

    let result = lookup(&mut store, "serde", "source.rust");
    assert_eq!(
        result.effects,
        vec![Effect::ShowStatus(
            "Invalid documentation template: unknown placeholder `%(crate)s`".to_string()
        )]
    );
}

#[test]
fn empty_selection_is_ignored() {
    let mut store = new_store();
    let result = lookup(&mut store, "", PHP_SCOPE);
    assert!(result.effects.is_empty());
    assert!(!result.state_changed);
}

#[test]
fn python_lookup_runs_pydoc() {
    let mut store = new_store();
    let result = lookup(&mut store, "os.path", "source.python");
    let request = take_request(&result);

    assert_eq!(request.argv, ["python", "-m", "pydoc", "os.path"]);
    assert_eq!(request.working_dir, None);
    assert_eq!(request.fallback_encoding, "windows-1252");
    assert_eq!(store.state().pending_commands(), 1);
}

#[test]
fn python_output_is_rewritten_into_panel() {
    let mut store = new_store();
    let request = take_request(&lookup(&mut store, "os.path", "source.python"));

    let output = "Help on module posixpath in os:\n\nRelated help topics: os\n";
    let result = store.dispatch(Action::CommandFinished {
        id: request.id,
        output: CommandOutput::exited(output, Some(0)),
    });

    assert_eq!(
        result.effects,
        vec![Effect::ShowPanel {
            panel: "gotodocumentation"
        }]
    );
    let panel = &store.state().panel;
    assert_eq!(
        panel.text(),
        "Help on module posixpath in os:\n\n-------\nRelated help topics: os\n"
    );
    assert!(panel.buffer().unwrap().is_read_only());
    assert!(store.state().panel_visible);
    assert_eq!(store.state().pending_commands(), 0);
}

#[test]
fn python_missing_docs_opens_fallback_once_without_panel_write() {
    let mut store = new_store();
    let request = take_request(&lookup(&mut store, "nosuch", "source.python"));

    let result = store.dispatch(Action::CommandFinished {
        id: request.id,
        output: CommandOutput::exited("no Python documentation found for 'nosuch'\n", Some(0)),
    });

    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl(
            "http://docs.python.org/3/search.html?q=nosuch".to_string()
        )]
    );
    assert_eq!(store.state().panel.writes(), 0);
}

#[test]
fn fallback_url_uses_decorated_query() {
    let settings = Settings {
        prefix: "p.".to_string(),
        ..Settings::default()
    };
    let mut store = store_with(settings);
    let request = take_request(&lookup(&mut store, "thing", "source.python"));
    assert_eq!(request.argv[3], "p.thing");

    let result = store.dispatch(Action::CommandFinished {
        id: request.id,
        output: CommandOutput::exited("no Python documentation found for 'p.thing'", Some(1)),
    });
    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl(
            "http://docs.python.org/3/search.html?q=p.thing".to_string()
        )]
    );
}

#[test]
fn missing_docs_without_fallback_reports_status() {
    let mut store = new_store();
    with_command(&mut store, "ruby", echo_spec());
    let request = take_request(&lookup(&mut store, "puts", "source.ruby"));

    let result = store.dispatch(Action::CommandFinished {
        id: request.id,
        output: CommandOutput::exited("NOT FOUND: puts", Some(1)),
    });

    assert_eq!(
        result.effects,
        vec![Effect::ShowStatus(
            "No docs available for the current word !".to_string()
        )]
    );
    assert!(!store.state().panel.is_created());
}

#[test]
fn spawn_failure_text_flows_through_fail_check() {
    let mut store = new_store();
    with_command(&mut store, "ruby", echo_spec());
    let request = take_request(&lookup(&mut store, "puts", "source.ruby"));

    store.dispatch(Action::CommandFinished {
        id: request.id,
        output: CommandOutput::spawn_failed("failed to run `doc`: No such file or directory"),
    });

    assert_eq!(
        store.state().panel.text(),
        "failed to run `doc`: No such file or directory"
    );
}

#[test]
fn blank_output_falls_back_like_no_docs() {
    let mut store = new_store();
    let mut spec = echo_spec();
    spec.fallback_url = Some(UrlSpec::new("http://ri/%(query)s"));
    with_command(&mut store, "ruby", spec);
    let request = take_request(&lookup(&mut store, "puts", "source.ruby"));

    let result = store.dispatch(Action::CommandFinished {
        id: request.id,
        output: CommandOutput::exited("", Some(0)),
    });
    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl("http://ri/puts".to_string())]
    );
}

#[test]
fn unknown_completion_is_ignored() {
    let mut store = new_store();
    let result = store.dispatch(Action::CommandFinished {
        id: RequestId(42),
        output: CommandOutput::exited("text", Some(0)),
    });
    assert!(result.effects.is_empty());
    assert!(!store.state().panel.is_created());
}

// Concurrent lookups race for the panel: whichever completion is applied last
// wins, even if it belongs to the older lookup.
#[test]
fn concurrent_results_are_last_writer_wins_by_default() {
    let mut store = new_store();
    with_command(&mut store, "ruby", echo_spec());
    let first = take_request(&lookup(&mut store, "old", "source.ruby"));
    let second = take_request(&lookup(&mut store, "new", "source.ruby"));
    assert!(first.id < second.id);

    store.dispatch(Action::CommandFinished {
        id: second.id,
        output: CommandOutput::exited("docs for new", Some(0)),
    });
    store.dispatch(Action::CommandFinished {
        id: first.id,
        output: CommandOutput::exited("docs for old", Some(0)),
    });

    assert_eq!(store.state().panel.text(), "docs for old");
    assert_eq!(store.state().panel.writes(), 2);
}

#[test]
fn sequencing_guard_drops_stale_results() {
    let settings = Settings {
        sequence_panel_writes: true,
        ..Settings::default()
    };
    let mut store = store_with(settings);
    with_command(&mut store, "ruby", echo_spec());
    let first = take_request(&lookup(&mut store, "old", "source.ruby"));
    let second = take_request(&lookup(&mut store, "new", "source.ruby"));

    store.dispatch(Action::CommandFinished {
        id: second.id,
        output: CommandOutput::exited("docs for new", Some(0)),
    });
    let stale = store.dispatch(Action::CommandFinished {
        id: first.id,
        output: CommandOutput::exited("docs for old", Some(0)),
    });

    assert!(stale.effects.is_empty());
    assert_eq!(store.state().panel.text(), "docs for new");
    assert_eq!(store.state().pending_commands(), 0);
}

#[test]
fn panel_buffer_is_reused_across_lookups() {
    let mut store = new_store();
    let mut spec = echo_spec();
    spec.output_rewrite = Some(OutputRewrite::new("^", ">> ").unwrap());
    with_command(&mut store, "ruby", spec);

    for word in ["one", "two"] {
        let request = take_request(&lookup(&mut store, word, "source.ruby"));
        store.dispatch(Action::CommandFinished {
            id: request.id,
            output: CommandOutput::exited(format!("docs for {word}"), Some(0)),
        });
    }

    assert_eq!(store.state().panel.text(), ">> docs for two");
    assert_eq!(store.state().panel.writes(), 2);
}

#[test]
fn browser_failure_reports_status() {
    let mut store = new_store();
    let result = store.dispatch(Action::BrowserOpenFailed {
        url: "http://php.net".to_string(),
        error: "no browser".to_string(),
    });
    assert_eq!(
        result.effects,
        vec![Effect::ShowStatus("Could not open browser: no browser".to_string())]
    );
}

#[test]
fn reload_settings_rebuilds_scope_map() {
    let mut store = new_store();
    let mut settings = Settings::default();
    settings.docs.insert(
        "rust".to_string(),
        Some(DocEntry::Url("https://docs.rs/%(query)s".to_string())),
    );

    let result = store.dispatch(Action::ReloadSettings(settings));
    assert!(result.state_changed);

    let result = lookup(&mut store, "serde", "source.rust");
    assert_eq!(
        result.effects,
        vec![Effect::OpenUrl("https://docs.rs/serde".to_string())]
    );
}

#[test]
fn clear_status_and_hide_panel() {
    let settings = Settings {
        fallback_scope: "nowhere".to_string(),
        ..Settings::default()
    };
    let mut store = store_with(settings);
    lookup(&mut store, "x", "source.unknownlang");

    assert!(store.dispatch(Action::ClearStatus).state_changed);
    assert!(!store.dispatch(Action::ClearStatus).state_changed);
    assert_eq!(store.state().status, None);
    assert!(!store.dispatch(Action::HidePanel).state_changed);
}
