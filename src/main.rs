use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use gotodoc::app::Session;
use gotodoc::kernel::services::adapters::{
    ensure_settings_file, ensure_settings_file_at, load_settings, load_settings_from,
    BrowserMode, ConsoleHost,
};
use gotodoc::kernel::services::ports::Settings;
use gotodoc::kernel::ScopeMap;

mod logging;

/// Open documentation for a word, chosen by its syntax scope.
#[derive(Debug, Parser)]
#[command(name = "gotodoc", version)]
struct Cli {
    /// Settings file (defaults to `<cache dir>/.gotodoc/settings.json`).
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Print URLs instead of opening the browser.
    #[arg(long)]
    print_url: bool,

    /// List the scopes known after merging settings, then exit.
    #[arg(long, conflicts_with_all = ["init_settings"])]
    list_scopes: bool,

    /// Write a default settings file if none exists, then exit.
    #[arg(long)]
    init_settings: bool,

    /// Seconds to wait for a documentation command.
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    timeout: u64,

    /// Scope token (`php`) or full scope path (`source.php keyword.other.php`).
    #[arg(required_unless_present_any = ["list_scopes", "init_settings"])]
    scope: Option<String>,

    /// Word to look up; several words are joined with spaces.
    #[arg(required_unless_present_any = ["list_scopes", "init_settings"])]
    query: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logging = logging::init();

    if cli.init_settings {
        let path = match &cli.settings {
            Some(path) => {
                ensure_settings_file_at(path)
                    .with_context(|| format!("writing {}", path.display()))?;
                path.clone()
            }
            None => ensure_settings_file()?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    let settings = read_settings(cli.settings.as_ref())?;

    if cli.list_scopes {
        for scope in ScopeMap::from_settings(&settings).scopes() {
            println!("{scope}");
        }
        return Ok(());
    }

    let scope = cli.scope.unwrap_or_default();
    let query = cli.query.join(" ");
    let browser = if cli.print_url {
        BrowserMode::Print
    } else {
        BrowserMode::System
    };

    let mut session = Session::new(&settings, ConsoleHost::stdio(browser))
        .context("failed to start async runtime")?;
    session.lookup(&query, &scope);

    if !session.wait_idle(Duration::from_secs(cli.timeout)) {
        bail!(
            "documentation command did not finish within {}s",
            cli.timeout
        );
    }
    Ok(())
}

fn read_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };
    Ok(settings)
}
