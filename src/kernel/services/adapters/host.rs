//! Terminal-backed [`EditorHost`]: panels go to stdout, status lines to
//! stderr, URLs to the system browser (or stdout when printing is requested).

use std::io::Write;

use crate::kernel::services::ports::{EditorHost, HostError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    System,
    Print,
}

pub struct ConsoleHost<O: Write, E: Write> {
    out: O,
    err: E,
    browser: BrowserMode,
}

impl ConsoleHost<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(browser: BrowserMode) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), browser)
    }
}

impl<O: Write, E: Write> ConsoleHost<O, E> {
    pub fn new(out: O, err: E, browser: BrowserMode) -> Self {
        Self { out, err, browser }
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> EditorHost for ConsoleHost<O, E> {
    fn open_url(&mut self, url: &str) -> Result<(), HostError> {
        match self.browser {
            BrowserMode::System => webbrowser::open(url).map_err(|e| HostError(e.to_string())),
            BrowserMode::Print => {
                writeln!(self.out, "{url}").map_err(|e| HostError(e.to_string()))?;
                self.out.flush().map_err(|e| HostError(e.to_string()))
            }
        }
    }

    fn show_status(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "{message}") {
            tracing::debug!(error = %e, "status line unavailable");
        }
    }

    fn show_panel(&mut self, panel: &str, contents: &str) {
        tracing::debug!(panel, bytes = contents.len(), "showing output panel");
        let result = self
            .out
            .write_all(contents.as_bytes())
            .and_then(|()| {
                if contents.ends_with('\n') {
                    Ok(())
                } else {
                    self.out.write_all(b"\n")
                }
            })
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "write panel output failed");
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/host.rs"]
mod tests;
