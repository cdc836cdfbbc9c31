//! Terminal versions of the view collaborators, used by the binary.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::{Fragment, InputControl, Navigator, Renderer};

static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(div|p|li|pre|h[1-6])>").expect("block pattern is valid")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid")
});

/// Converts a markup fragment into readable plain text.
pub fn to_plain_text(html: &str) -> String {
    let text = BLOCK_END.replace_all(html, "\n");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints each fragment as plain text. Errors are prefixed with `!`.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&mut self, fragment: &Fragment) {
        let text = match fragment {
            Fragment::Messages(html) => to_plain_text(html),
            Fragment::Error(text) => format!("! {text}"),
        };
        if text.is_empty() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

/// The current input line. Disabled while a submission is in flight.
#[derive(Debug, Default)]
pub struct LineInput {
    line: String,
    enabled: bool,
}

impl LineInput {
    pub fn new() -> Self {
        Self { line: String::new(), enabled: true }
    }

    /// Stores a typed line. Ignored while disabled.
    pub fn type_line(&mut self, line: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.line = line.trim_end_matches(['\r', '\n']).to_string();
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl InputControl for LineInput {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn clear(&mut self) {
        self.line.clear();
    }

    fn value(&self) -> String {
        self.line.clone()
    }
}

/// A terminal cannot follow a redirect, so the target is remembered and
/// shown to the user.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    target: Option<String>,
}

impl TerminalNavigator {
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, url: &str) {
        eprintln!("The agent asked to continue in a browser: open {url}");
        self.target = Some(url.to_string());
    }
}
