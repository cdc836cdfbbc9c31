//! The conversation view and the collaborators the sync loop talks to.

mod markup;
mod message_list;
pub mod terminal;

use askama::Template;
use tracing::warn;

pub use message_list::{ChatView, MessageList};

/// One unit appended to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Server-rendered message markup, appended verbatim.
    Messages(String),
    /// An error paragraph. Never carries a message id.
    Error(String),
}

impl Fragment {
    pub fn to_html(&self) -> String {
        match self {
            Fragment::Messages(html) => html.clone(),
            Fragment::Error(text) => match (ErrorFragmentTemplate { text: text.as_str() }).render() {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to render error fragment: {e}");
                    r#"<p class="text-danger"></p>"#.to_string()
                }
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Fragment::Error(_))
    }
}

/// Displays fragments. Only ever asked to append.
pub trait Renderer: Send {
    fn render(&mut self, fragment: &Fragment);
}

/// The message input box.
pub trait InputControl: Send {
    fn set_enabled(&mut self, enabled: bool);
    fn clear(&mut self);
    fn value(&self) -> String;
}

/// Full-page navigation, used when the server redirects conversation creation.
pub trait Navigator: Send {
    fn navigate(&mut self, url: &str);
}

#[derive(Template)]
#[template(source = r#"<p class="text-danger">{{ text }}</p>"#, ext = "html")]
struct ErrorFragmentTemplate<'a> {
    text: &'a str,
}
