use std::sync::Arc;

use tokio::sync::Mutex;

use super::markup::div_message_ids;
use super::{Fragment, Renderer};
use crate::sync::cursor;

/// Append-only record of everything rendered into the conversation view.
///
/// Message fragments contribute the raw `message_id` attribute of each
/// message they contain; error fragments contribute nothing.
#[derive(Debug, Default, Clone)]
pub struct MessageList {
    fragments: Vec<Fragment>,
    message_ids: Vec<String>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, fragment: Fragment) {
        if let Fragment::Messages(html) = &fragment {
            self.message_ids.extend(div_message_ids(html).into_iter().map(str::to_string));
        }
        self.fragments.push(fragment);
    }

    /// Raw id attributes in render order. May contain junk.
    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.message_ids.iter().map(String::as_str)
    }

    /// Highest well-formed message id rendered so far.
    pub fn max_rendered_id(&self) -> Option<u64> {
        cursor::max_valid_id(self.message_ids())
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

struct ViewInner {
    list: MessageList,
    renderer: Box<dyn Renderer>,
}

/// Shared handle to the conversation view. The poll loop and the submission
/// coordinator each hold a clone; the message list is only reachable through
/// the append methods and the cursor query.
#[derive(Clone)]
pub struct ChatView {
    inner: Arc<Mutex<ViewInner>>,
}

impl ChatView {
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self::with_list(renderer, MessageList::new())
    }

    /// A view that already shows `list`, e.g. a page rendered server-side.
    /// Nothing is re-rendered; the list only seeds the cursor.
    pub fn with_list(renderer: impl Renderer + 'static, list: MessageList) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewInner { list, renderer: Box::new(renderer) })),
        }
    }

    pub async fn append_messages(&self, html: impl Into<String>) {
        self.append(Fragment::Messages(html.into())).await;
    }

    pub async fn append_error(&self, text: impl Into<String>) {
        self.append(Fragment::Error(text.into())).await;
    }

    async fn append(&self, fragment: Fragment) {
        let mut inner = self.inner.lock().await;
        inner.renderer.render(&fragment);
        inner.list.append(fragment);
    }

    /// First message id not yet rendered.
    pub async fn next_cursor(&self) -> u64 {
        cursor::next_cursor(&self.inner.lock().await.list)
    }

    pub async fn snapshot(&self) -> MessageList {
        self.inner.lock().await.list.clone()
    }
}
