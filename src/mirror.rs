//! History mirroring for legacy hosts
//!
//! On hosts where back/forward don't produce an observable fragment change,
//! the router persists every new fragment into a hidden same-origin frame.
//! Each rewrite of the frame's document becomes a history entry, so when the
//! user steps through history the frame's content changes and the router can
//! read the fragment back out of it.
//!
//! The router talks to the frame through [`HistoryMirror`]. Modern hosts get
//! [`NoopMirror`].

use crate::history::History;
use crate::trace_log;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Persistent store for the current fragment that survives history navigation
pub trait HistoryMirror: Send + Sync {
    /// Persist `fragment`. Implementations skip the write when the stored
    /// value is already equal.
    fn mirror_out(&self, fragment: &str);

    /// Read the stored fragment; empty when nothing is stored
    fn mirror_in(&self) -> String;

    /// Whether the backing surface exists yet
    fn is_ready(&self) -> bool {
        true
    }
}

/// Mirror for hosts that don't need one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMirror;

impl HistoryMirror for NoopMirror {
    fn mirror_out(&self, _fragment: &str) {}

    fn mirror_in(&self) -> String {
        String::new()
    }
}

/// Id of the element carrying the fragment inside the frame document
pub const PAYLOAD_ELEMENT_ID: &str = "hash";

/// Render the frame document holding `fragment`
pub fn render_document(fragment: &str) -> String {
    format!(
        "<html><body><div id=\"{}\">{}</div></body></html>",
        PAYLOAD_ELEMENT_ID,
        escape_text(fragment)
    )
}

/// Extract the fragment from a frame document; `None` when the payload
/// element is missing (a blank frame)
pub fn read_document(document: &str) -> Option<String> {
    let open = format!("<div id=\"{}\">", PAYLOAD_ELEMENT_ID);
    let start = document.find(&open)? + open.len();
    let len = document[start..].find("</div>")?;
    Some(unescape_text(&document[start..start + len]))
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_text(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

#[derive(Debug)]
struct FrameState {
    attached: bool,
    documents: History,
    rewrites: usize,
}

/// In-process model of the hidden history frame.
///
/// Starts detached (the frame is inserted once the host document is ready);
/// call [`attach`](FrameMirror::attach) to make it usable. Every rewrite
/// pushes a document onto the frame's own history, which
/// [`back`](FrameMirror::back) and [`forward`](FrameMirror::forward) step
/// through the way the browser's buttons would.
#[derive(Debug)]
pub struct FrameMirror {
    state: Mutex<FrameState>,
}

impl FrameMirror {
    /// Create a detached frame with a blank document
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrameState {
                attached: false,
                documents: History::default(),
                rewrites: 0,
            }),
        }
    }

    /// Create a frame that is already attached
    pub fn attached() -> Self {
        let frame = Self::new();
        frame.attach();
        frame
    }

    /// Mark the frame as inserted into the host document
    pub fn attach(&self) {
        trace_log!("History frame attached");
        self.lock().attached = true;
    }

    /// Current document markup
    pub fn document(&self) -> String {
        self.lock().documents.current().to_string()
    }

    /// Number of times the document has been rewritten
    pub fn rewrites(&self) -> usize {
        self.lock().rewrites
    }

    /// Step the frame's history back; returns false at the oldest entry
    pub fn back(&self) -> bool {
        self.lock().documents.back()
    }

    /// Step the frame's history forward; returns false at the newest entry
    pub fn forward(&self) -> bool {
        self.lock().documents.forward()
    }

    fn lock(&self) -> MutexGuard<'_, FrameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FrameMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryMirror for FrameMirror {
    fn mirror_out(&self, fragment: &str) {
        let mut state = self.lock();
        if !state.attached {
            return;
        }
        let stored = read_document(state.documents.current()).unwrap_or_default();
        if stored != fragment {
            trace_log!("Rewriting history frame with '{}'", fragment);
            state.documents.push(render_document(fragment));
            state.rewrites += 1;
        }
    }

    fn mirror_in(&self) -> String {
        let state = self.lock();
        if !state.attached {
            return String::new();
        }
        read_document(state.documents.current()).unwrap_or_default()
    }

    fn is_ready(&self) -> bool {
        self.lock().attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_markup() {
        assert_eq!(
            render_document("posts/1"),
            "<html><body><div id=\"hash\">posts/1</div></body></html>"
        );
        assert_eq!(read_document(&render_document("a<b>&c")).as_deref(), Some("a<b>&c"));
        assert_eq!(read_document(""), None);
    }

    #[test]
    fn test_noop_mirror() {
        let mirror = NoopMirror;
        mirror.mirror_out("anything");
        assert_eq!(mirror.mirror_in(), "");
        assert!(mirror.is_ready());
    }

    #[test]
    fn test_frame_detached_until_attach() {
        let frame = FrameMirror::new();
        assert!(!frame.is_ready());
        frame.mirror_out("a");
        assert_eq!(frame.rewrites(), 0);

        frame.attach();
        assert!(frame.is_ready());
        frame.mirror_out("a");
        assert_eq!(frame.mirror_in(), "a");
        assert_eq!(frame.rewrites(), 1);
    }

    #[test]
    fn test_frame_skips_unchanged_rewrite() {
        let frame = FrameMirror::attached();
        frame.mirror_out("a");
        frame.mirror_out("a");
        frame.mirror_out("b");
        assert_eq!(frame.rewrites(), 2);
    }

    #[test]
    fn test_frame_history_stepping() {
        let frame = FrameMirror::attached();
        frame.mirror_out("a");
        frame.mirror_out("b");

        assert!(frame.back());
        assert_eq!(frame.mirror_in(), "a");
        assert!(frame.back());
        assert_eq!(frame.mirror_in(), "");
        assert!(!frame.back());

        assert!(frame.forward());
        assert_eq!(frame.mirror_in(), "a");
    }
}
