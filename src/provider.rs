//! Provider-mode link matcher.
//!
//! [`WebLinkProvider`] is the stateless per-line matcher handed to a
//! provider-capable host: it wraps the compiled pattern, the click handler
//! and the optional hover/leave callbacks. The host drives it, calling
//! [`provide_links`](crate::host::LinkProvider::provide_links) for visible
//! lines and routing pointer events to the dispatch methods.

use crossterm::event::MouseEvent;

use crate::host::{ClickHandler, HoverHandler, LeaveHandler, LinkProvider};
use crate::pattern::UrlPattern;

/// A character cell position in the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos {
    /// Viewport row, as supplied by the host.
    pub row: usize,
    /// Character column within the row.
    pub col: usize,
}

impl CellPos {
    /// Create a cell position.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The display region a link occupies: start cell through end cell,
/// end column exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRange {
    /// First cell of the link.
    pub start: CellPos,
    /// One past the last cell of the link.
    pub end: CellPos,
}

/// One interactive link region on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The region the link occupies.
    pub range: ViewportRange,
    /// The matched URL text.
    pub text: String,
}

/// Optional hover/leave callback pair for provider mode.
///
/// Immutable once activation begins; absent callbacks are no-ops.
#[derive(Clone, Default)]
pub struct ProviderCallbacks {
    /// Invoked when the pointer enters a link's region.
    pub hover: Option<HoverHandler>,
    /// Invoked when the pointer leaves a link's region.
    pub leave: Option<LeaveHandler>,
}

impl std::fmt::Debug for ProviderCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCallbacks")
            .field("hover", &self.hover.as_ref().map(|_| ".."))
            .field("leave", &self.leave.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Stateless per-line URL matcher registered with a provider-capable host.
pub struct WebLinkProvider {
    pattern: UrlPattern,
    handler: ClickHandler,
    callbacks: ProviderCallbacks,
}

impl WebLinkProvider {
    /// Create a provider from a pattern, click handler and callbacks.
    #[must_use]
    pub fn new(pattern: UrlPattern, handler: ClickHandler, callbacks: ProviderCallbacks) -> Self {
        Self {
            pattern,
            handler,
            callbacks,
        }
    }
}

impl LinkProvider for WebLinkProvider {
    fn provide_links(&self, row: usize, text: &str) -> Vec<Link> {
        self.pattern
            .find_urls(text)
            .into_iter()
            .map(|m| {
                // Grid coordinates are character columns, not byte offsets.
                let start_col = text[..m.start].chars().count();
                let end_col = start_col + m.text.chars().count();
                Link {
                    range: ViewportRange {
                        start: CellPos::new(row, start_col),
                        end: CellPos::new(row, end_col),
                    },
                    text: m.text,
                }
            })
            .collect()
    }

    fn activate(&self, event: &MouseEvent, link: &Link) {
        (self.handler)(event, &link.text);
    }

    fn hover(&self, event: &MouseEvent, link: &Link) {
        if let Some(hover) = &self.callbacks.hover {
            hover(event, &link.text, link.range);
        }
    }

    fn leave(&self, event: &MouseEvent, link: &Link) {
        if let Some(leave) = &self.callbacks.leave {
            leave(event, &link.text);
        }
    }
}
