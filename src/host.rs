//! Host display interfaces.
//!
//! The recognizer attaches to a terminal through these traits; the terminal
//! (or a test double) implements them. Two integration surfaces exist:
//!
//! - **Provider** registration: the host owns the scan loop and asks a
//!   [`LinkProvider`] for the links on each visible line, then dispatches
//!   pointer events back through it. Preferred when supported.
//! - **Legacy matcher** registration: the host takes the raw pattern, a click
//!   handler and a flat [`MatcherOptions`] value, and runs the matching
//!   itself. Kept for older hosts.
//!
//! All interaction is single-threaded and synchronous, driven by the host's
//! event loop; handlers are `Rc`-shared, not `Send`.

use std::rc::Rc;

use crossterm::event::MouseEvent;
use regex::Regex;

use crate::provider::{Link, ViewportRange};

/// Click handler: receives the triggering pointer event and the matched URL.
pub type ClickHandler = Rc<dyn Fn(&MouseEvent, &str)>;

/// Hover handler: additionally receives the link's display region.
pub type HoverHandler = Rc<dyn Fn(&MouseEvent, &str, ViewportRange)>;

/// Leave handler: receives the pointer event and the matched URL.
pub type LeaveHandler = Rc<dyn Fn(&MouseEvent, &str)>;

/// Identifier for a legacy matcher registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatcherId(pub u32);

/// Flat options for legacy matcher registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatcherOptions {
    /// Capture group the host extracts as the matched URL. Forced to the
    /// recognizer's URL group at registration; caller values are ignored.
    pub match_index: usize,
    /// Matcher ordering priority, higher runs first.
    pub priority: i32,
}

/// An owned registration that can be released exactly once.
///
/// Releasing more than once is a no-op, never an error.
pub trait Disposable {
    /// Release the registration.
    fn dispose(&mut self);
}

/// Per-line link source registered with a provider-capable host.
///
/// Implementations are stateless with respect to scanning: `provide_links`
/// is a pure function of the line, safe to call for any number of lines
/// within one render pass. The host computes render regions and invokes the
/// dispatch methods in response to pointer activity.
pub trait LinkProvider {
    /// Produce the links present on one visible line.
    fn provide_links(&self, row: usize, text: &str) -> Vec<Link>;

    /// A link was activated (e.g. clicked).
    fn activate(&self, event: &MouseEvent, link: &Link);

    /// The pointer entered a link's region.
    fn hover(&self, _event: &MouseEvent, _link: &Link) {}

    /// The pointer left a link's region.
    fn leave(&self, _event: &MouseEvent, _link: &Link) {}
}

/// The host display surface the recognizer attaches to.
pub trait TermHost {
    /// Capability probe: does this host support link providers?
    ///
    /// Defaults to `false`; hosts that only carry the legacy matcher API
    /// need not override it.
    fn supports_link_providers(&self) -> bool {
        false
    }

    /// Register a link provider. The returned handle releases the
    /// registration when disposed.
    fn register_link_provider(&mut self, provider: Rc<dyn LinkProvider>) -> Box<dyn Disposable>;

    /// Register a pattern with the legacy matcher API.
    fn register_link_matcher(
        &mut self,
        pattern: Regex,
        handler: ClickHandler,
        options: MatcherOptions,
    ) -> MatcherId;

    /// Deregister a legacy matcher by id.
    fn deregister_link_matcher(&mut self, id: MatcherId);
}
