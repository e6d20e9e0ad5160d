//! termlinks
//!
//! Web link detection and activation for terminal emulators. The crate scans
//! rendered text-grid lines for strings that look like web addresses and
//! exposes them as interactive regions with hover, leave and click behavior.
//!
//! # Architecture
//!
//! - [`pattern`] assembles the composite URL regex from named clauses, with a
//!   stable capture group ([`URL_MATCH_GROUP`]) spanning the matched URL.
//! - [`url`] turns lines into [`UrlMatch`] spans; scanning is pure and
//!   re-entrant.
//! - [`host`] defines the traits a terminal implements to accept a
//!   registration, in both provider and legacy matcher flavors.
//! - [`provider`] is the stateless per-line matcher handed to
//!   provider-capable hosts.
//! - [`addon`] owns the activation/disposal lifecycle and guarantees the
//!   registration is released exactly once.
//! - [`opener`] is the default click behavior: launch the platform URL
//!   opener, degrade to a logged warning on refusal.
//!
//! The matcher is a plausibility heuristic tuned for terminal output, not an
//! RFC-3986 parser: schemes are required and lowercase, IP octets are not
//! range-validated, and boundary handling is aimed at prose punctuation.
//!
//! # Example
//!
//! ```ignore
//! use termlinks::WebLinksAddon;
//!
//! let mut addon = WebLinksAddon::new().with_link_provider(true);
//! addon.activate(term.clone()); // term: Rc<RefCell<dyn TermHost>>
//! // The host now scans visible lines through the registered provider.
//! addon.dispose();
//! ```

pub mod addon;
pub mod host;
pub mod opener;
pub mod pattern;
pub mod provider;
pub mod url;

pub use addon::{LinkOptions, WebLinksAddon};
pub use host::{
    ClickHandler, Disposable, HoverHandler, LeaveHandler, LinkProvider, MatcherId, MatcherOptions,
    TermHost,
};
pub use opener::open_link;
pub use pattern::{LinkError, UrlPattern, URL_MATCH_GROUP};
pub use provider::{CellPos, Link, ProviderCallbacks, ViewportRange, WebLinkProvider};
pub use url::{find_urls, url_at, UrlMatch};
