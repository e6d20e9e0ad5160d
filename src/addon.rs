//! Link recognizer lifecycle.
//!
//! [`WebLinksAddon`] binds the composite pattern and the user-supplied
//! handlers to a host display and manages the registration's lifetime:
//!
//! - `Idle → Active` on [`activate`](WebLinksAddon::activate), selecting the
//!   integration mode exactly once from the host capability probe.
//! - `Active → Disposed` on [`dispose`](WebLinksAddon::dispose); disposal is
//!   idempotent and safe before activation.
//!
//! The integration mode is stored as a tagged registration value, never
//! re-probed after activation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{ClickHandler, Disposable, MatcherId, MatcherOptions, TermHost};
use crate::pattern::{self, UrlPattern, URL_MATCH_GROUP};
use crate::provider::{ProviderCallbacks, WebLinkProvider};

/// Options supplied at construction; the relevant shape depends on the
/// integration mode.
///
/// A shape that does not match the selected mode is a caller contract
/// violation, not an error: the mismatched value is ignored and defaults are
/// used instead.
#[derive(Debug, Clone)]
pub enum LinkOptions {
    /// Flat options for legacy matcher mode.
    Matcher(MatcherOptions),
    /// Hover/leave callbacks for provider mode.
    Provider(ProviderCallbacks),
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self::Matcher(MatcherOptions::default())
    }
}

impl LinkOptions {
    fn matcher_options(&self) -> MatcherOptions {
        match self {
            Self::Matcher(options) => *options,
            Self::Provider(_) => MatcherOptions::default(),
        }
    }

    fn provider_callbacks(&self) -> ProviderCallbacks {
        match self {
            Self::Provider(callbacks) => callbacks.clone(),
            Self::Matcher(_) => ProviderCallbacks::default(),
        }
    }
}

/// The registration retained while active. Tagged by integration mode;
/// selected once at activation.
enum Registration {
    /// Provider-mode handle, released by disposing it.
    Provider(Box<dyn Disposable>),
    /// Legacy matcher id, released by deregistering it from the host.
    Matcher(MatcherId),
}

enum State {
    Idle,
    Active {
        term: Rc<RefCell<dyn TermHost>>,
        registration: Registration,
    },
    Disposed,
}

/// Web link recognizer addon for a terminal host.
///
/// Construct with [`new`](Self::new), configure with the builder methods,
/// then [`activate`](Self::activate) against a host. Exactly one
/// registration is held per activated instance and released exactly once.
///
/// # Example
///
/// ```ignore
/// use termlinks::{LinkOptions, ProviderCallbacks, WebLinksAddon};
///
/// let mut addon = WebLinksAddon::new()
///     .with_options(LinkOptions::Provider(ProviderCallbacks::default()))
///     .with_link_provider(true);
/// addon.activate(term.clone());
/// // ... host drives scanning and dispatch ...
/// addon.dispose();
/// ```
pub struct WebLinksAddon {
    handler: ClickHandler,
    options: LinkOptions,
    use_link_provider: bool,
    state: State,
}

impl WebLinksAddon {
    /// Create an addon with the default click handler
    /// ([`open_link`](crate::opener::open_link)), default options and legacy
    /// matcher mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler: Rc::new(crate::opener::open_link),
            options: LinkOptions::default(),
            use_link_provider: false,
            state: State::Idle,
        }
    }

    /// Replace the click handler.
    #[must_use]
    pub fn with_handler(mut self, handler: ClickHandler) -> Self {
        self.handler = handler;
        self
    }

    /// Set the options value. Its shape should match the selected mode.
    #[must_use]
    pub fn with_options(mut self, options: LinkOptions) -> Self {
        self.options = options;
        self
    }

    /// Request provider-mode integration. Falls back to the legacy matcher
    /// if the host does not support providers.
    #[must_use]
    pub fn with_link_provider(mut self, use_link_provider: bool) -> Self {
        self.use_link_provider = use_link_provider;
        self
    }

    /// Whether the addon holds an active registration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Whether the addon has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        matches!(self.state, State::Disposed)
    }

    /// Attach the recognizer to a host display.
    ///
    /// Selects the integration mode once: provider mode when requested and
    /// the capability probe reports support, the legacy matcher otherwise.
    /// Intended to be called exactly once per instance; calls on an already
    /// active or disposed addon are ignored.
    pub fn activate(&mut self, term: Rc<RefCell<dyn TermHost>>) {
        if !matches!(self.state, State::Idle) {
            return;
        }

        let use_provider = self.use_link_provider && term.borrow().supports_link_providers();
        let registration = if use_provider {
            let provider = WebLinkProvider::new(
                UrlPattern::strict(),
                self.handler.clone(),
                self.options.provider_callbacks(),
            );
            let handle = term.borrow_mut().register_link_provider(Rc::new(provider));
            Registration::Provider(handle)
        } else {
            // The capture group layout is an internal contract: force the
            // match index on a copy, leaving the caller's options untouched.
            let options = MatcherOptions {
                match_index: URL_MATCH_GROUP,
                ..self.options.matcher_options()
            };
            let id = term.borrow_mut().register_link_matcher(
                pattern::compiled().clone(),
                self.handler.clone(),
                options,
            );
            Registration::Matcher(id)
        };

        self.state = State::Active { term, registration };
    }

    /// Release the registration.
    ///
    /// Idempotent: safe before [`activate`](Self::activate) and safe to call
    /// repeatedly; only the first call after activation performs teardown.
    pub fn dispose(&mut self) {
        match std::mem::replace(&mut self.state, State::Disposed) {
            State::Active { term, registration } => match registration {
                Registration::Matcher(id) => term.borrow_mut().deregister_link_matcher(id),
                Registration::Provider(mut handle) => handle.dispose(),
            },
            State::Idle | State::Disposed => {}
        }
    }
}

impl Default for WebLinksAddon {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WebLinksAddon {
    fn drop(&mut self) {
        self.dispose();
    }
}
