//! Composite URL pattern assembly.
//!
//! The recognizer pattern is built from named clauses (protocol, host, path,
//! query, fragment, boundaries) so each clause's semantics can be reviewed and
//! tested on its own. The clauses are immutable and composed purely by
//! concatenation and alternation; [`build`] returns the same composite pattern
//! on every call.
//!
//! # Capture group contract
//!
//! Exactly one capture group spans the whole matched URL: group
//! [`URL_MATCH_GROUP`]. The left boundary is a non-capturing group, so the URL
//! group is always group 1 regardless of how the inner clauses nest. Callers
//! extract match text through this group and never need to know the boundary
//! clause internals.
//!
//! # Matching semantics
//!
//! The pattern is a plausibility heuristic, not an RFC-3986 validator:
//!
//! - Schemes are matched lowercase only (`HTTP://` is not a link).
//! - The IP clause is syntactic; octet ranges are not validated, so
//!   `999.999.999.999` matches.
//! - The right boundary admits one trailing punctuation character into the
//!   path capture by construction; scanning strips it afterwards (see
//!   [`crate::url`]).

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that may appear in a domain name.
const DOMAIN_CHARACTER_SET: &str = r"[\da-z.-]";

/// Characters that may not appear in a domain name. A run of these forms the
/// left match boundary, preventing matches that start mid-token
/// (e.g. inside `foo.http://bar`).
const NEGATED_DOMAIN_CHARACTER_SET: &str = r"[^\da-z.-]";

/// Characters that may not appear in a URL path. A run of these forms the
/// right match boundary, so trailing prose punctuation is not swallowed.
const NEGATED_PATH_CHARACTER_SET: &str = r"[^/\w.\-%]";

/// Required scheme prefix. Bare-domain text is never matched.
const PROTOCOL_CLAUSE: &str = r"(https?://)";

/// Top-level domain: 2-6 characters of lowercase letters and dots.
const TLD_CLAUSE: &str = r"([a-z.]{2,6})";

/// Dotted-quad IP literal. Syntactic only; octets are not range-checked.
const IP_CLAUSE: &str = r"((\d{1,3}\.){3}\d{1,3})";

/// Literal localhost host.
const LOCALHOST_CLAUSE: &str = "(localhost)";

/// Optional port suffix on any host form.
const PORT_CLAUSE: &str = r"(:\d{1,5})";

/// Optional path: slash-led segments of path-safe characters, ending on one
/// character that is not whitespace, a colon, or a quote.
const PATH_CLAUSE: &str = r#"((/[/\w.\-%~:+@]*)*([^:"'\s]))?"#;

/// Broad character set shared by the query string and hash fragment clauses.
const QUERY_FRAGMENT_CHARACTER_SET: &str = r"[0-9\w\[\]()/?!#@$%&'*+,:;~=.\-]*";

/// Index of the capture group spanning the whole matched URL
/// (protocol + host + path + query + fragment).
pub const URL_MATCH_GROUP: usize = 1;

/// Build the composite URL pattern.
///
/// Pure: returns the identical pattern string on every call. Clauses are
/// joined in a fixed order: left boundary, protocol, host, path, query,
/// fragment, right boundary.
pub fn build() -> String {
    let domain_body = format!("({}+)", DOMAIN_CHARACTER_SET);
    let host = format!(
        "(({}\\.{})|{}|{}){}?",
        domain_body, TLD_CLAUSE, IP_CLAUSE, LOCALHOST_CLAUSE, PORT_CLAUSE
    );
    let query = format!("(\\?{})?", QUERY_FRAGMENT_CHARACTER_SET);
    let fragment = format!("(#{})?", QUERY_FRAGMENT_CHARACTER_SET);
    let start = format!("(?:^|{}+)", NEGATED_DOMAIN_CHARACTER_SET);
    let end = format!("($|{}+)", NEGATED_PATH_CHARACTER_SET);

    format!(
        "{}({}{}{}{}{}){}",
        start, PROTOCOL_CLAUSE, host, PATH_CLAUSE, query, fragment, end
    )
}

static COMPILED: Lazy<Regex> = Lazy::new(|| {
    // The composite pattern is a constant; compilation is covered by tests.
    Regex::new(&build()).expect("built-in URL pattern is valid")
});

/// Get the compiled composite pattern, shared across all scans.
pub fn compiled() -> &'static Regex {
    &COMPILED
}

/// Errors from the link recognizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// A custom pattern failed to compile.
    #[error("invalid link pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern string.
        pattern: String,
        /// Description of the error.
        reason: String,
    },
}

/// A compiled URL recognizer pattern.
///
/// Wraps a regex together with the capture group that delimits the URL inside
/// a match. The default recognizer uses the built-in composite pattern;
/// integrators can supply a stricter pattern without forking the crate.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    regex: Regex,
    match_group: usize,
}

impl UrlPattern {
    /// The built-in strict URL pattern.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            regex: compiled().clone(),
            match_group: URL_MATCH_GROUP,
        }
    }

    /// Compile a custom pattern.
    ///
    /// The whole match (group 0) is taken as the URL; use
    /// [`with_match_group`](Self::with_match_group) if the pattern wraps the
    /// URL in boundary clauses.
    ///
    /// Returns an error if the pattern is invalid regex.
    pub fn new(pattern: &str) -> Result<Self, LinkError> {
        let regex = Regex::new(pattern).map_err(|e| LinkError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            match_group: 0,
        })
    }

    /// Set the capture group that spans the URL inside a match.
    #[must_use]
    pub fn with_match_group(mut self, group: usize) -> Self {
        self.match_group = group;
        self
    }

    /// Get the underlying regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Get the pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Get the capture group index used to extract the URL.
    #[must_use]
    pub fn match_group(&self) -> usize {
        self.match_group
    }

    /// Find all URLs on a line. See [`crate::url::find_urls`].
    #[must_use]
    pub fn find_urls(&self, line: &str) -> Vec<crate::url::UrlMatch> {
        crate::url::scan(&self.regex, self.match_group, line)
    }
}

impl Default for UrlPattern {
    fn default() -> Self {
        Self::strict()
    }
}
