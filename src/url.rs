//! URL match model and per-line scanning.
//!
//! Scanning is a pure function of the input line: it holds no state, is safe
//! to call re-entrantly from a render pass, and produces immutable
//! [`UrlMatch`] values that the caller consumes and discards. The absence of
//! a match is an ordinary empty result, never an error.

use regex::Regex;

use crate::pattern;

/// One recognized URL occurrence on a line.
///
/// Offsets are byte offsets into the scanned line; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    /// Start byte offset of the URL.
    pub start: usize,
    /// End byte offset of the URL (exclusive).
    pub end: usize,
    /// The matched URL text.
    pub text: String,
}

impl UrlMatch {
    /// Check if a byte offset falls within this match.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Length of the match in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the match is empty. Never true for matches produced by
    /// [`find_urls`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find all URLs on a line, left to right.
///
/// Matches never overlap. Scanning resumes at the end of each URL rather
/// than the end of the boundary-inclusive match, so two URLs separated by a
/// single boundary character are both found.
#[must_use]
pub fn find_urls(line: &str) -> Vec<UrlMatch> {
    scan(pattern::compiled(), pattern::URL_MATCH_GROUP, line)
}

/// Find the URL covering a byte offset, if any.
///
/// Intended for pointer hit-testing against a rendered line.
#[must_use]
pub fn url_at(line: &str, offset: usize) -> Option<UrlMatch> {
    find_urls(line).into_iter().find(|m| m.contains(offset))
}

/// Scan a line with the given pattern, extracting URLs from `match_group`.
pub(crate) fn scan(regex: &Regex, match_group: usize, line: &str) -> Vec<UrlMatch> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos <= line.len() {
        let Some(caps) = regex.captures_at(line, pos) else {
            break;
        };
        let Some(url) = caps.get(match_group) else {
            break;
        };

        let trimmed = trim_trailing_punctuation(url.as_str());
        if !trimmed.is_empty() {
            matches.push(UrlMatch {
                start: url.start(),
                end: url.start() + trimmed.len(),
                text: trimmed.to_string(),
            });
        }

        // Resume at the end of the URL itself so the right-boundary run of
        // this match can serve as the left boundary of the next one.
        if url.end() > pos {
            pos = url.end();
        } else {
            pos += line[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    matches
}

/// Strip trailing punctuation that is almost certainly prose, not URL.
///
/// The right-boundary clause admits one trailing punctuation character into
/// the path capture; this cleans the match boundary. Closing brackets are
/// kept when the match balances them, so query strings like `?q=(rust)`
/// stay intact. Brackets cannot occur in a path capture at all; the path
/// character set excludes them.
fn trim_trailing_punctuation(text: &str) -> &str {
    const TRAILING: &[char] = &['.', ',', ':', ';', '?', '!', ')', ']', '}', '>', '\'', '"'];

    let mut result = text;
    while let Some(last) = result.chars().last() {
        if !TRAILING.contains(&last) {
            break;
        }
        if last == ')' && result.matches('(').count() >= result.matches(')').count() {
            break;
        }
        if last == ']' && result.matches('[').count() >= result.matches(']').count() {
            break;
        }
        if last == '}' && result.matches('{').count() >= result.matches('}').count() {
            break;
        }
        result = &result[..result.len() - last.len_utf8()];
    }
    result
}
