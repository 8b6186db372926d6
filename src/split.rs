//! Sender/content splitting for `"sender:\ncontent"` payloads.
//!
//! Group-chat payloads prefix the content with the sender's username and a
//! `":\n"` separator. Some payloads carry a machine-generated account tag in
//! the same position; [`strip_automated_prefix`] removes it so the remainder
//! parses as markup.

use regex::{Regex, RegexBuilder};

use crate::error::{DecodeError, Result};
use crate::message::Derived;

/// Separator between sender and content.
pub const SENDER_SEPARATOR: &str = ":\n";

/// Compiled automated-sender patterns. The default matches nothing.
#[derive(Debug, Clone, Default)]
pub struct PrefixPatterns {
    patterns: Vec<Regex>,
}

impl PrefixPatterns {
    /// Compiles each pattern case-insensitively.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| DecodeError::invalid_format("prefix pattern", e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns `true` if any pattern matches `prefix`.
    pub fn matches(&self, prefix: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(prefix))
    }
}

/// Removes a leading automated-sender line (`"wxid_xxx:\n"`).
///
/// The text before the first separator is trimmed and tested against
/// `patterns`; on a match, it and the separator are dropped. Otherwise the
/// input is returned unchanged.
///
/// ```rust
/// use wxdecode::split::{PrefixPatterns, strip_automated_prefix};
///
/// let patterns = PrefixPatterns::compile(&["^(wxid_|wx_)"])?;
/// assert_eq!(strip_automated_prefix("wxid_abc123:\n<msg/>", &patterns), "<msg/>");
/// assert_eq!(strip_automated_prefix("alice:\n<msg/>", &patterns), "alice:\n<msg/>");
/// # Ok::<(), wxdecode::DecodeError>(())
/// ```
pub fn strip_automated_prefix<'a>(text: &'a str, patterns: &PrefixPatterns) -> &'a str {
    match text.split_once(SENDER_SEPARATOR) {
        Some((prefix, rest)) if patterns.matches(prefix.trim()) => rest,
        _ => text,
    }
}

/// Splits a raw field into sender and content.
///
/// With a separator, the sender is the trimmed text before it (or
/// `fallback_sender` when that is empty) and the content is everything after
/// it with leading whitespace removed. Without one, the whole field is
/// content from `fallback_sender`.
///
/// ```rust
/// use wxdecode::split::split_sender_content;
///
/// let derived = split_sender_content("alice:\nhello", "bob");
/// assert_eq!((derived.sender.as_str(), derived.content.as_str()), ("alice", "hello"));
///
/// let derived = split_sender_content("no separator here", "bob");
/// assert_eq!((derived.sender.as_str(), derived.content.as_str()), ("bob", "no separator here"));
/// ```
pub fn split_sender_content(raw: &str, fallback_sender: &str) -> Derived {
    match raw.split_once(SENDER_SEPARATOR) {
        Some((sender, content)) => {
            let sender = sender.trim();
            Derived::new(
                if sender.is_empty() { fallback_sender } else { sender },
                content.trim_start(),
            )
        }
        None => Derived::new(fallback_sender, raw),
    }
}
