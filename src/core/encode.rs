//! Safe-value encoders.
//!
//! [`SafeText`] and [`SafeUrl`] can only be produced here, and the markup
//! builder only accepts these two types for dynamic content.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Value placed in an `href` when a link is rejected.
pub const FALLBACK_HREF: &str = "#";

pub const DEFAULT_ORIGIN: &str = "http://localhost";

static DISALLOWED_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(javascript|data|vbscript|file):").expect("scheme pattern is valid")
});

static DEFAULT_VALIDATOR: LazyLock<UrlValidator> = LazyLock::new(UrlValidator::default);

/// Text that is safe inside an HTML text node or a double-quoted attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeText(String);

impl SafeText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An `http`/`https` URL, a same-origin relative reference, or `"#"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeUrl(String);

impl SafeUrl {
    fn fallback() -> Self {
        SafeUrl(FALLBACK_HREF.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_HREF
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces `& < > " '` with entities. Pure text to text, nothing is decoded first.
pub fn escape_html(text: &str) -> SafeText {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    SafeText(output)
}

/// Allow-list check for link targets.
///
/// Relative references are resolved against `origin` the way a browser
/// resolves an `href`; only `http` and `https` survive. Input that cannot be
/// parsed at all is passed through as a relative path unless it starts with
/// a denied scheme prefix.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    origin: Url,
}

impl UrlValidator {
    pub fn new(origin: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            origin: Url::parse(origin)?,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn validate(&self, input: Option<&str>) -> SafeUrl {
        let raw = match input {
            Some(raw) if !raw.is_empty() => raw,
            _ => return SafeUrl::fallback(),
        };

        match Url::options().base_url(Some(&self.origin)).parse(raw) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => SafeUrl(raw.to_string()),
                scheme => {
                    tracing::debug!(scheme, "Rejected link with disallowed scheme");
                    SafeUrl::fallback()
                }
            },
            Err(e) => {
                if has_disallowed_scheme_prefix(raw) {
                    tracing::debug!(error = %e, "Rejected unparseable link with denied prefix");
                    SafeUrl::fallback()
                } else {
                    SafeUrl(raw.to_string())
                }
            }
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN).expect("default origin is a valid URL")
    }
}

/// [`UrlValidator::validate`] against [`DEFAULT_ORIGIN`].
pub fn validate_url(input: Option<&str>) -> SafeUrl {
    DEFAULT_VALIDATOR.validate(input)
}

// Browsers strip leading whitespace/C0 controls and drop tab/newline anywhere
// in a scheme, so "\u{1} java\tscript:" still executes. Normalize the same way.
fn has_disallowed_scheme_prefix(raw: &str) -> bool {
    let normalized: String = raw
        .trim_start_matches(|c: char| c.is_whitespace() || c.is_control())
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    DISALLOWED_SCHEME.is_match(&normalized)
}
