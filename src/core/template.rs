use crate::core::encode::{escape_html, SafeText, SafeUrl};
use std::fmt;

/// Append-only HTML buffer.
///
/// Template text must be `&'static str`; everything else has to arrive as
/// [`SafeText`] or [`SafeUrl`], so record fields cannot be pushed raw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(text: &'static str) -> Self {
        Markup(text.to_string())
    }

    pub fn lit(mut self, text: &'static str) -> Self {
        self.0.push_str(text);
        self
    }

    pub fn text(mut self, value: &SafeText) -> Self {
        self.0.push_str(value.as_str());
        self
    }

    /// Attribute-encodes the URL; the browser decodes entities before using it.
    pub fn href(mut self, value: &SafeUrl) -> Self {
        self.0.push_str(escape_html(value.as_str()).as_str());
        self
    }

    pub fn markup(mut self, other: Markup) -> Self {
        self.0.push_str(&other.0);
        self
    }

    /// Appends `block` only when present; absent optional fields produce nothing.
    pub fn optional(self, block: Option<Markup>) -> Self {
        match block {
            Some(block) => self.markup(block),
            None => self,
        }
    }

    pub fn join<I>(parts: I, separator: &'static str) -> Markup
    where
        I: IntoIterator<Item = Markup>,
    {
        let mut out = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&part.0);
        }
        Markup(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
