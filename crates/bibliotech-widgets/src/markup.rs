#![forbid(unsafe_code)]

//! Append-only HTML buffer.
//!
//! All text and attribute values pass through `v_htmlescape`; only
//! [`Markup::raw`] bypasses escaping and is reserved for markup produced by
//! another widget.
//!
//! # Invariants
//!
//! - Attribute order is insertion order, so output is deterministic.
//! - Boolean attributes render as the bare name (`disabled`).
//! - Void elements are never closed.

use std::borrow::Cow;
use std::fmt::Write as _;

use v_htmlescape::escape;

/// Ordered attribute list for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs<'a> {
    entries: Vec<(&'a str, Option<Cow<'a, str>>)>,
}

impl<'a> Attrs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `class="..."`; skipped when empty.
    #[must_use]
    pub fn class(self, value: impl Into<Cow<'a, str>>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        self.attr("class", value)
    }

    /// `style="..."`; skipped when empty.
    #[must_use]
    pub fn style(self, value: impl Into<Cow<'a, str>>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        self.attr("style", value)
    }

    #[must_use]
    pub fn attr(mut self, name: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        self.entries.push((name, Some(value.into())));
        self
    }

    /// Add `name="value"` only when `value` is `Some`.
    #[must_use]
    pub fn opt(self, name: &'a str, value: Option<impl Into<Cow<'a, str>>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Bare boolean attribute, added only when `on`.
    #[must_use]
    pub fn flag(mut self, name: &'a str, on: bool) -> Self {
        if on {
            self.entries.push((name, None));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// HTML output buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Escaped text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{}", escape(text));
        self
    }

    /// Trusted markup, appended verbatim.
    pub fn raw(&mut self, html: &str) -> &mut Self {
        self.buf.push_str(html);
        self
    }

    /// `<tag attrs...>`
    pub fn open(&mut self, tag: &str, attrs: &Attrs<'_>) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.write_attrs(attrs);
        self.buf.push('>');
        self
    }

    /// `</tag>`
    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Void element such as `<input ...>`.
    pub fn void(&mut self, tag: &str, attrs: &Attrs<'_>) -> &mut Self {
        self.open(tag, attrs)
    }

    /// `<tag attrs>text</tag>`
    pub fn element(&mut self, tag: &str, attrs: &Attrs<'_>, text: &str) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    /// Render a child widget into this buffer.
    pub fn child(&mut self, widget: &(impl crate::Widget + ?Sized)) -> &mut Self {
        widget.render(self);
        self
    }

    fn write_attrs(&mut self, attrs: &Attrs<'_>) {
        for (name, value) in &attrs.entries {
            self.buf.push(' ');
            self.buf.push_str(name);
            if let Some(value) = value {
                let _ = write!(self.buf, "=\"{}\"", escape(value));
            }
        }
    }
}

impl std::fmt::Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}
