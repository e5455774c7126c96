#![forbid(unsafe_code)]

//! Text input field and its editing model.
//!
//! [`TextInputState`] is the pure editing model: grapheme-cluster aware
//! cursor, insert, backspace, clear, max length and password reveal.
//! [`TextInput`] renders a labelled field around a value, with an optional
//! error message wired up through `aria-invalid` and `aria-describedby`.

use unicode_segmentation::UnicodeSegmentation;

use crate::Widget;
use crate::markup::{Attrs, Markup};

/// HTML input flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Tel,
    /// Multi-line `<textarea>`.
    TextArea,
}

impl InputKind {
    const fn type_attr(self) -> &'static str {
        match self {
            InputKind::Text | InputKind::TextArea => "text",
            InputKind::Email => "email",
            InputKind::Password => "password",
            InputKind::Tel => "tel",
        }
    }

    const fn autocomplete(self) -> Option<&'static str> {
        match self {
            InputKind::Email => Some("email"),
            InputKind::Password => Some("current-password"),
            InputKind::Tel => Some("tel"),
            InputKind::Text | InputKind::TextArea => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Editing model
// ---------------------------------------------------------------------------

/// Editable value with a grapheme cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputState {
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Maximum length in graphemes (None = unlimited).
    max_length: Option<usize>,
    multiline: bool,
    revealed: bool,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        let clipped = self.clip(&self.value).to_string();
        self.value = clipped;
        self.cursor = self.cursor.min(self.grapheme_count());
        self
    }

    /// Keep line breaks (for text areas).
    #[must_use]
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Replace the value; the cursor moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = self.sanitize(&value.into());
        self.value = self.clip(&value).to_string();
        self.cursor = self.grapheme_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Toggle password visibility; returns the new state.
    pub fn toggle_reveal(&mut self) -> bool {
        self.revealed = !self.revealed;
        self.revealed
    }

    /// Insert at the cursor, truncating to the remaining capacity.
    pub fn insert_text(&mut self, text: &str) {
        let clean = self.sanitize(text);
        if clean.is_empty() {
            return;
        }
        let before = self.grapheme_count();
        let avail = self.max_length.map_or(usize::MAX, |m| m.saturating_sub(before));
        let to_insert = match clean.grapheme_indices(true).nth(avail) {
            Some((end, _)) => &clean[..end],
            None => clean.as_str(),
        };
        if to_insert.is_empty() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert_str(at, to_insert);
        let after = self.grapheme_count();
        if self.max_length.is_some_and(|m| after > m) {
            // A combining mark merged across the boundary and still overflowed.
            self.value.drain(at..at + to_insert.len());
            return;
        }
        self.cursor = (self.cursor + after.saturating_sub(before)).min(after);
    }

    /// Delete the grapheme before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.drain(start..end);
        self.cursor -= 1;
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    fn sanitize(&self, text: &str) -> String {
        text.chars()
            .filter(|c| *c != '\r')
            .map(|c| match c {
                '\n' | '\t' if !self.multiline => ' ',
                c => c,
            })
            .filter(|c| (self.multiline && matches!(c, '\n' | '\t')) || !c.is_control())
            .collect()
    }

    fn clip<'s>(&self, text: &'s str) -> &'s str {
        match self.max_length {
            Some(max) => match text.grapheme_indices(true).nth(max) {
                Some((end, _)) => &text[..end],
                None => text,
            },
            None => text,
        }
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// Field widget
// ---------------------------------------------------------------------------

/// A labelled form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    name: String,
    label: String,
    kind: InputKind,
    placeholder: Option<String>,
    value: String,
    error: Option<String>,
    required: bool,
    disabled: bool,
    revealed: bool,
    max_length: Option<usize>,
}

impl TextInput {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: InputKind::Text,
            placeholder: None,
            value: String::new(),
            error: None,
            required: false,
            disabled: false,
            revealed: false,
            max_length: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Take value, reveal flag and max length from an editing model.
    #[must_use]
    pub fn state(mut self, state: &TextInputState) -> Self {
        self.value = state.value().to_string();
        self.revealed = state.is_revealed();
        self.max_length = state.max_length();
        self
    }

    #[must_use]
    pub fn error(mut self, error: Option<impl Into<String>>) -> Self {
        self.error = error.map(Into::into);
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn id(&self) -> String {
        format!("bb-input-{}", self.name)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    fn type_attr(&self) -> &'static str {
        if self.kind == InputKind::Password && self.revealed {
            "text"
        } else {
            self.kind.type_attr()
        }
    }
}

impl Widget for TextInput {
    fn render(&self, out: &mut Markup) {
        let id = self.id();
        let error_id = format!("{id}-error");
        let field_class = if self.has_error() {
            "bb-field bb-field--error"
        } else {
            "bb-field"
        };
        let max_length = self.max_length.map(|m| m.to_string());

        out.open("div", &Attrs::new().class(field_class));
        out.element(
            "label",
            &Attrs::new().class("bb-field__label").attr("for", id.as_str()),
            &self.label,
        );

        let attrs = Attrs::new()
            .attr("id", id.as_str())
            .attr("name", self.name.as_str())
            .class("bb-input")
            .opt("placeholder", self.placeholder.as_deref())
            .opt("maxlength", max_length.as_deref())
            .flag("required", self.required)
            .flag("disabled", self.disabled)
            .opt("aria-invalid", self.has_error().then_some("true"))
            .opt(
                "aria-describedby",
                self.has_error().then_some(error_id.as_str()),
            );

        if self.kind == InputKind::TextArea {
            out.open("textarea", &attrs.attr("rows", "4"))
                .text(&self.value)
                .close("textarea");
        } else {
            let attrs = attrs
                .attr("type", self.type_attr())
                .opt("autocomplete", self.kind.autocomplete())
                .attr("value", self.value.as_str());
            out.void("input", &attrs);
        }

        if let Some(error) = &self.error {
            out.element(
                "p",
                &Attrs::new()
                    .attr("id", error_id.as_str())
                    .class("bb-field__error")
                    .attr("role", "alert"),
                error,
            );
        }
        out.close("div");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_and_backspace_by_grapheme() {
        let mut state = TextInputState::new();
        state.insert_text("Ana");
        state.insert_text("e\u{301}");
        assert_eq!(state.grapheme_count(), 4);
        assert!(state.backspace());
        assert_eq!(state.value(), "Ana");
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn insert_at_cursor() {
        let mut state = TextInputState::new().with_value("ac");
        state.move_left();
        state.insert_text("b");
        assert_eq!(state.value(), "abc");
        assert_eq!(state.cursor(), 2);
        state.move_home();
        assert!(!state.backspace());
        state.move_end();
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn max_length_truncates_insert() {
        let mut state = TextInputState::new().with_max_length(5);
        state.insert_text("abcdefgh");
        assert_eq!(state.value(), "abcde");
        state.insert_text("z");
        assert_eq!(state.value(), "abcde");
    }

    #[test]
    fn single_line_flattens_newlines() {
        let mut state = TextInputState::new();
        state.insert_text("a\nb\tc\u{7}");
        assert_eq!(state.value(), "a b c");
    }

    #[test]
    fn multiline_keeps_newlines() {
        let mut state = TextInputState::new().multiline(true);
        state.insert_text("linha 1\r\nlinha 2");
        assert_eq!(state.value(), "linha 1\nlinha 2");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut state = TextInputState::new().with_value("abc");
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn password_reveal_switches_type() {
        let mut state = TextInputState::new().with_value("segredo");
        let hidden = TextInput::new("password", "Senha")
            .kind(InputKind::Password)
            .state(&state)
            .to_html();
        assert!(hidden.contains(r#"type="password""#));
        assert!(state.toggle_reveal());
        let shown = TextInput::new("password", "Senha")
            .kind(InputKind::Password)
            .state(&state)
            .to_html();
        assert!(shown.contains(r#"type="text""#));
    }

    #[test]
    fn error_wires_aria() {
        let html = TextInput::new("email", "E-mail")
            .kind(InputKind::Email)
            .required(true)
            .error(Some("E-mail inválido"))
            .to_html();
        assert!(html.starts_with(r#"<div class="bb-field bb-field--error">"#));
        assert!(html.contains(r#"aria-invalid="true""#));
        assert!(html.contains(r#"aria-describedby="bb-input-email-error""#));
        assert!(html.contains(
            r#"<p id="bb-input-email-error" class="bb-field__error" role="alert">E-mail inválido</p>"#
        ));
    }

    #[test]
    fn clean_field_markup() {
        let html = TextInput::new("name", "Nome").value("Ana").to_html();
        assert_eq!(
            html,
            concat!(
                r#"<div class="bb-field">"#,
                r#"<label class="bb-field__label" for="bb-input-name">Nome</label>"#,
                r#"<input id="bb-input-name" name="name" class="bb-input" type="text" value="Ana">"#,
                "</div>"
            )
        );
    }

    #[test]
    fn textarea_renders_value_as_content() {
        let html = TextInput::new("message", "Mensagem")
            .kind(InputKind::TextArea)
            .value("Olá")
            .to_html();
        assert!(html.contains(r#"rows="4">Olá</textarea>"#));
    }
}
