#![forbid(unsafe_code)]

//! Checkbox with an inline label.

use crate::Widget;
use crate::markup::{Attrs, Markup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    name: String,
    label: String,
    checked: bool,
    disabled: bool,
}

impl Checkbox {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            checked: false,
            disabled: false,
        }
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Flip the checked state. Disabled checkboxes do not change; returns
    /// whether the state changed.
    pub fn toggle(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.checked = !self.checked;
        true
    }
}

impl Widget for Checkbox {
    fn render(&self, out: &mut Markup) {
        let class = if self.disabled {
            "bb-checkbox is-disabled"
        } else {
            "bb-checkbox"
        };
        out.open("label", &Attrs::new().class(class));
        out.void(
            "input",
            &Attrs::new()
                .attr("type", "checkbox")
                .attr("name", self.name.as_str())
                .flag("checked", self.checked)
                .flag("disabled", self.disabled),
        );
        out.element("span", &Attrs::new(), &self.label);
        out.close("label");
    }
}
