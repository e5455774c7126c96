#![forbid(unsafe_code)]

//! Component kit for the Bibliotech site.
//!
//! Every component renders escaped HTML into a [`Markup`] buffer, with
//! `bb-` prefixed class names and inline styles computed by
//! `bibliotech-style`. Interactive behavior (counters, header highlight,
//! gradient text) is declared through `data-*` attributes and attached by
//! the `bibliotech-web` hydration layer.

pub mod badge;
pub mod button;
pub mod checkbox;
pub mod counter;
pub mod gradient_text;
pub mod input;
pub mod markup;
pub mod modal;
pub mod nav;
pub mod skeleton;

pub use badge::Badge;
pub use button::Button;
pub use checkbox::Checkbox;
pub use counter::{
    CounterBinding, CounterDisplay, DEFAULT_COUNTER_DURATION, format_counter, staggered_request,
};
pub use gradient_text::GradientText;
pub use input::{InputKind, TextInput, TextInputState};
pub use markup::{Attrs, Markup};
pub use modal::{
    Modal, ModalAnimationConfig, ModalAnimationPhase, ModalAnimationState, ModalEvent,
};
pub use nav::{NavBar, NavItem};
pub use skeleton::{Skeleton, SkeletonShape};

/// A renderable component.
pub trait Widget {
    /// Append this component's HTML to `out`.
    fn render(&self, out: &mut Markup);

    /// Render into a fresh string.
    fn to_html(&self) -> String {
        let mut out = Markup::new();
        self.render(&mut out);
        out.into_string()
    }
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render(&self, out: &mut Markup) {
        (**self).render(out);
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn render(&self, out: &mut Markup) {
        (**self).render(out);
    }
}
