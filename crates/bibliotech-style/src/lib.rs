#![forbid(unsafe_code)]

//! Style layer for the Bibliotech component kit.
//!
//! # Role in Bibliotech
//! `bibliotech-style` is the shared vocabulary for colors and component
//! styling. It computes style descriptors as plain values; it never renders.
//!
//! # This crate provides
//! - [`Rgb`] with WCAG contrast helpers.
//! - [`Theme`] with the brand palette as semantic slots.
//! - [`StyleDescriptor`], a mergeable property set serialized to inline CSS.
//! - [`style_for`] and [`badge_style`], pure functions of variant and size.
//! - [`InteractiveStyle`] for hover/focus/active/disabled/loading overlays.
//! - [`ColorGradient`], [`GradientSpec`] and [`gradient_for_pointer`].
//!
//! # How it fits in the system
//! `bibliotech-widgets` turns descriptors into `style` attributes and the
//! web crate recomputes pointer gradients on every pointer move.

/// Colors, CSS serialization and contrast.
pub mod color;
/// Mergeable style descriptors.
pub mod descriptor;
/// Color gradients and the pointer-following gradient.
pub mod gradient;
/// Interaction-state style overlays.
pub mod interactive;
/// Semantic color slots.
pub mod theme;
/// Variant and size keyed style functions.
pub mod variant;

pub use color::{ParseColorError, Rgb, best_text_color, contrast_ratio};
pub use descriptor::{Cursor, Paint, StyleDescriptor};
pub use gradient::{ColorGradient, GradientSpec, RESTING_ANGLE_DEG, gradient_for_pointer};
pub use interactive::{InteractionState, InteractiveStyle};
pub use theme::{Theme, ThemeBuilder};
pub use variant::{
    BadgeTone, ButtonSize, ButtonVariant, badge_style, style_for, style_for_theme,
};
