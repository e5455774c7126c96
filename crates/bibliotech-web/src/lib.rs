#![forbid(unsafe_code)]

//! Browser hydration for the static Bibliotech pages.
//!
//! The pages rendered by `bibliotech-site` carry their behavior in `data-*`
//! attributes. [`hydrate`] (wasm only) finds those elements and attaches:
//!
//! - counters animated through `requestAnimationFrame`, started once the
//!   stats band scrolls into view;
//! - the header section tracker with smooth anchor scrolling;
//! - pointer-following gradient text.
//!
//! Everything that does not touch the DOM lives in [`hydrate_core`] and is
//! tested natively.

pub mod hydrate_core;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomLayoutProbe, Hydration, RafScheduler, WindowScrollHost, hydrate};
