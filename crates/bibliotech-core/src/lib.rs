#![forbid(unsafe_code)]

//! Core: counter animation, easing, cancellation, and scroll-section tracking.
//!
//! # Role in Bibliotech
//! `bibliotech-core` holds the behavior that the landing page runs in the
//! browser: the number counters in the stats band and the header's
//! active-section highlight. Everything here is host driven and single
//! threaded. The host supplies frame callbacks, scroll notifications and
//! layout measurements through small traits; the core never touches a DOM.
//!
//! # Primary responsibilities
//! - **Easing**: the three curves the counters use ([`animation::Easing`]).
//! - **Counter engine**: [`animation::start_animation`] drives one run per
//!   request and returns a [`cancellation::CancelHandle`].
//! - **Scheduling**: the [`animation::FrameScheduler`] seam plus a
//!   deterministic [`animation::ManualScheduler`] for native hosts and tests.
//! - **Scroll tracking**: [`scroll::SectionTracker`] and
//!   [`scroll::scroll_to_anchor`].
//!
//! # How it fits in the system
//! `bibliotech-widgets` binds counters to markup, `bibliotech-web` implements
//! the host traits over `web-sys`, and `bibliotech-site` configures both.

pub mod animation;
pub mod cancellation;
pub mod geometry;
pub mod scroll;

pub use animation::{
    AnimationRequest, AnimationState, CounterRun, CounterSample, Easing, FrameCallback,
    FrameScheduler, FrameToken, ManualScheduler, TimerCallback, start_animation,
};
pub use cancellation::CancelHandle;
pub use geometry::{ElementBounds, PointerSample, VerticalSpan};
pub use scroll::{
    LayoutProbe, ScrollHost, SectionAnchor, SectionTracker, TrackerConfig, TrackerState,
    compute_active_section, scroll_to_anchor,
};
