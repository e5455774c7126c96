#![forbid(unsafe_code)]

//! Counter animation: easing curves, frame scheduling, and the counter engine.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use bibliotech_core::animation::{AnimationRequest, Easing, ManualScheduler, start_animation};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let scheduler = ManualScheduler::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let request = AnimationRequest::new(2330, Duration::from_millis(2000))
//!     .with_easing(Easing::EaseOut);
//! let _handle = start_animation(&scheduler, request, move |v| sink.borrow_mut().push(v));
//!
//! scheduler.run_frame();                            // t = 0ms, run starts
//! scheduler.step(Duration::from_millis(1000));      // t = 1000ms
//! assert_eq!(*seen.borrow(), vec![0, 2038]);
//! ```
//!
//! # Invariants
//!
//! 1. Every easing maps `[0, 1]` onto `[0, 1]`, is monotonic non-decreasing,
//!    and fixes both endpoints.
//! 2. Emitted values within one run never decrease and never exceed the
//!    target.
//! 3. The last emitted value of a completed run is exactly the target.
//!
//! # Failure Modes
//!
//! - Zero duration: the first frame completes the run.
//! - Progress outside `[0, 1]` (clock skew): clamped before easing.

mod counter;
mod scheduler;

pub use counter::{AnimationRequest, AnimationState, CounterRun, CounterSample, start_animation};
pub use scheduler::{FrameCallback, FrameScheduler, FrameToken, ManualScheduler, TimerCallback};

use std::fmt;
use std::str::FromStr;

/// Easing curve applied to normalized time progress.
///
/// ```
/// use bibliotech_core::animation::Easing;
///
/// assert_eq!(Easing::EaseOut.apply(0.5), 0.875);
/// assert_eq!(Easing::EaseInOut.apply(0.25), 0.125);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// No shaping: `p`.
    Linear,
    /// Cubic deceleration: `1 - (1-p)³`.
    #[default]
    EaseOut,
    /// Quadratic start, cubic finish: `2p²` below the midpoint, then
    /// `1 - (-2p+2)³ / 2`.
    EaseInOut,
}

impl Easing {
    /// All supported curves.
    pub const ALL: [Easing; 3] = [Easing::Linear, Easing::EaseOut, Easing::EaseInOut];

    /// Apply the curve to a progress value. `p` is clamped to `[0, 1]` first;
    /// NaN is treated as `0`.
    #[must_use]
    pub fn apply(self, p: f64) -> f64 {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        match self {
            Self::Linear => p,
            Self::EaseOut => {
                let inv = 1.0 - p;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    let inv = -2.0 * p + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }

    /// Stable kebab-case name, used in markup attributes and config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown easing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEasing(pub String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown easing {:?} (expected linear, ease-out or ease-in-out)",
            self.0
        )
    }
}

impl std::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Ok(Self::Linear),
            "ease-out" | "easeout" => Ok(Self::EaseOut),
            "ease-in-out" | "easeinout" => Ok(Self::EaseInOut),
            _ => Err(UnknownEasing(s.to_string())),
        }
    }
}
