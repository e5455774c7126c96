#![forbid(unsafe_code)]

//! Modal entrance and exit transitions.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use bibliotech_widgets::{ModalAnimationConfig, ModalAnimationPhase, ModalAnimationState};
//!
//! let config = ModalAnimationConfig::default();
//! let mut state = ModalAnimationState::new();
//! state.start_opening();
//! state.tick(Duration::from_millis(500), &config);
//! assert_eq!(state.phase(), ModalAnimationPhase::Open);
//! ```
//!
//! # Invariants
//!
//! - Progress is always in [0.0, 1.0]
//! - Scale is always in [min_scale, 1.0]
//! - Toggling mid-transition reverses in place (30% into closing becomes
//!   70% into opening)
//!
//! # Failure Modes
//!
//! - Zero durations complete on the next tick
//! - A non-finite `min_scale` is treated as 1.0

use std::time::Duration;

use bibliotech_core::Easing;

/// Lifecycle phase.
///
/// State machine: Closed → Opening → Open → Closing → Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalAnimationPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl ModalAnimationPhase {
    /// Whether the modal should be rendered at all.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Transition timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalAnimationConfig {
    pub entrance_duration: Duration,
    pub exit_duration: Duration,
    pub easing: Easing,
    /// Content scale at the start of the entrance, in (0, 1].
    pub min_scale: f64,
}

impl Default for ModalAnimationConfig {
    fn default() -> Self {
        Self {
            entrance_duration: Duration::from_millis(200),
            exit_duration: Duration::from_millis(150),
            easing: Easing::EaseOut,
            min_scale: 0.95,
        }
    }
}

impl ModalAnimationConfig {
    /// Instant transitions, for `prefers-reduced-motion`.
    pub fn reduced_motion() -> Self {
        Self {
            entrance_duration: Duration::ZERO,
            exit_duration: Duration::ZERO,
            easing: Easing::Linear,
            min_scale: 1.0,
        }
    }

    #[must_use]
    pub fn entrance_duration(mut self, duration: Duration) -> Self {
        self.entrance_duration = duration;
        self
    }

    #[must_use]
    pub fn exit_duration(mut self, duration: Duration) -> Self {
        self.exit_duration = duration;
        self
    }

    #[must_use]
    pub fn min_scale(mut self, scale: f64) -> Self {
        self.min_scale = scale;
        self
    }

    fn clamped_min_scale(&self) -> f64 {
        if self.min_scale.is_finite() {
            self.min_scale.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Current transition state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModalAnimationState {
    phase: ModalAnimationPhase,
    /// Progress through the current transition.
    progress: f64,
}

impl ModalAnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully open, no transition pending.
    pub fn open() -> Self {
        Self {
            phase: ModalAnimationPhase::Open,
            progress: 1.0,
        }
    }

    pub fn phase(&self) -> ModalAnimationPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    /// No-op if already opening or open; reverses a closing transition.
    pub fn start_opening(&mut self) {
        match self.phase {
            ModalAnimationPhase::Closed => {
                self.phase = ModalAnimationPhase::Opening;
                self.progress = 0.0;
            }
            ModalAnimationPhase::Closing => {
                self.phase = ModalAnimationPhase::Opening;
                self.progress = 1.0 - self.progress;
            }
            ModalAnimationPhase::Opening | ModalAnimationPhase::Open => {}
        }
    }

    /// No-op if already closing or closed; reverses an opening transition.
    pub fn start_closing(&mut self) {
        match self.phase {
            ModalAnimationPhase::Open => {
                self.phase = ModalAnimationPhase::Closing;
                self.progress = 0.0;
            }
            ModalAnimationPhase::Opening => {
                self.phase = ModalAnimationPhase::Closing;
                self.progress = 1.0 - self.progress;
            }
            ModalAnimationPhase::Closing | ModalAnimationPhase::Closed => {}
        }
    }

    /// Open if closed or closing, otherwise close.
    pub fn toggle(&mut self) {
        match self.phase {
            ModalAnimationPhase::Closed | ModalAnimationPhase::Closing => self.start_opening(),
            ModalAnimationPhase::Opening | ModalAnimationPhase::Open => self.start_closing(),
        }
    }

    /// Advance by `delta`. Returns `true` when the phase changed.
    pub fn tick(&mut self, delta: Duration, config: &ModalAnimationConfig) -> bool {
        let duration = match self.phase {
            ModalAnimationPhase::Opening => config.entrance_duration,
            ModalAnimationPhase::Closing => config.exit_duration,
            ModalAnimationPhase::Open | ModalAnimationPhase::Closed => return false,
        };
        if duration.is_zero() {
            self.progress = 1.0;
        } else {
            self.progress = (self.progress + delta.as_secs_f64() / duration.as_secs_f64()).min(1.0);
        }
        if self.progress < 1.0 {
            return false;
        }
        (self.phase, self.progress) = match self.phase {
            ModalAnimationPhase::Opening => (ModalAnimationPhase::Open, 1.0),
            _ => (ModalAnimationPhase::Closed, 0.0),
        };
        true
    }

    /// How "present" the modal is: 0 closed, 1 open.
    pub fn presence(&self, config: &ModalAnimationConfig) -> f64 {
        match self.phase {
            ModalAnimationPhase::Opening => config.easing.apply(self.progress),
            ModalAnimationPhase::Closing => 1.0 - config.easing.apply(self.progress),
            ModalAnimationPhase::Open => 1.0,
            ModalAnimationPhase::Closed => 0.0,
        }
    }

    /// Content scale in `[min_scale, 1]`.
    pub fn scale(&self, config: &ModalAnimationConfig) -> f64 {
        let min = config.clamped_min_scale();
        (min + (1.0 - min) * self.presence(config)).clamp(min, 1.0)
    }

    /// Content and backdrop opacity in `[0, 1]`.
    pub fn opacity(&self, config: &ModalAnimationConfig) -> f64 {
        self.presence(config)
    }
}
