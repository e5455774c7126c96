#![forbid(unsafe_code)]

//! DOM-independent half of the hydration layer.
//!
//! The static pages declare behavior in `data-*` attributes. This module
//! turns those attributes into engine inputs and keeps the per-page state
//! (counter group, header highlight), so all of it runs under native tests.
//! `wasm.rs` only reads attributes, measures elements and writes back.
//!
//! # Failure Modes
//!
//! - A counter element with a missing or malformed target is skipped; the
//!   caller logs the [`HydrateError`] and leaves the static text in place.
//! - Malformed tracker offsets fall back to [`TrackerConfig::default`] per
//!   field.

use std::time::Duration;

use bibliotech_core::{
    AnimationRequest, Easing, ElementBounds, FrameScheduler, LayoutProbe, PointerSample,
    ScrollHost, SectionTracker, TrackerConfig, VerticalSpan,
};
use bibliotech_style::{ColorGradient, Rgb, gradient_for_pointer};
use bibliotech_widgets::{CounterBinding, DEFAULT_COUNTER_DURATION};
use thiserror::Error;

pub const ATTR_COUNTER_TARGET: &str = "data-counter-target";
pub const ATTR_COUNTER_DURATION: &str = "data-counter-duration-ms";
pub const ATTR_COUNTER_DELAY: &str = "data-counter-delay-ms";
pub const ATTR_COUNTER_EASING: &str = "data-counter-easing";
pub const ATTR_COUNTER_SUFFIX: &str = "data-counter-suffix";
pub const ATTR_ACTIVATION_OFFSET: &str = "data-activation-offset";
pub const ATTR_HEADER_OFFSET: &str = "data-header-offset";
pub const ATTR_GRADIENT_STOPS: &str = "data-gradient-stops";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HydrateError {
    #[error("missing attribute {name}")]
    MissingAttribute { name: &'static str },
    #[error("invalid {name}: {value:?}")]
    InvalidAttribute { name: &'static str, value: String },
}

fn invalid(name: &'static str, value: &str) -> HydrateError {
    HydrateError::InvalidAttribute {
        name,
        value: value.to_string(),
    }
}

fn millis(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<Duration>, HydrateError> {
    get(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| invalid(name, &raw))
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// One counter element's run, read back from its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSpec {
    pub request: AnimationRequest,
    pub suffix: String,
}

impl CounterSpec {
    /// Only the target is required; other attributes default.
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Result<Self, HydrateError> {
        let raw_target = get(ATTR_COUNTER_TARGET).ok_or(HydrateError::MissingAttribute {
            name: ATTR_COUNTER_TARGET,
        })?;
        let target = raw_target
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(ATTR_COUNTER_TARGET, &raw_target))?;
        let duration = millis(&get, ATTR_COUNTER_DURATION)?.unwrap_or(DEFAULT_COUNTER_DURATION);
        let delay = millis(&get, ATTR_COUNTER_DELAY)?.unwrap_or_default();
        let easing = match get(ATTR_COUNTER_EASING) {
            Some(raw) => raw
                .parse::<Easing>()
                .map_err(|_| invalid(ATTR_COUNTER_EASING, &raw))?,
            None => Easing::default(),
        };
        Ok(Self {
            request: AnimationRequest::new(target, duration)
                .with_delay(delay)
                .with_easing(easing),
            suffix: get(ATTR_COUNTER_SUFFIX).unwrap_or_default(),
        })
    }
}

/// Whether an element spanning `span` overlaps a viewport `viewport_height` tall.
pub fn is_in_viewport(span: VerticalSpan, viewport_height: f64) -> bool {
    span.bottom > 0.0 && span.top < viewport_height
}

/// The counters of one page section, started together once.
pub struct CounterGroup<S: FrameScheduler + Clone + 'static> {
    scheduler: S,
    counters: Vec<(AnimationRequest, CounterBinding<S>)>,
    started: bool,
}

impl<S: FrameScheduler + Clone + 'static> CounterGroup<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            counters: Vec::new(),
            started: false,
        }
    }

    /// Register a counter; `sink` receives each formatted value.
    pub fn add(&mut self, spec: &CounterSpec, sink: impl Fn(&str) + 'static) {
        let binding = CounterBinding::new(self.scheduler.clone(), &spec.suffix, sink);
        self.counters.push((spec.request, binding));
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Start every counter the first time the group is seen. Later calls do
    /// nothing and return `false`.
    pub fn start_once(&mut self) -> bool {
        if self.started || self.counters.is_empty() {
            return false;
        }
        self.started = true;
        self.restart();
        true
    }

    /// Start (or restart from zero) every counter.
    pub fn restart(&mut self) {
        tracing::debug!(counters = self.counters.len(), "counter group started");
        for (request, binding) in &mut self.counters {
            binding.restart(*request);
        }
    }

    pub fn cancel(&mut self) {
        for (_, binding) in &mut self.counters {
            binding.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.counters.iter().any(|(_, b)| b.is_running())
    }

    pub fn values(&self) -> Vec<u64> {
        self.counters.iter().map(|(_, b)| b.value()).collect()
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Offsets from the header's data attributes.
pub fn tracker_config(get: impl Fn(&str) -> Option<String>) -> TrackerConfig {
    let defaults = TrackerConfig::default();
    let read = |name: &str, fallback: f64| {
        get(name)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(fallback)
    };
    TrackerConfig {
        activation_offset_px: read(ATTR_ACTIVATION_OFFSET, defaults.activation_offset_px),
        header_offset_px: read(ATTR_HEADER_OFFSET, defaults.header_offset_px),
    }
}

/// Header highlight state; reports only real changes so the DOM is touched
/// once per transition.
#[derive(Debug, Clone)]
pub struct HeaderSync {
    tracker: SectionTracker,
    rendered: Option<String>,
}

impl HeaderSync {
    pub fn new<I, T>(ids: I, config: TrackerConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tracker: SectionTracker::new(ids, config),
            rendered: None,
        }
    }

    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut SectionTracker {
        &mut self.tracker
    }

    /// Sample the layout; `Some(id)` when the highlight must move to `id`.
    pub fn on_scroll(&mut self, probe: &(impl LayoutProbe + ?Sized)) -> Option<String> {
        self.tracker.sample_layout(probe);
        self.take_change()
    }

    /// A nav link was clicked; `Some(id)` when the highlight must move.
    pub fn on_select(&mut self, id: &str) -> Option<String> {
        self.tracker.select(id);
        self.take_change()
    }

    /// Select `id` and smooth-scroll below the header.
    pub fn on_navigate(
        &mut self,
        id: &str,
        probe: &(impl LayoutProbe + ?Sized),
        host: &(impl ScrollHost + ?Sized),
    ) -> Option<String> {
        self.tracker.navigate(id, probe, host);
        self.take_change()
    }

    fn take_change(&mut self) -> Option<String> {
        let active = self.tracker.active_id();
        if active.is_empty() || self.rendered.as_deref() == Some(active) {
            return None;
        }
        let active = active.to_string();
        self.rendered = Some(active.clone());
        Some(active)
    }
}

// ---------------------------------------------------------------------------
// Gradient text
// ---------------------------------------------------------------------------

/// Parse `#rrggbb@pos;...` from `data-gradient-stops`.
pub fn parse_gradient_stops(raw: &str) -> Result<ColorGradient, HydrateError> {
    let stops = raw
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let (color, pos) = part
                .split_once('@')
                .ok_or_else(|| invalid(ATTR_GRADIENT_STOPS, raw))?;
            let color = color
                .parse::<Rgb>()
                .map_err(|_| invalid(ATTR_GRADIENT_STOPS, raw))?;
            let pos = pos
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(ATTR_GRADIENT_STOPS, raw))?;
            Ok((pos, color))
        })
        .collect::<Result<Vec<_>, HydrateError>>()?;
    if stops.is_empty() {
        return Err(invalid(ATTR_GRADIENT_STOPS, raw));
    }
    Ok(ColorGradient::new(stops))
}

/// `background-image` value for the current pointer state.
pub fn pointer_background_image(
    gradient: &ColorGradient,
    bounds: ElementBounds,
    pointer: PointerSample,
    hovering: bool,
) -> String {
    gradient_for_pointer(gradient, bounds, pointer, hovering).to_css()
}
