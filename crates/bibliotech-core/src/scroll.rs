#![forbid(unsafe_code)]

//! Active-section tracking and anchor navigation for the page header.
//!
//! The header highlights the navigation item for whichever page section is
//! under a fixed "activation point" below the top of the viewport. This
//! module computes that section from freshly measured anchor spans and
//! issues smooth-scroll requests when a navigation item is clicked.
//!
//! # Design
//!
//! - [`compute_active_section`] is the stateless containment test.
//! - [`SectionTracker`] owns the registered ids and the current
//!   [`TrackerState`]; each [`sample`](SectionTracker::sample) applies the
//!   containment test and keeps the previous id when nothing matches.
//! - [`LayoutProbe`] and [`ScrollHost`] are the host seams. Spans are
//!   measured on every sample because layout changes continuously while
//!   scrolling; nothing is cached between samples.
//!
//! # Invariants
//!
//! 1. [`SectionTracker::active_id`] is always a registered id (or empty when
//!    nothing is registered).
//! 2. When several spans contain the point, the earliest registered one wins.
//! 3. A sample with no containing span leaves the state unchanged.

use crate::geometry::VerticalSpan;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Offsets used by the tracker, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Distance from the viewport top to the activation point. A section is
    /// active when its span contains this point.
    pub activation_offset_px: f64,
    /// Height of the fixed header. Scroll targets land this far below the
    /// viewport top so the header does not cover the section heading.
    pub header_offset_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            activation_offset_px: 100.0,
            header_offset_px: 70.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// A named page region, measured at sample time.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnchor {
    /// Element id of the section.
    pub id: String,
    /// Top edge, viewport relative.
    pub top: f64,
    /// Bottom edge, viewport relative.
    pub bottom: f64,
}

impl SectionAnchor {
    /// Create an anchor.
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }

    /// Create an anchor from a measured span.
    pub fn from_span(id: impl Into<String>, span: VerticalSpan) -> Self {
        Self::new(id, span.top, span.bottom)
    }

    /// The anchor's vertical span.
    #[inline]
    pub fn span(&self) -> VerticalSpan {
        VerticalSpan::new(self.top, self.bottom)
    }
}

/// Return the first anchor whose span contains `point` (inclusive).
///
/// Returns `None` when no span contains the point, including when `point`
/// or the offsets are NaN.
#[must_use]
pub fn compute_active_section(anchors: &[SectionAnchor], point: f64) -> Option<&str> {
    anchors
        .iter()
        .find(|anchor| anchor.span().contains(point))
        .map(|anchor| anchor.id.as_str())
}

// ---------------------------------------------------------------------------
// Host seams
// ---------------------------------------------------------------------------

/// Measures page regions by id.
pub trait LayoutProbe {
    /// Current viewport-relative span of the element with `id`, or `None` if
    /// it is not in the document.
    fn measure(&self, id: &str) -> Option<VerticalSpan>;
}

impl LayoutProbe for [SectionAnchor] {
    fn measure(&self, id: &str) -> Option<VerticalSpan> {
        self.iter().find(|a| a.id == id).map(SectionAnchor::span)
    }
}

impl LayoutProbe for Vec<SectionAnchor> {
    fn measure(&self, id: &str) -> Option<VerticalSpan> {
        self.as_slice().measure(id)
    }
}

/// The scrollable viewport.
pub trait ScrollHost {
    /// Current vertical scroll position.
    fn scroll_y(&self) -> f64;

    /// Request a smooth scroll to absolute position `y`. Calling again while a
    /// scroll is in flight retargets it.
    fn smooth_scroll_to(&self, y: f64);
}

/// Smooth-scroll so the anchor `id` sits just below the fixed header.
///
/// The target is `top + scroll_y - header_offset_px`, where `top` is the
/// anchor's current viewport-relative top. Returns the requested position,
/// or `None` (and requests nothing) if the anchor cannot be measured.
pub fn scroll_to_anchor(
    probe: &(impl LayoutProbe + ?Sized),
    host: &(impl ScrollHost + ?Sized),
    id: &str,
    header_offset_px: f64,
) -> Option<f64> {
    let Some(span) = probe.measure(id) else {
        tracing::warn!(target: "bibliotech::scroll", id, "scroll target not found");
        return None;
    };
    let target_y = span.top + host.scroll_y() - header_offset_px;
    tracing::debug!(target: "bibliotech::scroll", id, target_y, "smooth scroll requested");
    host.smooth_scroll_to(target_y);
    Some(target_y)
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Tracker state machine.
///
/// `Unset` -> `Active(id)` on the first sample that finds a containing span,
/// then `Active(a)` -> `Active(b)` on later samples. There is no terminal
/// state; the tracker lives as long as the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No sample has matched yet.
    #[default]
    Unset,
    /// The section with this id is active.
    Active(String),
}

/// Tracks which registered section is under the activation point.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    ids: Vec<String>,
    default_id: Option<String>,
    config: TrackerConfig,
    state: TrackerState,
}

impl SectionTracker {
    /// Create a tracker for `ids` in document order.
    ///
    /// Duplicate ids are dropped (first occurrence kept). Until the first
    /// matching sample the first id is reported as active.
    pub fn new<I, S>(ids: I, config: TrackerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        let default_id = unique.first().cloned();
        Self {
            ids: unique,
            default_id,
            config,
            state: TrackerState::Unset,
        }
    }

    /// Report `id` as active before the first match (builder pattern).
    ///
    /// Ignored if `id` is not registered.
    #[must_use]
    pub fn with_default(mut self, id: &str) -> Self {
        if self.is_registered(id) {
            self.default_id = Some(id.to_string());
        }
        self
    }

    /// Registered ids in document order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Tracker offsets.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Replace the offsets (e.g. after the header height changed).
    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// The active id, or the default before the first match.
    #[must_use]
    pub fn active_id(&self) -> &str {
        match &self.state {
            TrackerState::Active(id) => id,
            TrackerState::Unset => self.default_id.as_deref().unwrap_or(""),
        }
    }

    /// Recompute the active section from freshly measured `anchors`.
    ///
    /// Anchors with unregistered ids are ignored. Returns the active id
    /// after the sample.
    pub fn sample(&mut self, anchors: &[SectionAnchor]) -> &str {
        let point = self.config.activation_offset_px;
        let hit = anchors
            .iter()
            .filter(|anchor| self.is_registered(&anchor.id))
            .find(|anchor| anchor.span().contains(point))
            .map(|anchor| anchor.id.clone());
        if let Some(id) = hit {
            self.transition(id);
        }
        self.active_id()
    }

    /// Measure every registered id through `probe`, then [`sample`](Self::sample).
    ///
    /// Ids the probe cannot measure are skipped for this sample.
    pub fn sample_layout(&mut self, probe: &(impl LayoutProbe + ?Sized)) -> &str {
        let anchors: Vec<SectionAnchor> = self
            .ids
            .iter()
            .filter_map(|id| probe.measure(id).map(|span| SectionAnchor::from_span(id.as_str(), span)))
            .collect();
        self.sample(&anchors)
    }

    /// Mark `id` active immediately (e.g. on a navigation click, before the
    /// smooth scroll reaches it). Returns `false` for unregistered ids.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.is_registered(id) {
            return false;
        }
        self.transition(id.to_string());
        true
    }

    /// Select `id` and scroll to it below the configured header offset.
    pub fn navigate(
        &mut self,
        id: &str,
        probe: &(impl LayoutProbe + ?Sized),
        host: &(impl ScrollHost + ?Sized),
    ) -> Option<f64> {
        if !self.select(id) {
            return None;
        }
        scroll_to_anchor(probe, host, id, self.config.header_offset_px)
    }

    fn transition(&mut self, id: String) {
        if matches!(&self.state, TrackerState::Active(current) if *current == id) {
            return;
        }
        tracing::trace!(
            target: "bibliotech::scroll",
            from = self.active_id(),
            to = id.as_str(),
            "active section changed"
        );
        self.state = TrackerState::Active(id);
    }
}
