#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS pixels as reported by the host. Vertical spans are
//! viewport relative (the host's `getBoundingClientRect` convention), so a
//! span's `top` shrinks as the page scrolls down.

/// A vertical extent on the page, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalSpan {
    /// Top edge in pixels.
    pub top: f64,
    /// Bottom edge in pixels.
    pub bottom: f64,
}

impl VerticalSpan {
    /// Create a new span.
    #[inline]
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Create a span from a top edge and a height.
    #[inline]
    pub fn from_top_height(top: f64, height: f64) -> Self {
        Self::new(top, top + height)
    }

    /// Height of the span. Never negative.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Check if `y` lies inside the span (both edges inclusive).
    ///
    /// NaN on either side never matches.
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y <= self.bottom
    }

    /// Shift the span by `dy` pixels.
    #[inline]
    #[must_use]
    pub fn offset(self, dy: f64) -> Self {
        Self::new(self.top + dy, self.bottom + dy)
    }
}

/// A pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of an element in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ElementBounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Vertical extent of the element.
    #[inline]
    pub fn vertical_span(&self) -> VerticalSpan {
        VerticalSpan::from_top_height(self.top, self.height)
    }

    /// Position of `pointer` relative to the element, in percent of its size.
    ///
    /// Results are clamped to `[0, 100]` on both axes. A zero-sized element
    /// reports its center (`50, 50`).
    pub fn relative_percent(&self, pointer: PointerSample) -> (f64, f64) {
        let axis = |offset: f64, extent: f64| {
            if extent > 0.0 && offset.is_finite() {
                (offset / extent * 100.0).clamp(0.0, 100.0)
            } else {
                50.0
            }
        };
        (
            axis(pointer.x - self.left, self.width),
            axis(pointer.y - self.top, self.height),
        )
    }
}
