#![forbid(unsafe_code)]

//! Multi-stop color gradients and the pointer-following gradient text effect.
//!
//! [`gradient_for_pointer`] is a pure function of element bounds, pointer
//! position and hover flag. The web layer feeds it pointer-move samples and
//! writes [`GradientSpec::to_css`] into the element's `background-image`.

use bibliotech_core::{ElementBounds, PointerSample};

use crate::color::{Rgb, trim_float};
use crate::theme::Theme;

/// Ordered color stops; positions are in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradient {
    stops: Vec<(f64, Rgb)>,
}

impl ColorGradient {
    /// Create a gradient; stops are sorted by position and clamped to `[0, 1]`.
    pub fn new(stops: Vec<(f64, Rgb)>) -> Self {
        let mut stops: Vec<(f64, Rgb)> = stops
            .into_iter()
            .filter(|(p, _)| !p.is_nan())
            .map(|(p, c)| (p.clamp(0.0, 1.0), c))
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Brand gradient: primary, secondary, accent.
    pub fn brand(theme: &Theme) -> Self {
        Self::new(vec![
            (0.0, theme.primary),
            (0.5, theme.secondary),
            (1.0, theme.accent),
        ])
    }

    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    /// Sample the gradient at `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let Some(first) = self.stops.first() else {
            return Rgb::WHITE;
        };
        let mut prev = first;
        for stop in &self.stops {
            if stop.0 >= t {
                if stop.0 == prev.0 {
                    return stop.1;
                }
                let local = (t - prev.0) / (stop.0 - prev.0);
                return prev.1.lerp(stop.1, local);
            }
            prev = stop;
        }
        prev.1
    }

    fn css_stops(&self) -> String {
        self.stops
            .iter()
            .map(|(p, c)| format!("{} {}%", c.to_css(), trim_float(p * 100.0)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A CSS-ready gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientSpec {
    /// `linear-gradient(<angle>deg, ...)`.
    Linear { angle_deg: f64, stops: ColorGradient },
    /// `radial-gradient(circle at x% y%, ...)`.
    Radial {
        x_pct: f64,
        y_pct: f64,
        stops: ColorGradient,
    },
}

impl GradientSpec {
    pub fn stops(&self) -> &ColorGradient {
        match self {
            GradientSpec::Linear { stops, .. } | GradientSpec::Radial { stops, .. } => stops,
        }
    }

    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            GradientSpec::Linear { angle_deg, stops } => format!(
                "linear-gradient({}deg, {})",
                trim_float(*angle_deg),
                stops.css_stops()
            ),
            GradientSpec::Radial {
                x_pct,
                y_pct,
                stops,
            } => format!(
                "radial-gradient(circle at {}% {}%, {})",
                trim_float(*x_pct),
                trim_float(*y_pct),
                stops.css_stops()
            ),
        }
    }
}

/// Resting angle of gradient text when the pointer is elsewhere.
pub const RESTING_ANGLE_DEG: f64 = 90.0;

/// Gradient for text under a pointer.
///
/// Not hovering: a static left-to-right linear gradient. Hovering: a radial
/// gradient centered on the pointer, in percent of the element box (clamped
/// to the box; a zero-size box centers at 50%).
#[must_use]
pub fn gradient_for_pointer(
    gradient: &ColorGradient,
    bounds: ElementBounds,
    pointer: PointerSample,
    hovering: bool,
) -> GradientSpec {
    if !hovering {
        return GradientSpec::Linear {
            angle_deg: RESTING_ANGLE_DEG,
            stops: gradient.clone(),
        };
    }
    let (x_pct, y_pct) = bounds.relative_percent(pointer);
    GradientSpec::Radial {
        x_pct,
        y_pct,
        stops: gradient.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_stop() -> ColorGradient {
        ColorGradient::new(vec![(1.0, Rgb::WHITE), (0.0, Rgb::BLACK)])
    }

    #[test]
    fn stops_are_sorted() {
        let g = two_stop();
        assert_eq!(g.stops()[0].1, Rgb::BLACK);
        assert_eq!(g.sample(0.0), Rgb::BLACK);
        assert_eq!(g.sample(1.0), Rgb::WHITE);
        assert_eq!(g.sample(0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn empty_and_single_stop() {
        assert_eq!(ColorGradient::new(vec![]).sample(0.3), Rgb::WHITE);
        let one = ColorGradient::new(vec![(0.4, Rgb::new(1, 2, 3))]);
        assert_eq!(one.sample(0.0), Rgb::new(1, 2, 3));
        assert_eq!(one.sample(1.0), Rgb::new(1, 2, 3));
    }

    #[test]
    fn resting_gradient_is_linear() {
        let spec = gradient_for_pointer(
            &two_stop(),
            ElementBounds::new(0.0, 0.0, 200.0, 50.0),
            PointerSample::new(10.0, 10.0),
            false,
        );
        assert_eq!(
            spec.to_css(),
            "linear-gradient(90deg, #000000 0%, #ffffff 100%)"
        );
    }

    #[test]
    fn hover_centers_on_pointer() {
        let spec = gradient_for_pointer(
            &two_stop(),
            ElementBounds::new(100.0, 100.0, 200.0, 50.0),
            PointerSample::new(150.0, 120.0),
            true,
        );
        assert_eq!(
            spec.to_css(),
            "radial-gradient(circle at 25% 40%, #000000 0%, #ffffff 100%)"
        );
    }

    #[test]
    fn pointer_outside_clamps_to_edge() {
        let spec = gradient_for_pointer(
            &two_stop(),
            ElementBounds::new(0.0, 0.0, 100.0, 100.0),
            PointerSample::new(-40.0, 400.0),
            true,
        );
        let GradientSpec::Radial { x_pct, y_pct, .. } = spec else {
            panic!("hovering yields radial");
        };
        assert_eq!((x_pct, y_pct), (0.0, 100.0));
    }

    #[test]
    fn brand_gradient_has_three_stops() {
        let g = ColorGradient::brand(&Theme::default());
        assert_eq!(g.stops().len(), 3);
        assert_eq!(g.sample(0.5), Theme::default().secondary);
    }
}
