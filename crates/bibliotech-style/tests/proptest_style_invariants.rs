//! Property-based invariant tests for colors and gradients.
//!
//! 1. `ColorGradient::sample` never leaves the channel range of its stops
//! 2. Hovering gradients center inside the element box, in `[0, 100]` percent
//! 3. `#rrggbb` output parses back to the same color

use bibliotech_core::{ElementBounds, PointerSample};
use bibliotech_style::{ColorGradient, GradientSpec, Rgb, gradient_for_pointer};
use proptest::prelude::*;

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn gradient_strategy() -> impl Strategy<Value = ColorGradient> {
    proptest::collection::vec((0.0f64..=1.0, rgb_strategy()), 1..6).prop_map(ColorGradient::new)
}

fn channel_range(gradient: &ColorGradient, channel: impl Fn(Rgb) -> u8) -> (u8, u8) {
    gradient
        .stops()
        .iter()
        .map(|(_, c)| channel(*c))
        .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

proptest! {
    #[test]
    fn sample_stays_within_stops(gradient in gradient_strategy(), t in -1.0f64..2.0) {
        let color = gradient.sample(t);
        for (value, channel) in [
            (color.r, (|c: Rgb| c.r) as fn(Rgb) -> u8),
            (color.g, |c: Rgb| c.g),
            (color.b, |c: Rgb| c.b),
        ] {
            let (lo, hi) = channel_range(&gradient, channel);
            prop_assert!(lo <= value && value <= hi, "{value} outside {lo}..={hi}");
        }
    }

    #[test]
    fn pointer_percent_stays_in_box(
        gradient in gradient_strategy(),
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        width in 0.0f64..800.0,
        height in 0.0f64..200.0,
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
    ) {
        let bounds = ElementBounds::new(left, top, width, height);
        let spec = gradient_for_pointer(&gradient, bounds, PointerSample::new(x, y), true);
        let GradientSpec::Radial { x_pct, y_pct, .. } = spec else {
            return Err(TestCaseError::fail("hovering must yield a radial gradient"));
        };
        prop_assert!((0.0..=100.0).contains(&x_pct), "x {x_pct}");
        prop_assert!((0.0..=100.0).contains(&y_pct), "y {y_pct}");
    }

    #[test]
    fn css_hex_parses_back(color in rgb_strategy()) {
        prop_assert_eq!(color.to_css().parse::<Rgb>(), Ok(color));
    }
}
