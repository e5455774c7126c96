//! Property-based invariant tests for the section tracker.
//!
//! 1. The active id is always registered
//! 2. A sample with no containing span never changes the active id
//! 3. The tracker agrees with the stateless containment test when it matches

use bibliotech_core::scroll::{
    SectionAnchor, SectionTracker, TrackerConfig, compute_active_section,
};
use proptest::prelude::*;

const IDS: [&str; 5] = ["inicio", "produto", "recursos", "planos", "contato"];

fn anchors_strategy() -> impl Strategy<Value = Vec<SectionAnchor>> {
    proptest::collection::vec((0usize..IDS.len(), -3000.0f64..3000.0, 0.0f64..1500.0), 0..8)
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(i, top, height)| SectionAnchor::new(IDS[i], top, top + height))
                .collect()
        })
}

proptest! {
    #[test]
    fn active_id_is_always_registered(
        samples in proptest::collection::vec(anchors_strategy(), 1..30),
        point in 0.0f64..400.0,
    ) {
        let config = TrackerConfig { activation_offset_px: point, ..TrackerConfig::default() };
        let mut tracker = SectionTracker::new(IDS, config);
        for anchors in &samples {
            let active = tracker.sample(anchors).to_string();
            prop_assert!(IDS.contains(&active.as_str()));
        }
    }

    #[test]
    fn no_match_keeps_previous(
        first in anchors_strategy(),
        point in 0.0f64..400.0,
    ) {
        let config = TrackerConfig { activation_offset_px: point, ..TrackerConfig::default() };
        let mut tracker = SectionTracker::new(IDS, config);
        let before = tracker.sample(&first).to_string();
        // Everything scrolled far above the activation point.
        let gone: Vec<SectionAnchor> = first
            .iter()
            .map(|a| SectionAnchor::new(a.id.clone(), a.top - 10_000.0, a.bottom - 10_000.0))
            .collect();
        prop_assert_eq!(tracker.sample(&gone), before.as_str());
    }

    #[test]
    fn tracker_agrees_with_containment(anchors in anchors_strategy(), point in 0.0f64..400.0) {
        let config = TrackerConfig { activation_offset_px: point, ..TrackerConfig::default() };
        let mut tracker = SectionTracker::new(IDS, config);
        let active = tracker.sample(&anchors).to_string();
        if let Some(hit) = compute_active_section(&anchors, point) {
            prop_assert_eq!(active, hit);
        } else {
            prop_assert_eq!(active, IDS[0]);
        }
    }
}
