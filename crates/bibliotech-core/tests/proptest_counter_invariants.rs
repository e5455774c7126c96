//! Property-based invariant tests for the counter engine and easing curves.
//!
//! 1. Every curve is monotonic on [0, 1] and fixes both endpoints
//! 2. A run driven to completion ends with exactly the target
//! 3. Emitted values never decrease and never exceed the target
//! 4. Cancelling before the start delay yields zero ticks
//! 5. Cancelling twice is harmless

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use bibliotech_core::animation::{
    AnimationRequest, CounterRun, Easing, ManualScheduler, start_animation,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn easing_strategy() -> impl Strategy<Value = Easing> {
    prop_oneof![
        Just(Easing::Linear),
        Just(Easing::EaseOut),
        Just(Easing::EaseInOut),
    ]
}

fn request_strategy() -> impl Strategy<Value = AnimationRequest> {
    (0u64..10_000_000, 0u64..5_000, easing_strategy()).prop_map(|(target, ms, easing)| {
        AnimationRequest::new(target, Duration::from_millis(ms)).with_easing(easing)
    })
}

/// Frame intervals between 1ms and 50ms, like a real display under load.
fn frame_gaps() -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(1u64..50, 1..400)
}

fn drive(
    sched: &ManualScheduler,
    request: AnimationRequest,
    gaps: &[u64],
) -> Rc<RefCell<Vec<u64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    start_animation(sched, request, move |v| sink.borrow_mut().push(v));
    sched.run_frame();
    for gap in gaps {
        sched.step(Duration::from_millis(*gap));
    }
    // Finish whatever the random gaps left over.
    sched.run_until_idle(Duration::from_millis(16), 10_000);
    seen
}

proptest! {
    #[test]
    fn easing_is_monotonic(easing in easing_strategy(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(easing.apply(lo) <= easing.apply(hi));
    }

    #[test]
    fn easing_stays_in_unit_interval(easing in easing_strategy(), p in -2.0f64..3.0) {
        let v = easing.apply(p);
        prop_assert!((0.0..=1.0).contains(&v), "{} at {} gave {}", easing, p, v);
    }

    #[test]
    fn final_tick_is_target(request in request_strategy(), gaps in frame_gaps()) {
        let sched = ManualScheduler::new();
        let seen = drive(&sched, request, &gaps);
        let values = seen.borrow();
        prop_assert_eq!(values.last().copied(), Some(request.target_value));
        prop_assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn emissions_are_monotonic_and_bounded(request in request_strategy(), gaps in frame_gaps()) {
        let sched = ManualScheduler::new();
        let seen = drive(&sched, request, &gaps);
        let values = seen.borrow();
        for pair in values.windows(2) {
            prop_assert!(pair[0] <= pair[1], "reversed: {:?}", pair);
        }
        prop_assert!(values.iter().all(|&v| v <= request.target_value));
    }

    #[test]
    fn cancel_before_delay_means_no_ticks(
        request in request_strategy(),
        delay_ms in 1u64..2_000,
        gaps in frame_gaps(),
    ) {
        let sched = ManualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let request = request.with_delay(Duration::from_millis(delay_ms));
        let handle = start_animation(&sched, request, move |v| sink.borrow_mut().push(v));
        handle.cancel();
        handle.cancel();
        for gap in gaps {
            sched.step(Duration::from_millis(gap));
        }
        prop_assert!(seen.borrow().is_empty());
        prop_assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn pure_run_matches_closed_form(request in request_strategy(), at_ms in 0u64..10_000) {
        let mut run = CounterRun::new(request);
        run.sample(Duration::ZERO);
        let sample = run.sample(Duration::from_millis(at_ms));
        let expected = if request.duration.is_zero() || at_ms >= request.duration.as_millis() as u64 {
            request.target_value
        } else {
            let p = at_ms as f64 / request.duration.as_millis() as f64;
            (request.target_value as f64 * request.easing.apply(p)).floor() as u64
        };
        // Seconds-based and millisecond-based ratios may differ in the last ulp.
        prop_assert!(sample.value.abs_diff(expected) <= 1, "{} vs {}", sample.value, expected);
    }
}

#[test]
fn documented_example_at_one_second() {
    let mut run = CounterRun::new(
        AnimationRequest::new(2330, Duration::from_millis(2000)).with_easing(Easing::EaseOut),
    );
    run.sample(Duration::ZERO);
    assert_eq!(run.sample(Duration::from_millis(1000)).value, 2038);
}
