#![forbid(unsafe_code)]

//! The counter engine: a number that climbs from zero to a target.
//!
//! [`CounterRun`] is the pure part. Given frame timestamps it produces the
//! value to display. [`start_animation`] wires a run to a [`FrameScheduler`]:
//! it waits out the start delay, samples the run once per frame, hands each
//! value to `on_tick`, and stops after delivering the target.
//!
//! The run's clock starts at the first frame after the delay, so the first
//! tick is always `0` (unless the duration is zero, in which case the first
//! tick is the target).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::Easing;
use super::scheduler::{FrameScheduler, FrameToken};
use crate::cancellation::CancelHandle;

/// Parameters of one counter run. Immutable once the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRequest {
    /// Final value shown when the run completes.
    pub target_value: u64,
    /// Time from the first frame to completion.
    pub duration: Duration,
    /// Wait before the first frame is requested.
    pub start_delay: Duration,
    /// Curve applied to time progress.
    pub easing: Easing,
}

impl AnimationRequest {
    /// Request counting to `target_value` over `duration`, ease-out, no delay.
    #[must_use]
    pub const fn new(target_value: u64, duration: Duration) -> Self {
        Self {
            target_value,
            duration,
            start_delay: Duration::ZERO,
            easing: Easing::EaseOut,
        }
    }

    /// Set the start delay (builder pattern).
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Value displayed at normalized time `progress`.
    ///
    /// `progress >= 1` yields the target exactly; everything else is
    /// `floor(target * eased)`, capped at the target.
    #[must_use]
    pub fn value_at(&self, progress: f64) -> u64 {
        if progress >= 1.0 {
            return self.target_value;
        }
        let eased = self.easing.apply(progress);
        let raw = (self.target_value as f64 * eased).floor();
        // `as` saturates on overflow and maps NaN to 0.
        (raw as u64).min(self.target_value)
    }
}

/// Observable state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    /// Last value emitted.
    pub current_value: u64,
    /// Whether the run still expects frames.
    pub is_running: bool,
}

/// Result of sampling a run at one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSample {
    /// Value to display.
    pub value: u64,
    /// Whether this sample completed the run.
    pub finished: bool,
}

/// A single counter run, advanced by frame timestamps.
#[derive(Debug, Clone)]
pub struct CounterRun {
    request: AnimationRequest,
    started_at: Option<Duration>,
    state: AnimationState,
}

impl CounterRun {
    /// Create an idle run for `request`.
    #[must_use]
    pub fn new(request: AnimationRequest) -> Self {
        Self {
            request,
            started_at: None,
            state: AnimationState {
                current_value: 0,
                is_running: true,
            },
        }
    }

    /// The request this run was created from.
    #[must_use]
    pub fn request(&self) -> &AnimationRequest {
        &self.request
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Timestamp of the first sampled frame, if any.
    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Normalized progress at `now`, clamped to `[0, 1]`.
    ///
    /// Before the first sample the run has not started and progress is `0`.
    #[must_use]
    pub fn progress_at(&self, now: Duration) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        if self.request.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start);
        (elapsed.as_secs_f64() / self.request.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Sample the run at frame timestamp `now`.
    ///
    /// The first call fixes the run's start time. Once a sample reports
    /// `finished`, later calls keep returning the target.
    pub fn sample(&mut self, now: Duration) -> CounterSample {
        if !self.state.is_running {
            return CounterSample {
                value: self.state.current_value,
                finished: true,
            };
        }
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        let progress = self.progress_at(now);
        let finished = progress >= 1.0;
        let value = if finished {
            self.request.target_value
        } else {
            // Out-of-order timestamps must not move the display backwards.
            self.request
                .value_at(progress)
                .max(self.state.current_value)
        };
        self.state = AnimationState {
            current_value: value,
            is_running: !finished,
        };
        CounterSample { value, finished }
    }
}

struct RunDriver {
    run: CounterRun,
    on_tick: Box<dyn FnMut(u64)>,
}

/// Start a counter run on `scheduler`, delivering each value to `on_tick`.
///
/// After `request.start_delay` the engine samples the run once per frame and
/// calls `on_tick` with the value. The final call receives exactly
/// `request.target_value`, after which no more frames are requested.
///
/// The returned handle stops the run. Cancelling before the delay elapses
/// means `on_tick` is never called. The engine does not stop a previous run
/// on the same element; callers cancel it first.
pub fn start_animation<S>(
    scheduler: &S,
    request: AnimationRequest,
    on_tick: impl FnMut(u64) + 'static,
) -> CancelHandle
where
    S: FrameScheduler + Clone + 'static,
{
    let releaser = scheduler.clone();
    let handle = CancelHandle::new(move |token: FrameToken| releaser.cancel(token));
    let driver = Rc::new(RefCell::new(RunDriver {
        run: CounterRun::new(request),
        on_tick: Box::new(on_tick),
    }));

    tracing::debug!(
        target: "bibliotech::animation",
        target_value = request.target_value,
        duration_ms = request.duration.as_millis() as u64,
        delay_ms = request.start_delay.as_millis() as u64,
        easing = request.easing.name(),
        "counter run requested"
    );

    if request.start_delay.is_zero() {
        request_next_frame(scheduler, driver, handle.clone());
    } else {
        let sched = scheduler.clone();
        let timer_handle = handle.clone();
        let token = scheduler.set_timeout(
            request.start_delay,
            Box::new(move || {
                if !timer_handle.is_live() {
                    return;
                }
                timer_handle.clear_pending();
                request_next_frame(&sched, driver, timer_handle);
            }),
        );
        handle.set_pending(token);
    }
    handle
}

fn request_next_frame<S>(scheduler: &S, driver: Rc<RefCell<RunDriver>>, handle: CancelHandle)
where
    S: FrameScheduler + Clone + 'static,
{
    let sched = scheduler.clone();
    let frame_handle = handle.clone();
    let token = scheduler.request_frame(Box::new(move |now| {
        if !frame_handle.is_live() {
            return;
        }
        frame_handle.clear_pending();
        let sample = {
            let mut d = driver.borrow_mut();
            let sample = d.run.sample(now);
            (d.on_tick)(sample.value);
            sample
        };
        if sample.finished {
            frame_handle.mark_finished();
            tracing::debug!(
                target: "bibliotech::animation",
                value = sample.value,
                "counter run finished"
            );
        } else if frame_handle.is_live() {
            request_next_frame(&sched, driver, frame_handle);
        }
    }));
    handle.set_pending(token);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualScheduler;
    use std::cell::Cell;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);
    const SEC_1: Duration = Duration::from_secs(1);
    const SEC_2: Duration = Duration::from_secs(2);

    fn recorder() -> (Rc<RefCell<Vec<u64>>>, impl FnMut(u64) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn value_at_midpoint_ease_out() {
        let request = AnimationRequest::new(2330, SEC_2).with_easing(Easing::EaseOut);
        assert_eq!(request.value_at(0.5), 2038);
    }

    #[test]
    fn value_at_complete_is_target() {
        for easing in Easing::ALL {
            let request = AnimationRequest::new(999, SEC_1).with_easing(easing);
            assert_eq!(request.value_at(1.0), 999);
            assert_eq!(request.value_at(5.0), 999);
        }
    }

    #[test]
    fn run_starts_at_first_sample() {
        let mut run = CounterRun::new(AnimationRequest::new(100, SEC_1));
        assert_eq!(run.progress_at(SEC_2), 0.0);
        let first = run.sample(MS_500);
        assert_eq!(first.value, 0);
        assert_eq!(run.started_at(), Some(MS_500));
        assert!((run.progress_at(SEC_1) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn run_finishes_with_target() {
        let mut run = CounterRun::new(AnimationRequest::new(100, SEC_1).with_easing(Easing::Linear));
        run.sample(Duration::ZERO);
        assert_eq!(run.sample(MS_500).value, 50);
        let last = run.sample(SEC_1);
        assert_eq!(last, CounterSample { value: 100, finished: true });
        assert!(!run.state().is_running);
        assert_eq!(run.sample(SEC_2), CounterSample { value: 100, finished: true });
    }

    #[test]
    fn zero_duration_finishes_on_first_sample() {
        let mut run = CounterRun::new(AnimationRequest::new(42, Duration::ZERO));
        assert_eq!(run.sample(MS_100), CounterSample { value: 42, finished: true });
    }

    #[test]
    fn backwards_timestamp_does_not_reverse() {
        let mut run = CounterRun::new(AnimationRequest::new(1000, SEC_1).with_easing(Easing::Linear));
        run.sample(MS_500);
        let ahead = run.sample(SEC_1 + MS_100);
        let behind = run.sample(MS_500 + MS_100);
        assert!(behind.value >= ahead.value);
    }

    #[test]
    fn engine_emits_expected_sequence() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        let request = AnimationRequest::new(2330, SEC_2).with_easing(Easing::EaseOut);
        let handle = start_animation(&sched, request, sink);

        sched.run_frame();
        sched.step(SEC_1);
        assert_eq!(*seen.borrow(), vec![0, 2038]);

        sched.step(SEC_1);
        assert_eq!(*seen.borrow(), vec![0, 2038, 2330]);
        assert!(handle.is_finished());
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn target_delivered_exactly_once() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        start_animation(&sched, AnimationRequest::new(10, MS_100), sink);
        sched.run_until_idle(Duration::from_millis(16), 100);
        let values = seen.borrow();
        assert_eq!(values.last(), Some(&10));
        assert_eq!(values.iter().filter(|&&v| v == 10).count(), 1);
    }

    #[test]
    fn delay_postpones_first_frame() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        let request = AnimationRequest::new(50, MS_500).with_delay(SEC_1);
        start_animation(&sched, request, sink);

        assert_eq!(sched.pending_frames(), 0);
        sched.step(MS_500);
        assert!(seen.borrow().is_empty());
        sched.step(MS_500);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn cancel_before_delay_yields_no_ticks() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        let request = AnimationRequest::new(50, MS_500).with_delay(MS_100);
        let handle = start_animation(&sched, request, sink);
        handle.cancel();

        sched.run_until_idle(MS_100, 50);
        sched.step(SEC_2);
        assert!(seen.borrow().is_empty());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn cancel_mid_run_stops_ticks() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        let handle = start_animation(&sched, AnimationRequest::new(100, SEC_1), sink);
        sched.run_frame();
        sched.step(MS_100);
        handle.cancel();
        let before = seen.borrow().len();
        sched.run_until_idle(MS_100, 50);
        assert_eq!(seen.borrow().len(), before);
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn cancel_from_inside_tick_stops_run() {
        let sched = ManualScheduler::new();
        let slot: Rc<RefCell<Option<CancelHandle>>> = Rc::new(RefCell::new(None));
        let ticks = Rc::new(Cell::new(0));
        let (slot_in, ticks_in) = (Rc::clone(&slot), Rc::clone(&ticks));
        let handle = start_animation(&sched, AnimationRequest::new(100, SEC_1), move |_| {
            ticks_in.set(ticks_in.get() + 1);
            if let Some(h) = slot_in.borrow().as_ref() {
                h.cancel();
            }
        });
        *slot.borrow_mut() = Some(handle.clone());

        sched.run_frame();
        sched.run_until_idle(MS_100, 20);
        assert_eq!(ticks.get(), 1);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn cancel_twice_after_completion_is_harmless() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        let handle = start_animation(&sched, AnimationRequest::new(5, Duration::ZERO), sink);
        sched.run_frame();
        handle.cancel();
        handle.cancel();
        assert_eq!(*seen.borrow(), vec![5]);
        assert!(handle.is_finished());
    }

    #[test]
    fn zero_target_emits_zero() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recorder();
        start_animation(&sched, AnimationRequest::new(0, MS_100), sink);
        sched.run_until_idle(Duration::from_millis(16), 100);
        assert!(seen.borrow().iter().all(|&v| v == 0));
        assert_eq!(seen.borrow().last(), Some(&0));
    }
}
