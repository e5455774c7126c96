#![forbid(unsafe_code)]

//! Animated number counters.
//!
//! [`CounterDisplay`] renders the static placeholder and declares its run in
//! `data-counter-*` attributes. [`CounterBinding`] owns the live run for one
//! element: at most one run at a time, restarted runs cancel their
//! predecessor, and dropping the binding cancels whatever is in flight.
//!
//! # Invariants
//!
//! - A binding never has two live runs.
//! - After `Drop`, no further tick reaches the sink.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use bibliotech_core::{AnimationRequest, CancelHandle, Easing, FrameScheduler, start_animation};

use crate::Widget;
use crate::markup::{Attrs, Markup};

/// Format `value` with `.` thousands separators (pt-BR) and a suffix.
///
/// ```
/// use bibliotech_widgets::format_counter;
/// assert_eq!(format_counter(2330, "+"), "2.330+");
/// assert_eq!(format_counter(999, ""), "999");
/// ```
pub fn format_counter(value: u64, suffix: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + suffix.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push_str(suffix);
    out
}

// ---------------------------------------------------------------------------
// Static placeholder
// ---------------------------------------------------------------------------

/// Counter placeholder with its run declared in data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDisplay {
    request: AnimationRequest,
    suffix: String,
    label: Option<String>,
    show_final: bool,
}

impl CounterDisplay {
    pub fn new(request: AnimationRequest) -> Self {
        Self {
            request,
            suffix: String::new(),
            label: None,
            show_final: false,
        }
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Render the target instead of zero (no-script and print output).
    #[must_use]
    pub fn show_final(mut self, show: bool) -> Self {
        self.show_final = show;
        self
    }

    pub fn request(&self) -> AnimationRequest {
        self.request
    }

    pub fn initial_text(&self) -> String {
        let value = if self.show_final {
            self.request.target_value
        } else {
            0
        };
        format_counter(value, &self.suffix)
    }
}

impl Widget for CounterDisplay {
    fn render(&self, out: &mut Markup) {
        let r = &self.request;
        let target = r.target_value.to_string();
        let duration = (r.duration.as_millis() as u64).to_string();
        let delay = (r.start_delay.as_millis() as u64).to_string();
        let counter = Attrs::new()
            .class("bb-counter")
            .attr("data-counter-target", target)
            .attr("data-counter-duration-ms", duration)
            .attr("data-counter-delay-ms", delay)
            .attr("data-counter-easing", r.easing.name())
            .attr("data-counter-suffix", self.suffix.as_str())
            .attr("aria-label", format_counter(r.target_value, &self.suffix));

        out.open("div", &Attrs::new().class("bb-stat"));
        out.element("span", &counter, &self.initial_text());
        if let Some(label) = &self.label {
            out.element("span", &Attrs::new().class("bb-stat__label"), label);
        }
        out.close("div");
    }
}

/// Default run length used by the stats band.
pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Request for the `index`-th counter in a staggered group.
pub fn staggered_request(
    target: u64,
    index: usize,
    duration: Duration,
    stagger: Duration,
    easing: Easing,
) -> AnimationRequest {
    let steps = u32::try_from(index).unwrap_or(u32::MAX);
    AnimationRequest::new(target, duration)
        .with_delay(stagger.saturating_mul(steps))
        .with_easing(easing)
}

// ---------------------------------------------------------------------------
// Live binding
// ---------------------------------------------------------------------------

/// Owns the live run for one counter element.
pub struct CounterBinding<S: FrameScheduler + Clone + 'static> {
    scheduler: S,
    suffix: Rc<str>,
    sink: Rc<dyn Fn(&str)>,
    value: Rc<Cell<u64>>,
    handle: Option<CancelHandle>,
    runs_started: u32,
}

impl<S: FrameScheduler + Clone + 'static> CounterBinding<S> {
    /// `sink` receives the formatted text on every tick.
    pub fn new(scheduler: S, suffix: &str, sink: impl Fn(&str) + 'static) -> Self {
        Self {
            scheduler,
            suffix: Rc::from(suffix),
            sink: Rc::new(sink),
            value: Rc::new(Cell::new(0)),
            handle: None,
            runs_started: 0,
        }
    }

    /// Cancel any live run, then start `request`.
    pub fn restart(&mut self, request: AnimationRequest) -> &CancelHandle {
        self.cancel();
        self.runs_started = self.runs_started.saturating_add(1);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "bibliotech::widgets",
            run = self.runs_started,
            target_value = request.target_value,
            "counter binding restarted"
        );
        let sink = Rc::clone(&self.sink);
        let suffix = Rc::clone(&self.suffix);
        let value = Rc::clone(&self.value);
        let handle = start_animation(&self.scheduler, request, move |v| {
            value.set(v);
            sink(&format_counter(v, &suffix));
        });
        self.handle.insert(handle)
    }

    /// Stop the live run, if any. The last shown value stays.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    /// Last value delivered to the sink.
    pub fn value(&self) -> u64 {
        self.value.get()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(CancelHandle::is_live)
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }
}

impl<S: FrameScheduler + Clone + 'static> Drop for CounterBinding<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<S: FrameScheduler + Clone + 'static> std::fmt::Debug for CounterBinding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterBinding")
            .field("suffix", &self.suffix)
            .field("value", &self.value.get())
            .field("running", &self.is_running())
            .field("runs_started", &self.runs_started)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibliotech_core::ManualScheduler;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn recording() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |s: &str| sink.borrow_mut().push(s.to_string()))
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_counter(0, ""), "0");
        assert_eq!(format_counter(1000, ""), "1.000");
        assert_eq!(format_counter(1_234_567, "+"), "1.234.567+");
        assert_eq!(format_counter(98, "%"), "98%");
    }

    #[test]
    fn display_declares_run() {
        let request = AnimationRequest::new(2330, Duration::from_millis(2000))
            .with_delay(Duration::from_millis(150));
        let html = CounterDisplay::new(request)
            .suffix("+")
            .label("Livros emprestados")
            .to_html();
        assert_eq!(
            html,
            concat!(
                r#"<div class="bb-stat">"#,
                r#"<span class="bb-counter" data-counter-target="2330" data-counter-duration-ms="2000" "#,
                r#"data-counter-delay-ms="150" data-counter-easing="ease-out" data-counter-suffix="+" "#,
                r#"aria-label="2.330+">0+</span>"#,
                r#"<span class="bb-stat__label">Livros emprestados</span>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn show_final_renders_target() {
        let display = CounterDisplay::new(AnimationRequest::new(1200, DEFAULT_COUNTER_DURATION))
            .show_final(true);
        assert_eq!(display.initial_text(), "1.200");
    }

    #[test]
    fn staggered_delays() {
        let d = Duration::from_millis(2000);
        let s = Duration::from_millis(150);
        let delays: Vec<u128> = (0..4)
            .map(|i| staggered_request(10, i, d, s, Easing::EaseOut).start_delay.as_millis())
            .collect();
        assert_eq!(delays, vec![0, 150, 300, 450]);
    }

    #[test]
    fn binding_runs_to_target() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recording();
        let mut binding = CounterBinding::new(sched.clone(), "+", sink);
        binding.restart(AnimationRequest::new(1500, Duration::from_millis(300)));
        sched.run_frame();
        sched.run_until_idle(Duration::from_millis(16), 1000);
        assert_eq!(binding.value(), 1500);
        assert_eq!(seen.borrow().last().map(String::as_str), Some("1.500+"));
        assert!(!binding.is_running());
    }

    #[test]
    fn restart_cancels_previous_run() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recording();
        let mut binding = CounterBinding::new(sched.clone(), "", sink);
        let first = binding.restart(AnimationRequest::new(9000, Duration::from_millis(1000))).clone();
        sched.run_frame();
        sched.step(Duration::from_millis(100));
        binding.restart(AnimationRequest::new(10, Duration::from_millis(100)));
        assert!(first.is_cancelled());
        sched.run_frame();
        sched.run_until_idle(Duration::from_millis(16), 1000);
        assert_eq!(binding.value(), 10);
        assert_eq!(seen.borrow().last().map(String::as_str), Some("10"));
        assert_eq!(binding.runs_started(), 2);
    }

    #[test]
    fn drop_cancels_in_flight_run() {
        let sched = ManualScheduler::new();
        let (seen, sink) = recording();
        {
            let mut binding = CounterBinding::new(sched.clone(), "", sink);
            binding.restart(
                AnimationRequest::new(500, Duration::from_millis(500))
                    .with_delay(Duration::from_millis(200)),
            );
        }
        sched.run_until_idle(Duration::from_millis(16), 1000);
        assert!(seen.borrow().is_empty());
        assert_eq!(sched.pending_timers(), 0);
        assert_eq!(sched.pending_frames(), 0);
    }
}
