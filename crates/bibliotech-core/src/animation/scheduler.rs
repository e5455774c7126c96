#![forbid(unsafe_code)]

//! Host frame scheduling.
//!
//! [`FrameScheduler`] is the seam between the counter engine and whatever
//! drives repaints. In a browser it wraps `requestAnimationFrame` and
//! `setTimeout`; natively, [`ManualScheduler`] lets the host (or a test)
//! advance a deterministic clock and flush frames explicitly.
//!
//! # Invariants
//!
//! 1. A frame callback runs at most once, with the frame timestamp.
//! 2. A cancelled token's callback never runs.
//! 3. [`ManualScheduler::run_frame`] only runs callbacks queued *before* the
//!    call; callbacks requested during the flush wait for the next frame.
//! 4. Timers fire in due-time order, ties in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Identifies one queued host callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameToken {
    /// A per-frame callback (`requestAnimationFrame`).
    Frame(u64),
    /// A one-shot timer (`setTimeout`).
    Timer(u64),
}

/// Callback invoked before the next repaint with the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(Duration)>;

/// Callback invoked once a timer elapses.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Per-frame and timer scheduling provided by the host.
pub trait FrameScheduler {
    /// Queue `callback` for the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameToken;

    /// Queue `callback` to run once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> FrameToken;

    /// Detach a queued callback. Unknown or already-fired tokens are ignored.
    fn cancel(&self, token: FrameToken);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        (**self).request_frame(callback)
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> FrameToken {
        (**self).set_timeout(delay, callback)
    }

    fn cancel(&self, token: FrameToken) {
        (**self).cancel(token);
    }
}

// ---------------------------------------------------------------------------
// ManualScheduler
// ---------------------------------------------------------------------------

struct PendingTimer {
    id: u64,
    due: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    frames: Vec<(u64, FrameCallback)>,
    timers: Vec<PendingTimer>,
}

impl ManualInner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Deterministic scheduler controlled by the host.
///
/// Cloning yields another handle onto the same queue and clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    /// Create a scheduler with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current monotonic time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Advance the clock by `dt` and fire every timer that became due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&self, dt: Duration) -> usize {
        let now = {
            let mut inner = self.inner.borrow_mut();
            inner.now = inner.now.saturating_add(dt);
            inner.now
        };
        self.fire_timers(now)
    }

    /// Set the clock to `now` (never moves backwards) and fire due timers.
    pub fn set_time(&self, now: Duration) -> usize {
        let now = {
            let mut inner = self.inner.borrow_mut();
            inner.now = inner.now.max(now);
            inner.now
        };
        self.fire_timers(now)
    }

    /// Run every frame callback queued so far with the current timestamp.
    ///
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let (now, frames) = {
            let mut inner = self.inner.borrow_mut();
            (inner.now, std::mem::take(&mut inner.frames))
        };
        let count = frames.len();
        for (_, callback) in frames {
            callback(now);
        }
        count
    }

    /// Advance by `dt`, then run one frame. Returns the frame callback count.
    pub fn step(&self, dt: Duration) -> usize {
        self.advance(dt);
        self.run_frame()
    }

    /// Step in `dt` increments until no frames or timers remain, or `max_steps`
    /// frames have run. Returns the number of steps taken.
    pub fn run_until_idle(&self, dt: Duration, max_steps: usize) -> usize {
        let mut steps = 0;
        while steps < max_steps && (self.pending_frames() > 0 || self.pending_timers() > 0) {
            if self.pending_frames() > 0 {
                self.run_frame();
            }
            self.advance(dt);
            steps += 1;
        }
        steps
    }

    /// Number of queued frame callbacks.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Number of queued timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    fn fire_timers(&self, now: Duration) -> usize {
        let mut fired = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= now)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                due.map(|i| inner.timers.remove(i))
            };
            match next {
                Some(timer) => {
                    (timer.callback)();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id();
        inner.frames.push((id, callback));
        FrameToken::Frame(id)
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id();
        let due = inner.now.saturating_add(delay);
        inner.timers.push(PendingTimer { id, due, callback });
        FrameToken::Timer(id)
    }

    fn cancel(&self, token: FrameToken) {
        let mut inner = self.inner.borrow_mut();
        match token {
            FrameToken::Frame(id) => inner.frames.retain(|(fid, _)| *fid != id),
            FrameToken::Timer(id) => inner.timers.retain(|t| t.id != id),
        }
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("frames", &inner.frames.len())
            .field("timers", &inner.timers.len())
            .finish()
    }
}
