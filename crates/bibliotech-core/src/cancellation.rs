//! Cancellation handles for host-scheduled callbacks.
//!
//! [`CancelHandle`] is the value returned by
//! [`start_animation`](crate::animation::start_animation). It records whether
//! the run was cancelled or finished and remembers the one callback the run
//! currently has queued on the host, so cancelling can detach it.
//!
//! Everything runs on the host UI thread, so the handle is `Rc` based and
//! deliberately `!Send`.
//!
//! # Example
//!
//! ```
//! use bibliotech_core::animation::{AnimationRequest, Easing, ManualScheduler, start_animation};
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let request = AnimationRequest::new(100, Duration::from_millis(500))
//!     .with_delay(Duration::from_millis(200))
//!     .with_easing(Easing::EaseOut);
//! let handle = start_animation(&scheduler, request, |_value| {});
//!
//! handle.cancel();
//! handle.cancel(); // idempotent
//! assert!(handle.is_cancelled());
//! assert_eq!(scheduler.pending_timers(), 0);
//! ```

#![forbid(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::animation::FrameToken;

/// Lifecycle of the work a handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Live,
    Cancelled,
    Finished,
}

struct CancelInner {
    phase: Cell<Phase>,
    pending: Cell<Option<FrameToken>>,
    release: RefCell<Option<Box<dyn Fn(FrameToken)>>>,
}

/// A cloneable handle that stops a scheduled run.
///
/// Clones observe and control the same run. Dropping a handle does **not**
/// cancel; call [`cancel`](Self::cancel) explicitly (or hold the run in a
/// binding that cancels on drop).
#[derive(Clone)]
pub struct CancelHandle {
    inner: Rc<CancelInner>,
}

impl CancelHandle {
    /// Create a live handle with no pending callback.
    ///
    /// `release` is invoked with the pending token when the handle is
    /// cancelled; it should detach the callback from the host.
    pub fn new(release: impl Fn(FrameToken) + 'static) -> Self {
        Self {
            inner: Rc::new(CancelInner {
                phase: Cell::new(Phase::Live),
                pending: Cell::new(None),
                release: RefCell::new(Some(Box::new(release))),
            }),
        }
    }

    /// Create a handle that is already finished. Cancelling it does nothing.
    pub fn finished() -> Self {
        let handle = Self::new(|_| {});
        handle.mark_finished();
        handle
    }

    /// Stop the run.
    ///
    /// Detaches the pending host callback (if any) and guarantees that no
    /// further tick is delivered. Safe to call any number of times, and
    /// after the run finished on its own.
    pub fn cancel(&self) {
        if self.inner.phase.get() != Phase::Live {
            return;
        }
        self.inner.phase.set(Phase::Cancelled);
        let release = self.inner.release.borrow_mut().take();
        if let (Some(token), Some(release)) = (self.inner.pending.take(), release) {
            release(token);
        }
        tracing::debug!(target: "bibliotech::animation", "run cancelled");
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on a live run.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.phase.get() == Phase::Cancelled
    }

    /// Returns `true` once the run completed without being cancelled.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.inner.phase.get() == Phase::Finished
    }

    /// Returns `true` while the run can still deliver ticks.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.inner.phase.get() == Phase::Live
    }

    /// Record the callback currently queued on the host.
    pub(crate) fn set_pending(&self, token: FrameToken) {
        self.inner.pending.set(Some(token));
    }

    /// Forget the queued callback once it fired.
    pub(crate) fn clear_pending(&self) {
        self.inner.pending.set(None);
    }

    /// Mark the run complete and drop the release hook.
    pub(crate) fn mark_finished(&self) {
        if self.inner.phase.get() == Phase::Live {
            self.inner.phase.set(Phase::Finished);
            self.inner.pending.set(None);
            self.inner.release.borrow_mut().take();
        }
    }

    /// Token of the callback the run is waiting on, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameToken> {
        self.inner.pending.get()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("phase", &self.inner.phase.get())
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}
