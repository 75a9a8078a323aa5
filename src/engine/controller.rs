//! Playback session state machine
//!
//! An [`ExecHandle`] owns one playback session: its run/pause/cancel status,
//! the base step duration, and the single in-flight [`Delay`]. The UI drives
//! it through [`ExecHandle::play`], [`ExecHandle::pause`],
//! [`ExecHandle::reset`] and [`ExecHandle::set_speed`]; an algorithm driver
//! drives it through [`ExecHandle::step`], [`ExecHandle::is_cancelled`] and
//! [`ExecHandle::finish`].
//!
//! Every control operation is a safe no-op when it doesn't apply, so a user
//! mashing pause or reset can never corrupt the session.
//!
//! Concurrency model: strictly single-threaded and cooperative. A driver is a
//! plain (possibly recursive) `async fn` whose only suspension points are the
//! waits returned by [`ExecHandle::step`]; the UI loop polls the driver
//! future once per tick with a no-op waker. Between two waits the driver
//! mutates visualization state with nothing able to interleave. Cancellation
//! is cooperative: `reset` force-settles the in-flight wait and sets a sticky
//! flag that the driver observes at its next checkpoint.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use super::delay::{Delay, DelayStatus};

/// Session status, observed by the UI to label buttons and the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Session created, driver not started yet
    Idle,
    /// Driver is advancing through its checkpoints
    Running,
    /// Frozen mid-run; the in-flight wait keeps its banked remaining time
    Paused,
    /// Driver exhausted its checkpoints and published a final outcome
    Completed,
    /// Session aborted by reset; the driver unwound without further mutation
    Cancelled,
}

impl RunStatus {
    /// Whether the session has ended (no further transitions possible)
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Cancelled)
    }
}

#[derive(Debug)]
struct ControllerState {
    status: RunStatus,
    speed: Duration,
    cancel_requested: bool,
    active_delay: Option<Rc<RefCell<Delay>>>,
}

/// Handle to one playback session.
///
/// Clones share the same session; the UI keeps one and each driver future
/// captures one. A fresh session means a fresh `ExecHandle`; controllers are
/// never reused across runs, so a stale wait from an old session can never
/// touch a new one.
#[derive(Debug, Clone)]
pub struct ExecHandle {
    state: Rc<RefCell<ControllerState>>,
}

impl ExecHandle {
    /// Create an idle session with the given base step duration
    pub fn new(speed: Duration) -> Self {
        ExecHandle {
            state: Rc::new(RefCell::new(ControllerState {
                status: RunStatus::Idle,
                speed,
                cancel_requested: false,
                active_delay: None,
            })),
        }
    }

    /// Current session status
    pub fn status(&self) -> RunStatus {
        self.state.borrow().status
    }

    /// Current base step duration
    pub fn speed(&self) -> Duration {
        self.state.borrow().speed
    }

    /// Whether cancellation has been requested (sticky for the session).
    ///
    /// Drivers check this after every awaited wait and at every recursive
    /// call boundary, and unwind without further mutation when it is set.
    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancel_requested
    }

    /// Start or resume playback.
    ///
    /// From `Idle` the session becomes `Running` (the caller then begins
    /// polling the driver). From `Paused` the in-flight wait resumes with its
    /// banked remaining time. No effect while already `Running` or after the
    /// session ended.
    pub fn play(&self) {
        let mut s = self.state.borrow_mut();
        match s.status {
            RunStatus::Idle => s.status = RunStatus::Running,
            RunStatus::Paused => {
                s.status = RunStatus::Running;
                if let Some(delay) = &s.active_delay {
                    delay.borrow_mut().resume(Instant::now());
                }
            }
            _ => {}
        }
    }

    /// Freeze playback, banking the in-flight wait's remaining time.
    ///
    /// Only meaningful while `Running`; no-op otherwise.
    pub fn pause(&self) {
        let mut s = self.state.borrow_mut();
        if s.status != RunStatus::Running {
            return;
        }
        s.status = RunStatus::Paused;
        if let Some(delay) = &s.active_delay {
            delay.borrow_mut().pause(Instant::now());
        }
    }

    /// Abort the session.
    ///
    /// Sets the sticky cancel flag and force-settles the in-flight wait, so
    /// the driver wakes immediately, observes cancellation at its next
    /// checkpoint, and unwinds without mutating anything else. Idempotent;
    /// no-op before the first `play` and after natural completion.
    pub fn reset(&self) {
        let mut s = self.state.borrow_mut();
        if !matches!(s.status, RunStatus::Running | RunStatus::Paused) {
            return;
        }
        s.cancel_requested = true;
        s.status = RunStatus::Cancelled;
        if let Some(delay) = s.active_delay.take() {
            delay.borrow_mut().cancel();
        }
    }

    /// Change the base step duration. Ignored while `Running`; only waits
    /// requested after the change are affected.
    pub fn set_speed(&self, speed: Duration) {
        let mut s = self.state.borrow_mut();
        if s.status == RunStatus::Running {
            return;
        }
        s.speed = speed;
    }

    /// Advance exactly one checkpoint while paused.
    ///
    /// Force-settles the frozen in-flight wait without cancelling the
    /// session; the driver runs to its next checkpoint, where the wait it
    /// requests is born paused again. No-op unless `Paused`.
    pub fn nudge(&self) {
        let s = self.state.borrow();
        if s.status != RunStatus::Paused {
            return;
        }
        if let Some(delay) = &s.active_delay {
            delay.borrow_mut().cancel();
        }
    }

    /// Request a wait of `factor` times the base step duration.
    ///
    /// Called by drivers between checkpoints; the returned [`StepWait`] is
    /// awaited and settles when the wait elapses. After cancellation the
    /// wait is already settled on creation, so the driver falls straight
    /// through to its cancellation check with no separate error branch.
    ///
    /// The new wait replaces any previously tracked one; at most one is ever
    /// in flight because drivers only request the next wait after the
    /// previous one settled.
    pub fn step(&self, factor: f64) -> StepWait {
        let mut s = self.state.borrow_mut();
        if s.cancel_requested {
            return StepWait {
                delay: None,
                handle: self.clone(),
            };
        }
        let duration = s.speed.mul_f64(factor);
        let now = Instant::now();
        let delay = if s.status == RunStatus::Paused {
            Delay::new_paused(duration, now)
        } else {
            Delay::new(duration, now)
        };
        let delay = Rc::new(RefCell::new(delay));
        s.active_delay = Some(Rc::clone(&delay));
        StepWait {
            delay: Some(delay),
            handle: self.clone(),
        }
    }

    /// Driver marks natural completion of its checkpoint sequence.
    ///
    /// Ignored if cancellation was requested first; a cancelled session
    /// stays `Cancelled`.
    pub fn finish(&self) {
        let mut s = self.state.borrow_mut();
        if s.cancel_requested {
            return;
        }
        if matches!(s.status, RunStatus::Running | RunStatus::Paused) {
            s.status = RunStatus::Completed;
            s.active_delay = None;
        }
    }

    /// Status of the in-flight wait, if any (diagnostics and tests)
    pub fn active_delay_status(&self) -> Option<DelayStatus> {
        self.state
            .borrow()
            .active_delay
            .as_ref()
            .map(|d| d.borrow().status())
    }
}

/// Completion signal for one requested wait.
///
/// Settles when the underlying [`Delay`] does, whether naturally, after any
/// number of pause/resume cycles, or immediately when the session was
/// cancelled.
/// The driver runtime polls once per UI tick, so no waker plumbing is needed;
/// `poll` simply checks the delay against the clock.
#[derive(Debug)]
pub struct StepWait {
    /// `None` when the session was already cancelled at request time
    delay: Option<Rc<RefCell<Delay>>>,
    handle: ExecHandle,
}

impl Future for StepWait {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        let settled = match &self.delay {
            None => true,
            Some(delay) => delay.borrow_mut().poll_settled(Instant::now()),
        };
        if !settled {
            return Poll::Pending;
        }
        // Drop the controller's reference so a settled wait can never be
        // touched by a later pause or nudge
        let mut s = self.handle.state.borrow_mut();
        if let (Some(mine), Some(active)) = (&self.delay, &s.active_delay) {
            if Rc::ptr_eq(mine, active) {
                s.active_delay = None;
            }
        }
        Poll::Ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;
    use std::task::Waker;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
        let mut cx = Context::from_waker(Waker::noop());
        fut.poll(&mut cx)
    }

    #[test]
    fn play_from_idle_starts_running() {
        let exec = ExecHandle::new(ms(100));
        assert_eq!(exec.status(), RunStatus::Idle);
        exec.play();
        assert_eq!(exec.status(), RunStatus::Running);

        // play while running is a no-op
        exec.play();
        assert_eq!(exec.status(), RunStatus::Running);
    }

    #[test]
    fn pause_requires_running() {
        let exec = ExecHandle::new(ms(100));
        exec.pause();
        assert_eq!(exec.status(), RunStatus::Idle);

        exec.play();
        exec.pause();
        assert_eq!(exec.status(), RunStatus::Paused);

        // double pause is a no-op
        exec.pause();
        assert_eq!(exec.status(), RunStatus::Paused);
    }

    #[test]
    fn paused_session_pauses_its_wait() {
        let exec = ExecHandle::new(ms(60_000));
        exec.play();
        let mut wait = pin!(exec.step(1.0));
        assert_eq!(exec.active_delay_status(), Some(DelayStatus::Running));

        exec.pause();
        assert_eq!(exec.active_delay_status(), Some(DelayStatus::Paused));
        assert!(poll_once(wait.as_mut()).is_pending());

        exec.play();
        assert_eq!(exec.active_delay_status(), Some(DelayStatus::Running));
    }

    #[test]
    fn wait_requested_while_paused_is_born_paused() {
        let exec = ExecHandle::new(ms(60_000));
        exec.play();
        exec.pause();
        let mut wait = pin!(exec.step(1.0));
        assert_eq!(exec.active_delay_status(), Some(DelayStatus::Paused));
        assert!(poll_once(wait.as_mut()).is_pending());

        // nudge force-settles the frozen wait without cancelling
        exec.nudge();
        assert!(poll_once(wait.as_mut()).is_ready());
        assert!(!exec.is_cancelled());
        assert_eq!(exec.status(), RunStatus::Paused);
    }

    #[test]
    fn nudge_outside_paused_is_noop() {
        let exec = ExecHandle::new(ms(60_000));
        exec.play();
        let mut wait = pin!(exec.step(1.0));
        exec.nudge();
        assert!(poll_once(wait.as_mut()).is_pending());
    }

    #[test]
    fn reset_cancels_in_flight_wait() {
        let exec = ExecHandle::new(ms(60_000));
        exec.play();
        let mut wait = pin!(exec.step(1.0));

        exec.reset();
        assert_eq!(exec.status(), RunStatus::Cancelled);
        assert!(exec.is_cancelled());
        assert!(poll_once(wait.as_mut()).is_ready());
        assert_eq!(exec.active_delay_status(), None);
    }

    #[test]
    fn reset_is_idempotent_and_noop_from_idle() {
        let exec = ExecHandle::new(ms(100));

        // reset before the first play leaves a clean idle session
        exec.reset();
        assert_eq!(exec.status(), RunStatus::Idle);
        assert!(!exec.is_cancelled());
        assert_eq!(exec.active_delay_status(), None);

        exec.play();
        exec.reset();
        exec.reset();
        assert_eq!(exec.status(), RunStatus::Cancelled);
        assert_eq!(exec.active_delay_status(), None);
    }

    #[test]
    fn wait_after_cancellation_settles_immediately() {
        let exec = ExecHandle::new(ms(60_000));
        exec.play();
        exec.reset();

        let mut wait = pin!(exec.step(1.0));
        assert!(poll_once(wait.as_mut()).is_ready());
        // the sticky flag stays set
        assert!(exec.is_cancelled());
    }

    #[test]
    fn zero_speed_wait_settles_on_first_poll() {
        let exec = ExecHandle::new(Duration::ZERO);
        exec.play();
        let mut wait = pin!(exec.step(1.0));
        assert!(poll_once(wait.as_mut()).is_ready());
        assert_eq!(exec.active_delay_status(), None);
    }

    #[test]
    fn set_speed_ignored_while_running() {
        let exec = ExecHandle::new(ms(100));
        exec.set_speed(ms(200));
        assert_eq!(exec.speed(), ms(200));

        exec.play();
        exec.set_speed(ms(500));
        assert_eq!(exec.speed(), ms(200));

        exec.pause();
        exec.set_speed(ms(50));
        assert_eq!(exec.speed(), ms(50));
    }

    #[test]
    fn finish_marks_completed_unless_cancelled() {
        let exec = ExecHandle::new(ms(100));
        exec.play();
        exec.finish();
        assert_eq!(exec.status(), RunStatus::Completed);
        assert!(RunStatus::Completed.is_terminal());

        // finish after reset keeps the session cancelled
        let exec = ExecHandle::new(ms(100));
        exec.play();
        exec.reset();
        exec.finish();
        assert_eq!(exec.status(), RunStatus::Cancelled);
    }

    #[test]
    fn step_factor_scales_base_duration() {
        let exec = ExecHandle::new(ms(100));
        exec.play();
        let wait = exec.step(1.5);
        match &wait.delay {
            Some(delay) => assert_eq!(delay.borrow().requested(), ms(150)),
            None => panic!("expected a live wait"),
        }
    }
}
