//! The pausable wait primitive
//!
//! A [`Delay`] is a single timed wait between two algorithm steps. It can be
//! frozen mid-flight ([`Delay::pause`]), continued from exactly where it froze
//! ([`Delay::resume`]), or forced to settle immediately ([`Delay::cancel`]).
//!
//! Time is injected: every time-sensitive operation takes a `now: Instant`
//! argument instead of reading the clock itself, so tests can drive a delay
//! through arbitrary pause/resume schedules without sleeping.
//!
//! All operations are safe no-ops when called in a state where they don't
//! apply (pausing a settled delay, cancelling twice, ...). A delay settles
//! exactly once; once settled it never un-settles.

use std::time::{Duration, Instant};

/// Lifecycle state of a [`Delay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStatus {
    /// The wait is counting down against the wall clock
    Running,
    /// The wait is frozen; `remaining` holds the banked time left
    Paused,
    /// The wait has completed (naturally or by force) and will never fire again
    Settled,
}

/// A single cancellable, pausable timed wait
#[derive(Debug)]
pub struct Delay {
    /// The full wait requested at creation
    requested: Duration,

    /// Time left to wait; recomputed only when transitioning into `Paused`
    remaining: Duration,

    /// When the delay last started (or resumed) running
    started_at: Instant,

    /// Lifecycle state
    status: DelayStatus,
}

impl Delay {
    /// Create a delay that starts running immediately.
    ///
    /// A zero-duration delay still goes through the normal completion path:
    /// it reports settlement on its first [`Delay::poll_settled`].
    pub fn new(requested: Duration, now: Instant) -> Self {
        Delay {
            requested,
            remaining: requested,
            started_at: now,
            status: DelayStatus::Running,
        }
    }

    /// Create a delay that is born frozen with its full duration banked.
    ///
    /// Used when a wait is requested while the session is paused: the wait
    /// exists (so resume and single-step have something to act on) but no
    /// time elapses against it until it is resumed.
    pub fn new_paused(requested: Duration, now: Instant) -> Self {
        Delay {
            requested,
            remaining: requested,
            started_at: now,
            status: DelayStatus::Paused,
        }
    }

    /// The full wait requested at creation
    pub fn requested(&self) -> Duration {
        self.requested
    }

    /// Time left to wait as of the last pause (meaningful while `Paused`)
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Current lifecycle state
    pub fn status(&self) -> DelayStatus {
        self.status
    }

    /// Freeze the wait, banking the unelapsed time.
    ///
    /// No-op unless the delay is running.
    pub fn pause(&mut self, now: Instant) {
        if self.status != DelayStatus::Running {
            return;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.status = DelayStatus::Paused;
    }

    /// Continue the same wait from where it froze.
    ///
    /// The delay reschedules for exactly the banked remaining time, never the
    /// original full duration; repeated pause/resume cycles therefore neither
    /// lose nor re-add wait time. A resume with nothing left settles
    /// immediately. No-op unless the delay is paused.
    pub fn resume(&mut self, now: Instant) {
        if self.status != DelayStatus::Paused {
            return;
        }
        self.started_at = now;
        if self.remaining.is_zero() {
            self.status = DelayStatus::Settled;
        } else {
            self.status = DelayStatus::Running;
        }
    }

    /// Force settlement now, regardless of remaining time.
    ///
    /// Valid from `Running` or `Paused`; cancelling an already-settled delay
    /// is a no-op.
    pub fn cancel(&mut self) {
        self.status = DelayStatus::Settled;
    }

    /// Check whether the wait has elapsed, transitioning into `Settled` when
    /// it has.
    ///
    /// Paused delays never settle on their own. Returns `true` once settled
    /// (and on every later poll: settlement is sticky, it just never
    /// re-fires).
    pub fn poll_settled(&mut self, now: Instant) -> bool {
        match self.status {
            DelayStatus::Settled => true,
            DelayStatus::Paused => false,
            DelayStatus::Running => {
                if now.saturating_duration_since(self.started_at) >= self.remaining {
                    self.status = DelayStatus::Settled;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn natural_elapse() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(1000), t0);

        assert_eq!(d.status(), DelayStatus::Running);
        assert!(!d.poll_settled(t0 + ms(999)));
        assert!(d.poll_settled(t0 + ms(1000)));
        assert_eq!(d.status(), DelayStatus::Settled);

        // Settlement is sticky
        assert!(d.poll_settled(t0 + ms(5000)));
    }

    #[test]
    fn zero_duration_settles_on_first_poll() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(0), t0);
        assert_eq!(d.status(), DelayStatus::Running);
        assert!(d.poll_settled(t0));
        assert_eq!(d.status(), DelayStatus::Settled);
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(1000), t0);

        d.pause(t0 + ms(300));
        assert_eq!(d.status(), DelayStatus::Paused);
        assert_eq!(d.remaining(), ms(700));

        // An arbitrarily long real-world gap elapses while paused
        assert!(!d.poll_settled(t0 + ms(60_000)));

        let t1 = t0 + ms(90_000);
        d.resume(t1);
        assert_eq!(d.status(), DelayStatus::Running);
        assert!(!d.poll_settled(t1 + ms(699)));
        assert!(d.poll_settled(t1 + ms(700)));
    }

    #[test]
    fn repeated_pause_resume_preserves_total_running_time() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(1000), t0);

        // Run 100ms, pause for 5s
        d.pause(t0 + ms(100));
        assert_eq!(d.remaining(), ms(900));
        let t1 = t0 + ms(5100);
        d.resume(t1);

        // Run 400ms more, pause for 1h
        d.pause(t1 + ms(400));
        assert_eq!(d.remaining(), ms(500));
        let t2 = t1 + ms(3_600_000);
        d.resume(t2);

        // Run 250ms more, pause again
        d.pause(t2 + ms(250));
        assert_eq!(d.remaining(), ms(250));
        let t3 = t2 + ms(10_000);
        d.resume(t3);

        // Total running time across all segments is exactly the original 1000ms
        assert!(!d.poll_settled(t3 + ms(249)));
        assert!(d.poll_settled(t3 + ms(250)));
    }

    #[test]
    fn pause_past_deadline_clamps_remaining_to_zero() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(100), t0);

        // Paused after the deadline would have fired but before anyone polled
        d.pause(t0 + ms(500));
        assert_eq!(d.remaining(), ms(0));

        // Resuming with nothing left settles immediately
        d.resume(t0 + ms(600));
        assert_eq!(d.status(), DelayStatus::Settled);
    }

    #[test]
    fn cancel_settles_immediately_and_is_idempotent() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(1000), t0);

        d.cancel();
        assert_eq!(d.status(), DelayStatus::Settled);
        assert!(d.poll_settled(t0 + ms(1)));

        // Second cancel has no further effect
        d.cancel();
        assert_eq!(d.status(), DelayStatus::Settled);
    }

    #[test]
    fn cancel_from_paused() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(1000), t0);
        d.pause(t0 + ms(100));
        d.cancel();
        assert_eq!(d.status(), DelayStatus::Settled);
    }

    #[test]
    fn misuse_is_noop() {
        let t0 = Instant::now();
        let mut d = Delay::new(ms(1000), t0);

        // Resume while running: no-op
        d.resume(t0 + ms(100));
        assert_eq!(d.status(), DelayStatus::Running);

        // Double pause: second is a no-op, remaining unchanged
        d.pause(t0 + ms(300));
        d.pause(t0 + ms(800));
        assert_eq!(d.remaining(), ms(700));

        // Pause after settlement: no-op
        d.cancel();
        d.pause(t0 + ms(900));
        assert_eq!(d.status(), DelayStatus::Settled);
        d.resume(t0 + ms(900));
        assert_eq!(d.status(), DelayStatus::Settled);
    }

    #[test]
    fn born_paused_banks_full_duration() {
        let t0 = Instant::now();
        let mut d = Delay::new_paused(ms(400), t0);

        assert_eq!(d.status(), DelayStatus::Paused);
        assert!(!d.poll_settled(t0 + ms(10_000)));
        assert_eq!(d.remaining(), ms(400));

        let t1 = t0 + ms(10_000);
        d.resume(t1);
        assert!(!d.poll_settled(t1 + ms(399)));
        assert!(d.poll_settled(t1 + ms(400)));
    }
}
