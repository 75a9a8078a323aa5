// Integration tests for the step-execution engine

use std::future::Future;
use std::pin::{pin, Pin};
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use algotty::engine::{Delay, DelayStatus, ExecHandle, RunStatus};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}

#[test]
fn delay_settles_after_real_elapse() {
    // One real-clock test; everything else injects instants
    let mut delay = Delay::new(ms(40), Instant::now());
    assert!(!delay.poll_settled(Instant::now()));
    std::thread::sleep(ms(60));
    assert!(delay.poll_settled(Instant::now()));
}

#[test]
fn pause_resume_keeps_exact_running_time() {
    let t0 = Instant::now();
    let mut delay = Delay::new(ms(1000), t0);

    // Pause after 300ms of running time
    delay.pause(t0 + ms(300));
    assert_eq!(delay.remaining(), ms(700));

    // The pause itself lasts an arbitrary real interval
    let t1 = t0 + ms(987_654);
    delay.resume(t1);

    // The step still takes exactly 1000ms of running time in total
    assert!(!delay.poll_settled(t1 + ms(699)));
    assert!(delay.poll_settled(t1 + ms(700)));
}

#[test]
fn three_pause_resume_cycles_do_not_drift() {
    let t0 = Instant::now();
    let mut delay = Delay::new(ms(900), t0);
    let mut clock = t0;

    for _ in 0..3 {
        clock += ms(200);
        delay.pause(clock);
        clock += ms(44_000); // arbitrary gap while paused
        delay.resume(clock);
    }
    // 3 x 200ms of running time consumed, 300ms left
    assert_eq!(delay.status(), DelayStatus::Running);
    assert!(!delay.poll_settled(clock + ms(299)));
    assert!(delay.poll_settled(clock + ms(300)));
}

#[test]
fn cancellation_is_immediate_and_exactly_once() {
    let t0 = Instant::now();
    let mut delay = Delay::new(ms(10_000), t0);

    delay.cancel();
    assert_eq!(delay.status(), DelayStatus::Settled);
    assert!(delay.poll_settled(t0));

    // Second cancel and later polls observe the same settled state; nothing
    // fires again
    delay.cancel();
    assert!(delay.poll_settled(t0 + ms(20_000)));
    assert_eq!(delay.status(), DelayStatus::Settled);
}

#[test]
fn controller_pause_freezes_and_play_resumes_same_wait() {
    let exec = ExecHandle::new(ms(60_000));
    exec.play();
    assert_eq!(exec.status(), RunStatus::Running);

    let mut wait = pin!(exec.step(1.0));
    assert!(poll_once(wait.as_mut()).is_pending());

    exec.pause();
    assert_eq!(exec.status(), RunStatus::Paused);
    assert_eq!(exec.active_delay_status(), Some(DelayStatus::Paused));
    assert!(poll_once(wait.as_mut()).is_pending());

    exec.play();
    assert_eq!(exec.status(), RunStatus::Running);
    assert_eq!(exec.active_delay_status(), Some(DelayStatus::Running));
}

#[test]
fn reset_settles_wait_and_poisons_future_requests() {
    let exec = ExecHandle::new(ms(60_000));
    exec.play();
    let mut wait = pin!(exec.step(1.0));

    exec.reset();
    assert_eq!(exec.status(), RunStatus::Cancelled);
    assert!(exec.is_cancelled());
    assert!(poll_once(wait.as_mut()).is_ready());

    // Any wait requested after cancellation is already settled
    let mut late = pin!(exec.step(1.0));
    assert!(poll_once(late.as_mut()).is_ready());
    assert_eq!(exec.active_delay_status(), None);
}

#[test]
fn reset_is_idempotent() {
    let exec = ExecHandle::new(ms(100));

    // From idle: clean no-op
    exec.reset();
    exec.reset();
    assert_eq!(exec.status(), RunStatus::Idle);
    assert!(!exec.is_cancelled());
    assert_eq!(exec.active_delay_status(), None);

    // From running: first reset cancels, second changes nothing
    exec.play();
    exec.reset();
    exec.reset();
    assert_eq!(exec.status(), RunStatus::Cancelled);
    assert_eq!(exec.active_delay_status(), None);
}

#[test]
fn mashing_controls_never_corrupts_the_session() {
    let exec = ExecHandle::new(ms(60_000));

    // Pause before anything runs, play twice, pause twice
    exec.pause();
    exec.play();
    exec.play();
    assert_eq!(exec.status(), RunStatus::Running);

    let _wait = exec.step(1.0);
    exec.pause();
    exec.pause();
    assert_eq!(exec.status(), RunStatus::Paused);
    assert_eq!(exec.active_delay_status(), Some(DelayStatus::Paused));

    exec.play();
    exec.play();
    assert_eq!(exec.status(), RunStatus::Running);
}

#[test]
fn speed_changes_are_locked_while_running() {
    let exec = ExecHandle::new(ms(300));
    exec.play();
    exec.set_speed(ms(100));
    assert_eq!(exec.speed(), ms(300));

    exec.pause();
    exec.set_speed(ms(100));
    assert_eq!(exec.speed(), ms(100));

    // New waits use the new base duration
    let wait = exec.step(2.0);
    let mut wait = pin!(wait);
    assert!(poll_once(wait.as_mut()).is_pending());
    assert_eq!(exec.active_delay_status(), Some(DelayStatus::Paused));
}

#[test]
fn nudge_advances_exactly_one_wait_without_cancelling() {
    let exec = ExecHandle::new(ms(60_000));
    exec.play();
    exec.pause();

    let mut first = pin!(exec.step(1.0));
    assert!(poll_once(first.as_mut()).is_pending());

    exec.nudge();
    assert!(poll_once(first.as_mut()).is_ready());
    assert!(!exec.is_cancelled());

    // The next wait is frozen again until the next nudge
    let mut second = pin!(exec.step(1.0));
    assert!(poll_once(second.as_mut()).is_pending());
    assert_eq!(exec.active_delay_status(), Some(DelayStatus::Paused));
}
