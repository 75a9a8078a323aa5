//! The step-execution engine
//!
//! Two pieces, the second built on the first:
//!
//! - [`delay`]: a single cancellable, pausable timed wait. Pausing banks the
//!   unelapsed time; resuming continues the *same* wait, so a step that asks
//!   for `D` ms of running time always gets exactly `D` ms of running time no
//!   matter how often or how long it is paused.
//! - [`controller`]: the per-session state machine
//!   (`Idle → Running ⇄ Paused → Completed | Cancelled`) that owns the single
//!   in-flight delay and the sticky cancellation flag. Algorithm drivers
//!   request waits and check cancellation through it; the UI plays, pauses
//!   and resets through it.
//!
//! The engine knows nothing about any particular algorithm; drivers live in
//! [`crate::drivers`] and talk to the engine only through [`ExecHandle`].

pub mod controller;
pub mod delay;

pub use controller::{ExecHandle, RunStatus, StepWait};
pub use delay::{Delay, DelayStatus};
