//! # Introduction
//!
//! algotty animates classic algorithms step by step in the terminal: the
//! working array is drawn as colored bars, and the algorithm advances one
//! observable step at a time with a pause between steps, so you can watch
//! comparisons, swaps, and pointers move.
//!
//! ## Playback pipeline
//!
//! ```text
//! Input → AlgorithmDriver → checkpoints → Engine (Delay + Controller) → TUI
//! ```
//!
//! 1. [`engine`]: the step-execution core, a pausable, cancellable
//!    [`engine::Delay`] and the per-session [`engine::ExecHandle`] state
//!    machine that owns it. Pausing banks the remaining wait time; resuming
//!    continues the *same* wait; reset cancels cooperatively with no stray
//!    timers left behind.
//! 2. [`drivers`]: one `async fn` per algorithm (searching, sorting,
//!    two-pointer, sliding-window, hash-map, linked-list patterns), each
//!    written against the engine's checkpoint contract: mutate, await a
//!    step, check for cancellation.
//! 3. [`vis`]: the observable state a driver publishes at each checkpoint:
//!    bar values, per-index markers, a step log, counters, and the final
//!    outcome.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Linear and binary search; bubble, selection, insertion, merge, and quick
//! sort; two-pointer pair sum; sliding-window max sum; hash-map two-sum;
//! fast/slow cycle detection.

pub mod drivers;
pub mod engine;
pub mod ui;
pub mod vis;
