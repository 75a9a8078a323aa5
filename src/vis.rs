//! Observable visualization state published by algorithm drivers
//!
//! A driver owns a [`VisState`] (shared single-threaded via [`SharedVis`])
//! and mutates it at each checkpoint: bar values, per-index markers, a step
//! log line, and the running comparison/write counters. The UI only reads
//! it. The engine never sees it at all.

use std::cell::RefCell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Per-index marker, rendered as a bar color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    /// No special role this step
    #[default]
    Plain,
    /// Element being compared/inspected
    Compare,
    /// Element being swapped or written
    Swap,
    /// Current pivot (quick sort)
    Pivot,
    /// A moving pointer (two-pointer, fast/slow)
    Pointer,
    /// Inside the active range or window
    Window,
    /// Known to be in final sorted position
    Sorted,
    /// The element the algorithm was looking for
    Found,
    /// Eliminated from consideration
    Discarded,
}

/// Final result a driver publishes when it completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Search target located at this index
    FoundAt(usize),
    /// Search target is not in the array
    NotFound,
    /// The array is fully sorted
    Sorted,
    /// A pair of indices satisfying the goal (two-pointer, two-sum)
    PairAt(usize, usize),
    /// Best window located
    WindowAt { start: usize, len: usize, sum: i64 },
    /// Fast/slow pointers met inside a cycle at this index
    CycleAt(usize),
    /// The chain terminates without a cycle
    NoCycle,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::FoundAt(i) => write!(f, "Found at index {}", i),
            Outcome::NotFound => write!(f, "Not found"),
            Outcome::Sorted => write!(f, "Fully sorted"),
            Outcome::PairAt(i, j) => write!(f, "Pair at indices {} and {}", i, j),
            Outcome::WindowAt { start, len, sum } => {
                write!(f, "Best window [{}..{}), sum {}", start, start + len, sum)
            }
            Outcome::CycleAt(i) => write!(f, "Cycle detected at index {}", i),
            Outcome::NoCycle => write!(f, "No cycle"),
        }
    }
}

/// Shared handle to a driver's visualization state (single-threaded)
pub type SharedVis = Rc<RefCell<VisState>>;

/// The observable state of one algorithm run
#[derive(Debug)]
pub struct VisState {
    /// The working array (bar heights)
    pub values: Vec<i64>,

    /// One marker per index, replaced wholesale at each checkpoint
    pub markers: Vec<Marker>,

    /// Append-only step log, one line per checkpoint
    pub log: Vec<String>,

    /// Number of element comparisons performed so far
    pub comparisons: usize,

    /// Number of element writes/swaps performed so far
    pub writes: usize,

    /// Final result, published once on completion
    pub outcome: Option<Outcome>,
}

impl VisState {
    /// Create fresh state for the given working array
    pub fn new(values: Vec<i64>) -> Self {
        let markers = vec![Marker::Plain; values.len()];
        VisState {
            values,
            markers,
            log: Vec::new(),
            comparisons: 0,
            writes: 0,
            outcome: None,
        }
    }

    /// Create fresh state behind a shared handle
    pub fn shared(values: Vec<i64>) -> SharedVis {
        Rc::new(RefCell::new(VisState::new(values)))
    }

    /// Number of checkpoints recorded so far
    pub fn steps(&self) -> usize {
        self.log.len()
    }

    /// Clear all markers back to plain
    pub fn clear_markers(&mut self) {
        self.markers.fill(Marker::Plain);
    }

    /// Mark a single index (out-of-range indices are ignored)
    pub fn mark(&mut self, index: usize, marker: Marker) {
        if let Some(slot) = self.markers.get_mut(index) {
            *slot = marker;
        }
    }

    /// Mark every index in a range
    pub fn mark_range(&mut self, range: Range<usize>, marker: Marker) {
        for index in range {
            self.mark(index, marker);
        }
    }

    /// Append a step log line
    pub fn note(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Count one comparison
    pub fn compared(&mut self) {
        self.comparisons += 1;
    }

    /// Swap two elements, counting the writes
    pub fn swap(&mut self, i: usize, j: usize) {
        if i != j {
            self.values.swap(i, j);
            self.writes += 2;
        }
    }

    /// Overwrite one element, counting the write
    pub fn write(&mut self, index: usize, value: i64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
            self.writes += 1;
        }
    }
}
