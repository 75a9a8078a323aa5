//! Algorithm drivers
//!
//! Each driver is a plain `async fn` that walks its algorithm one checkpoint
//! at a time: mutate the shared [`VisState`], await a wait from the
//! [`ExecHandle`], then check for cancellation before touching anything else.
//! Recursive drivers (merge sort, quick sort) re-check cancellation at every
//! recursive call boundary as well, so a reset unwinds the whole recursion
//! tree promptly.
//!
//! The engine knows nothing about the algorithms; this module's [`Algorithm`]
//! registry is how the CLI and the UI name, describe, and spawn them.

pub mod patterns;
pub mod search;
pub mod sort_recursive;
pub mod sort_simple;

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Waker};
use std::time::Duration;

use crate::engine::{ExecHandle, RunStatus};
use crate::vis::{Marker, Outcome, SharedVis, VisState};

/// Boxed driver future; single-threaded, polled once per UI tick
pub type DriverFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Extra inputs a driver may need beyond the working array
#[derive(Debug, Clone, Copy)]
pub struct DriverParams {
    /// Search target, or the sum a pair must reach
    pub target: i64,

    /// Sliding window length
    pub window: usize,
}

impl DriverParams {
    /// Suggest sensible parameters for the given (already prepared) input:
    /// a target that is actually present for searches, a reachable pair sum,
    /// and a window of about a third of the array.
    pub fn suggest(algorithm: Algorithm, values: &[i64]) -> DriverParams {
        let target = match algorithm {
            Algorithm::LinearSearch | Algorithm::BinarySearch => {
                values.get(values.len() * 2 / 3).copied().unwrap_or(0)
            }
            Algorithm::TwoPointer | Algorithm::TwoSum => match (values.first(), values.last()) {
                (Some(a), Some(b)) if values.len() >= 2 => a + b,
                _ => 0,
            },
            _ => 0,
        };
        let window = (values.len() / 3).max(1);
        DriverParams { target, window }
    }
}

/// The algorithms algotty can animate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    TwoPointer,
    SlidingWindow,
    TwoSum,
    CycleDetect,
}

impl Algorithm {
    /// Every animatable algorithm, in menu order
    pub const ALL: [Algorithm; 11] = [
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::TwoPointer,
        Algorithm::SlidingWindow,
        Algorithm::TwoSum,
        Algorithm::CycleDetect,
    ];

    /// CLI name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::LinearSearch => "linear-search",
            Algorithm::BinarySearch => "binary-search",
            Algorithm::BubbleSort => "bubble-sort",
            Algorithm::SelectionSort => "selection-sort",
            Algorithm::InsertionSort => "insertion-sort",
            Algorithm::MergeSort => "merge-sort",
            Algorithm::QuickSort => "quick-sort",
            Algorithm::TwoPointer => "two-pointer",
            Algorithm::SlidingWindow => "sliding-window",
            Algorithm::TwoSum => "two-sum",
            Algorithm::CycleDetect => "cycle-detect",
        }
    }

    /// Human-readable title for the info pane
    pub fn title(self) -> &'static str {
        match self {
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::SelectionSort => "Selection Sort",
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::TwoPointer => "Two Pointers",
            Algorithm::SlidingWindow => "Sliding Window",
            Algorithm::TwoSum => "Two Sum (hash map)",
            Algorithm::CycleDetect => "Cycle Detection",
        }
    }

    /// One-line description for the info pane and `--list`
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::LinearSearch => "Scan left to right until the target is found.",
            Algorithm::BinarySearch => "Halve a sorted range around the middle element.",
            Algorithm::BubbleSort => "Bubble larger neighbours to the right, pass by pass.",
            Algorithm::SelectionSort => "Select the minimum of the unsorted suffix each pass.",
            Algorithm::InsertionSort => "Insert each element into the sorted prefix.",
            Algorithm::MergeSort => "Sort halves recursively, then merge them.",
            Algorithm::QuickSort => "Partition around a pivot, then recurse on both sides.",
            Algorithm::TwoPointer => "Walk two pointers inward to find a pair with a given sum.",
            Algorithm::SlidingWindow => "Slide a fixed window to find the largest sum.",
            Algorithm::TwoSum => "Find a pair with a given sum using one hash-map pass.",
            Algorithm::CycleDetect => "Race fast and slow pointers over a next-index chain.",
        }
    }

    /// Parse a CLI name
    pub fn parse(name: &str) -> Option<Algorithm> {
        Algorithm::ALL.iter().copied().find(|a| a.name() == name)
    }

    /// Whether the driver requires its input sorted ascending
    pub fn needs_sorted_input(self) -> bool {
        matches!(self, Algorithm::BinarySearch | Algorithm::TwoPointer)
    }

    /// Whether the driver consumes [`DriverParams::target`]
    pub fn uses_target(self) -> bool {
        matches!(
            self,
            Algorithm::LinearSearch
                | Algorithm::BinarySearch
                | Algorithm::TwoPointer
                | Algorithm::TwoSum
        )
    }

    /// Whether the driver consumes [`DriverParams::window`]
    pub fn uses_window(self) -> bool {
        self == Algorithm::SlidingWindow
    }

    /// Whether the bars represent next-indices rather than magnitudes
    pub fn input_is_chain(self) -> bool {
        self == Algorithm::CycleDetect
    }

    /// Put raw input values into the form the driver expects (sorts them for
    /// the algorithms that require it)
    pub fn prepare_input(self, values: &mut [i64]) {
        if self.needs_sorted_input() {
            values.sort_unstable();
        }
    }

    /// Box up the driver future for one session
    pub fn spawn(self, exec: ExecHandle, vis: SharedVis, params: DriverParams) -> DriverFuture {
        match self {
            Algorithm::LinearSearch => Box::pin(search::linear_search(exec, vis, params.target)),
            Algorithm::BinarySearch => Box::pin(search::binary_search(exec, vis, params.target)),
            Algorithm::BubbleSort => Box::pin(sort_simple::bubble_sort(exec, vis)),
            Algorithm::SelectionSort => Box::pin(sort_simple::selection_sort(exec, vis)),
            Algorithm::InsertionSort => Box::pin(sort_simple::insertion_sort(exec, vis)),
            Algorithm::MergeSort => Box::pin(sort_recursive::merge_sort(exec, vis)),
            Algorithm::QuickSort => Box::pin(sort_recursive::quick_sort(exec, vis)),
            Algorithm::TwoPointer => Box::pin(patterns::two_pointer(exec, vis, params.target)),
            Algorithm::SlidingWindow => Box::pin(patterns::sliding_window(exec, vis, params.window)),
            Algorithm::TwoSum => Box::pin(patterns::two_sum(exec, vis, params.target)),
            Algorithm::CycleDetect => Box::pin(patterns::cycle_detect(exec, vis)),
        }
    }
}

/// Generate pedagogically useful random input for an algorithm: bar heights
/// in 1..=99, or candidate next-indices for the chain algorithms.
///
/// Plain xorshift; `seed` must be non-zero and is advanced in place.
pub fn random_values(seed: &mut u64, len: usize, algorithm: Algorithm) -> Vec<i64> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        *seed ^= *seed << 13;
        *seed ^= *seed >> 7;
        *seed ^= *seed << 17;
        let value = if algorithm.input_is_chain() {
            // a little headroom past len so chains can fall off the end
            (*seed % (len as u64 + 3)) as i64
        } else {
            (*seed % 99) as i64 + 1
        };
        out.push(value);
    }
    out
}

/// One playback session: the engine handle, the driver's shared
/// visualization state, and the driver future itself.
///
/// A session is created fresh for every run ("reset", "new array", replay):
/// the previous session's controller and future are dropped wholesale, so no
/// wait scheduled by an old run can ever fire into a new one.
pub struct Session {
    /// Controller for this run
    pub exec: ExecHandle,

    /// Visualization state the driver publishes into
    pub vis: SharedVis,

    /// The suspended driver; `None` once it has run to its end
    task: Option<DriverFuture>,
}

impl Session {
    /// Create an idle session for the given prepared input
    pub fn new(
        algorithm: Algorithm,
        values: Vec<i64>,
        params: DriverParams,
        speed: Duration,
    ) -> Self {
        let exec = ExecHandle::new(speed);
        let vis = VisState::shared(values);
        let task = Some(algorithm.spawn(exec.clone(), Rc::clone(&vis), params));
        Session { exec, vis, task }
    }

    /// Poll the driver one tick forward.
    ///
    /// Does nothing while the session is still idle (the driver must not
    /// reach its first checkpoint before `play`). Polling while paused is
    /// harmless: every wait reports pending until it settles. No waker is
    /// needed because the UI loop polls every tick.
    pub fn poll(&mut self) {
        if self.exec.status() == RunStatus::Idle {
            return;
        }
        if let Some(task) = &mut self.task {
            let mut cx = Context::from_waker(Waker::noop());
            if task.as_mut().poll(&mut cx).is_ready() {
                self.task = None;
            }
        }
    }

    /// Whether the driver future has run to its end (completed or unwound
    /// after cancellation)
    pub fn is_finished(&self) -> bool {
        self.task.is_none()
    }
}

/// Publish the "fully sorted" ending shared by all sort drivers
pub(crate) fn finish_sorted(exec: &ExecHandle, vis: &SharedVis) {
    let mut v = vis.borrow_mut();
    v.clear_markers();
    let len = v.values.len();
    v.mark_range(0..len, Marker::Sorted);
    v.note("array fully sorted");
    v.outcome = Some(Outcome::Sorted);
    exec.finish();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_name() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::parse(algorithm.name()), Some(algorithm));
        }
        assert_eq!(Algorithm::parse("bogo-sort"), None);
    }

    #[test]
    fn prepare_input_sorts_only_where_required() {
        let mut values = vec![3, 1, 2];
        Algorithm::BinarySearch.prepare_input(&mut values);
        assert_eq!(values, vec![1, 2, 3]);

        let mut values = vec![3, 1, 2];
        Algorithm::BubbleSort.prepare_input(&mut values);
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn random_values_stay_in_range() {
        let mut seed = 0x00ff_1234_5678_9abc;
        let values = random_values(&mut seed, 64, Algorithm::BubbleSort);
        assert_eq!(values.len(), 64);
        assert!(values.iter().all(|v| (1..=99).contains(v)));

        let chain = random_values(&mut seed, 10, Algorithm::CycleDetect);
        assert!(chain.iter().all(|v| (0..13).contains(v)));
    }

    #[test]
    fn suggested_search_target_is_present() {
        let values = vec![10, 20, 30, 40, 50];
        let params = DriverParams::suggest(Algorithm::BinarySearch, &values);
        assert!(values.contains(&params.target));
    }
}
