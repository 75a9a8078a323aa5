//! Two-pointer, sliding-window, hash-map and linked-list pattern drivers

use rustc_hash::FxHashMap;

use crate::engine::ExecHandle;
use crate::vis::{Marker, Outcome, SharedVis};

/// Walk two pointers inward over a sorted array to find a pair with the
/// given sum.
///
/// The input must already be sorted ascending.
pub async fn two_pointer(exec: ExecHandle, vis: SharedVis, target: i64) {
    let len = vis.borrow().values.len();
    if len < 2 {
        let mut v = vis.borrow_mut();
        v.note("need at least two elements for a pair");
        v.outcome = Some(Outcome::NotFound);
        drop(v);
        exec.finish();
        return;
    }

    let (mut lo, mut hi) = (0usize, len - 1);
    while lo < hi {
        let sum = {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark_range(0..lo, Marker::Discarded);
            v.mark_range(hi + 1..len, Marker::Discarded);
            v.mark(lo, Marker::Pointer);
            v.mark(hi, Marker::Pointer);
            v.compared();
            let sum = v.values[lo] + v.values[hi];
            v.note(format!(
                "a[{}] + a[{}] = {} vs target {}",
                lo, hi, sum, target
            ));
            sum
        };
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return;
        }
        match sum.cmp(&target) {
            std::cmp::Ordering::Equal => {
                let mut v = vis.borrow_mut();
                v.mark(lo, Marker::Found);
                v.mark(hi, Marker::Found);
                v.note(format!("pair found at indices {} and {}", lo, hi));
                v.outcome = Some(Outcome::PairAt(lo, hi));
                drop(v);
                exec.finish();
                return;
            }
            std::cmp::Ordering::Less => lo += 1,
            std::cmp::Ordering::Greater => hi -= 1,
        }
    }

    let mut v = vis.borrow_mut();
    v.clear_markers();
    v.note(format!("no pair sums to {}", target));
    v.outcome = Some(Outcome::NotFound);
    drop(v);
    exec.finish();
}

/// Slide a fixed-length window across the array, tracking the largest sum
pub async fn sliding_window(exec: ExecHandle, vis: SharedVis, window: usize) {
    let len = vis.borrow().values.len();
    if len == 0 {
        let mut v = vis.borrow_mut();
        v.note("empty array");
        v.outcome = Some(Outcome::NotFound);
        drop(v);
        exec.finish();
        return;
    }
    let k = window.clamp(1, len);

    let mut sum: i64 = {
        let mut v = vis.borrow_mut();
        let sum = v.values[..k].iter().sum();
        v.clear_markers();
        v.mark_range(0..k, Marker::Window);
        v.note(format!("initial window [0..{}) sum {}", k, sum));
        sum
    };
    exec.step(1.0).await;
    if exec.is_cancelled() {
        return;
    }

    let (mut best_sum, mut best_start) = (sum, 0usize);
    for start in 1..=len - k {
        let improved = {
            let mut v = vis.borrow_mut();
            sum += v.values[start + k - 1] - v.values[start - 1];
            v.clear_markers();
            v.mark(start - 1, Marker::Discarded);
            v.mark_range(start..start + k, Marker::Window);
            v.mark(start + k - 1, Marker::Compare);
            v.compared();
            let improved = sum > best_sum;
            let suffix = if improved { " (new best)" } else { "" };
            v.note(format!(
                "slide to [{}..{}): sum {}{}",
                start,
                start + k,
                sum,
                suffix
            ));
            improved
        };
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return;
        }
        if improved {
            best_sum = sum;
            best_start = start;
        }
    }

    let mut v = vis.borrow_mut();
    v.clear_markers();
    v.mark_range(best_start..best_start + k, Marker::Found);
    v.note(format!(
        "best window [{}..{}) with sum {}",
        best_start,
        best_start + k,
        best_sum
    ));
    v.outcome = Some(Outcome::WindowAt {
        start: best_start,
        len: k,
        sum: best_sum,
    });
    drop(v);
    exec.finish();
}

/// Find a pair with the given sum in one pass over a hash map of seen values
pub async fn two_sum(exec: ExecHandle, vis: SharedVis, target: i64) {
    let len = vis.borrow().values.len();
    let mut seen: FxHashMap<i64, usize> = FxHashMap::default();

    for i in 0..len {
        let (value, partner) = {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark_range(0..i, Marker::Window);
            v.mark(i, Marker::Compare);
            v.compared();
            let value = v.values[i];
            let complement = target - value;
            let partner = seen.get(&complement).copied();
            match partner {
                Some(j) => v.note(format!(
                    "a[{}] = {}, complement {} seen at index {}",
                    i, value, complement, j
                )),
                None => v.note(format!(
                    "a[{}] = {}, complement {} not seen yet",
                    i, value, complement
                )),
            }
            (value, partner)
        };
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return;
        }
        if let Some(j) = partner {
            let mut v = vis.borrow_mut();
            v.mark(j, Marker::Found);
            v.mark(i, Marker::Found);
            v.note(format!("pair found at indices {} and {}", j, i));
            v.outcome = Some(Outcome::PairAt(j, i));
            drop(v);
            exec.finish();
            return;
        }
        seen.insert(value, i);
    }

    let mut v = vis.borrow_mut();
    v.clear_markers();
    v.note(format!("no pair sums to {}", target));
    v.outcome = Some(Outcome::NotFound);
    drop(v);
    exec.finish();
}

/// Next node of the chain, or `None` when the value points off the end
fn next_index(values: &[i64], i: usize) -> Option<usize> {
    let n = values[i];
    if n >= 0 && (n as usize) < values.len() {
        Some(n as usize)
    } else {
        None
    }
}

/// Floyd's tortoise and hare over a next-index chain starting at index 0.
///
/// Each value is read as the index of the next node; a value outside
/// `0..len` ends the chain. The slow pointer advances one node per step, the
/// fast pointer two; if they meet the chain has a cycle.
pub async fn cycle_detect(exec: ExecHandle, vis: SharedVis) {
    if vis.borrow().values.is_empty() {
        let mut v = vis.borrow_mut();
        v.note("empty chain");
        v.outcome = Some(Outcome::NoCycle);
        drop(v);
        exec.finish();
        return;
    }

    let (mut slow, mut fast) = (0usize, 0usize);
    loop {
        let advanced = {
            let v = vis.borrow();
            let s = next_index(&v.values, slow);
            let f = next_index(&v.values, fast).and_then(|m| next_index(&v.values, m));
            (s, f)
        };
        let (Some(s), Some(f)) = advanced else {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.note("chain reached the end: no cycle");
            v.outcome = Some(Outcome::NoCycle);
            drop(v);
            exec.finish();
            return;
        };
        slow = s;
        fast = f;

        {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark(slow, Marker::Pointer);
            v.mark(fast, Marker::Compare);
            v.compared();
            v.note(format!("slow -> {}, fast -> {}", slow, fast));
        }
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return;
        }

        if slow == fast {
            let mut v = vis.borrow_mut();
            v.mark(slow, Marker::Found);
            v.note(format!("pointers met at index {}: cycle", slow));
            v.outcome = Some(Outcome::CycleAt(slow));
            drop(v);
            exec.finish();
            return;
        }
    }
}
