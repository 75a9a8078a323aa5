//! Search drivers: linear scan and binary search

use crate::engine::ExecHandle;
use crate::vis::{Marker, Outcome, SharedVis};

/// Scan left to right until the target is found
pub async fn linear_search(exec: ExecHandle, vis: SharedVis, target: i64) {
    let len = vis.borrow().values.len();
    for i in 0..len {
        let value = {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark_range(0..i, Marker::Discarded);
            v.mark(i, Marker::Compare);
            v.compared();
            let value = v.values[i];
            v.note(format!("compare a[{}] = {} with target {}", i, value, target));
            value
        };
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return;
        }
        if value == target {
            let mut v = vis.borrow_mut();
            v.mark(i, Marker::Found);
            v.note(format!("target {} found at index {}", target, i));
            v.outcome = Some(Outcome::FoundAt(i));
            drop(v);
            exec.finish();
            return;
        }
    }

    let mut v = vis.borrow_mut();
    v.clear_markers();
    v.mark_range(0..len, Marker::Discarded);
    v.note(format!("target {} is not in the array", target));
    v.outcome = Some(Outcome::NotFound);
    drop(v);
    exec.finish();
}

/// Halve a sorted range around its middle element until the target is found.
///
/// The input must already be sorted ascending (see
/// [`Algorithm::prepare_input`](crate::drivers::Algorithm::prepare_input)).
pub async fn binary_search(exec: ExecHandle, vis: SharedVis, target: i64) {
    let len = vis.borrow().values.len();
    let mut lo = 0usize;
    let mut hi = len;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let value = {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark_range(0..lo, Marker::Discarded);
            v.mark_range(hi..len, Marker::Discarded);
            v.mark_range(lo..hi, Marker::Window);
            v.mark(mid, Marker::Compare);
            v.compared();
            let value = v.values[mid];
            v.note(format!(
                "range [{}..{}), compare a[{}] = {} with target {}",
                lo, hi, mid, value, target
            ));
            value
        };
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return;
        }
        match value.cmp(&target) {
            std::cmp::Ordering::Equal => {
                let mut v = vis.borrow_mut();
                v.mark(mid, Marker::Found);
                v.note(format!("target {} found at index {}", target, mid));
                v.outcome = Some(Outcome::FoundAt(mid));
                drop(v);
                exec.finish();
                return;
            }
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
        }
    }

    let mut v = vis.borrow_mut();
    v.clear_markers();
    v.mark_range(0..len, Marker::Discarded);
    v.note(format!("target {} is not in the array", target));
    v.outcome = Some(Outcome::NotFound);
    drop(v);
    exec.finish();
}
