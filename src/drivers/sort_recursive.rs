//! Recursive sort drivers: merge sort and quick sort
//!
//! Cancellation in recursion: every recursive call checks `is_cancelled` on
//! entry and after each child returns, so a reset raised deep in the tree
//! stops promptly and pending siblings and ancestors never run their
//! remaining work.
//!
//! Async recursion needs an indirection, hence the boxed `*_range` helpers.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use super::finish_sorted;
use crate::engine::ExecHandle;
use crate::vis::{Marker, SharedVis};

/// Sort halves recursively, then merge them
pub async fn merge_sort(exec: ExecHandle, vis: SharedVis) {
    let len = vis.borrow().values.len();
    merge_range(exec.clone(), Rc::clone(&vis), 0, len).await;
    if exec.is_cancelled() {
        return;
    }
    finish_sorted(&exec, &vis);
}

fn merge_range(
    exec: ExecHandle,
    vis: SharedVis,
    lo: usize,
    hi: usize,
) -> Pin<Box<dyn Future<Output = ()>>> {
    Box::pin(async move {
        if exec.is_cancelled() || hi - lo <= 1 {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        merge_range(exec.clone(), Rc::clone(&vis), lo, mid).await;
        if exec.is_cancelled() {
            return;
        }
        merge_range(exec.clone(), Rc::clone(&vis), mid, hi).await;
        if exec.is_cancelled() {
            return;
        }
        merge(&exec, &vis, lo, mid, hi).await;
    })
}

/// Merge the sorted halves `lo..mid` and `mid..hi`, one write per checkpoint
async fn merge(exec: &ExecHandle, vis: &SharedVis, lo: usize, mid: usize, hi: usize) {
    let merged = {
        let mut v = vis.borrow_mut();
        v.clear_markers();
        v.mark_range(lo..hi, Marker::Window);
        v.note(format!("merge [{}..{}) and [{}..{})", lo, mid, mid, hi));

        let left = v.values[lo..mid].to_vec();
        let right = v.values[mid..hi].to_vec();
        let mut merged = Vec::with_capacity(hi - lo);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            v.compared();
            if left[i] <= right[j] {
                merged.push(left[i]);
                i += 1;
            } else {
                merged.push(right[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    };
    exec.step(1.0).await;
    if exec.is_cancelled() {
        return;
    }

    for (k, value) in merged.into_iter().enumerate() {
        {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark_range(lo..hi, Marker::Window);
            v.write(lo + k, value);
            v.mark(lo + k, Marker::Swap);
            v.note(format!("write {} into a[{}]", value, lo + k));
        }
        exec.step(1.5).await;
        if exec.is_cancelled() {
            return;
        }
    }
}

/// Partition around a pivot, then recurse on both sides
pub async fn quick_sort(exec: ExecHandle, vis: SharedVis) {
    let len = vis.borrow().values.len();
    quick_range(exec.clone(), Rc::clone(&vis), 0, len).await;
    if exec.is_cancelled() {
        return;
    }
    finish_sorted(&exec, &vis);
}

fn quick_range(
    exec: ExecHandle,
    vis: SharedVis,
    lo: usize,
    hi: usize,
) -> Pin<Box<dyn Future<Output = ()>>> {
    Box::pin(async move {
        if exec.is_cancelled() || hi - lo <= 1 {
            return;
        }
        let Some(pivot) = partition(&exec, &vis, lo, hi).await else {
            // cancelled mid-partition
            return;
        };
        quick_range(exec.clone(), Rc::clone(&vis), lo, pivot).await;
        if exec.is_cancelled() {
            return;
        }
        quick_range(exec.clone(), Rc::clone(&vis), pivot + 1, hi).await;
    })
}

/// Lomuto partition on the last element of `lo..hi`.
///
/// Returns the pivot's final index, or `None` when cancelled mid-partition.
async fn partition(exec: &ExecHandle, vis: &SharedVis, lo: usize, hi: usize) -> Option<usize> {
    let pivot_index = hi - 1;
    let pivot = {
        let mut v = vis.borrow_mut();
        v.clear_markers();
        v.mark_range(lo..hi, Marker::Window);
        v.mark(pivot_index, Marker::Pivot);
        let pivot = v.values[pivot_index];
        v.note(format!(
            "partition [{}..{}) around pivot a[{}] = {}",
            lo, hi, pivot_index, pivot
        ));
        pivot
    };
    exec.step(1.0).await;
    if exec.is_cancelled() {
        return None;
    }

    let mut store = lo;
    for j in lo..pivot_index {
        let below = {
            let mut v = vis.borrow_mut();
            v.clear_markers();
            v.mark_range(lo..hi, Marker::Window);
            v.mark(pivot_index, Marker::Pivot);
            v.mark(store, Marker::Pointer);
            v.mark(j, Marker::Compare);
            v.compared();
            let value = v.values[j];
            v.note(format!("compare a[{}] = {} with pivot {}", j, value, pivot));
            value < pivot
        };
        exec.step(1.0).await;
        if exec.is_cancelled() {
            return None;
        }
        if below {
            if j != store {
                {
                    let mut v = vis.borrow_mut();
                    v.swap(j, store);
                    v.mark(j, Marker::Swap);
                    v.mark(store, Marker::Swap);
                    v.note(format!("swap a[{}] below the store point {}", j, store));
                }
                exec.step(1.5).await;
                if exec.is_cancelled() {
                    return None;
                }
            }
            store += 1;
        }
    }

    {
        let mut v = vis.borrow_mut();
        v.swap(store, pivot_index);
        v.mark(store, Marker::Sorted);
        v.note(format!("pivot {} settles at index {}", pivot, store));
    }
    exec.step(1.5).await;
    if exec.is_cancelled() {
        return None;
    }
    Some(store)
}
