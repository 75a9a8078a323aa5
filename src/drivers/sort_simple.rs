//! Quadratic sort drivers: bubble, selection, insertion
//!
//! Step pacing: comparisons take one base step, swaps take 1.5 so the
//! movement is easier to follow.

use super::finish_sorted;
use crate::engine::ExecHandle;
use crate::vis::{Marker, SharedVis};

/// Bubble larger neighbours to the right, pass by pass
pub async fn bubble_sort(exec: ExecHandle, vis: SharedVis) {
    let len = vis.borrow().values.len();
    for pass in 0..len {
        let mut swapped = false;
        for i in 0..len.saturating_sub(pass + 1) {
            let out_of_order = {
                let mut v = vis.borrow_mut();
                v.clear_markers();
                v.mark_range(len - pass..len, Marker::Sorted);
                v.mark(i, Marker::Compare);
                v.mark(i + 1, Marker::Compare);
                v.compared();
                let (a, b) = (v.values[i], v.values[i + 1]);
                v.note(format!("compare a[{}] = {} with a[{}] = {}", i, a, i + 1, b));
                a > b
            };
            exec.step(1.0).await;
            if exec.is_cancelled() {
                return;
            }
            if out_of_order {
                {
                    let mut v = vis.borrow_mut();
                    v.swap(i, i + 1);
                    v.mark(i, Marker::Swap);
                    v.mark(i + 1, Marker::Swap);
                    v.note(format!("swap a[{}] and a[{}]", i, i + 1));
                }
                exec.step(1.5).await;
                if exec.is_cancelled() {
                    return;
                }
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    finish_sorted(&exec, &vis);
}

/// Select the minimum of the unsorted suffix and move it into place
pub async fn selection_sort(exec: ExecHandle, vis: SharedVis) {
    let len = vis.borrow().values.len();
    for i in 0..len {
        let mut min = i;
        for j in i + 1..len {
            let new_minimum = {
                let mut v = vis.borrow_mut();
                v.clear_markers();
                v.mark_range(0..i, Marker::Sorted);
                v.mark(min, Marker::Pointer);
                v.mark(j, Marker::Compare);
                v.compared();
                let (candidate, current) = (v.values[j], v.values[min]);
                v.note(format!(
                    "compare a[{}] = {} with minimum a[{}] = {}",
                    j, candidate, min, current
                ));
                candidate < current
            };
            exec.step(1.0).await;
            if exec.is_cancelled() {
                return;
            }
            if new_minimum {
                min = j;
            }
        }
        if min != i {
            {
                let mut v = vis.borrow_mut();
                v.swap(i, min);
                v.mark(i, Marker::Swap);
                v.mark(min, Marker::Swap);
                v.note(format!("swap minimum a[{}] into position {}", min, i));
            }
            exec.step(1.5).await;
            if exec.is_cancelled() {
                return;
            }
        }
    }
    finish_sorted(&exec, &vis);
}

/// Insert each element into the sorted prefix by shifting it left
pub async fn insertion_sort(exec: ExecHandle, vis: SharedVis) {
    let len = vis.borrow().values.len();
    for i in 1..len {
        let mut j = i;
        while j > 0 {
            let out_of_order = {
                let mut v = vis.borrow_mut();
                v.clear_markers();
                v.mark_range(0..i, Marker::Window);
                v.mark(j - 1, Marker::Compare);
                v.mark(j, Marker::Compare);
                v.compared();
                let (a, b) = (v.values[j - 1], v.values[j]);
                v.note(format!("compare a[{}] = {} with a[{}] = {}", j - 1, a, j, b));
                a > b
            };
            exec.step(1.0).await;
            if exec.is_cancelled() {
                return;
            }
            if !out_of_order {
                break;
            }
            {
                let mut v = vis.borrow_mut();
                v.swap(j - 1, j);
                v.mark(j - 1, Marker::Swap);
                v.mark(j, Marker::Swap);
                v.note(format!("shift: swap a[{}] and a[{}]", j - 1, j));
            }
            exec.step(1.5).await;
            if exec.is_cancelled() {
                return;
            }
            j -= 1;
        }
    }
    finish_sorted(&exec, &vis);
}
