// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The recursive splitting task framework.
//!
//! A parallel evaluation decomposes its plan into a binary task tree:
//! a task whose estimate is at or below the target leaf size (or whose
//! source refuses to split) runs the leaf computation inline; otherwise
//! it splits once, forks the right half and recurses into the left,
//! then combines the children's results in encounter order.
//!
//! Each task owns a [`TaskNode`] record linked to its parent and (for
//! split tasks) its right child. The records carry the cooperative
//! cancellation protocol: `canceled` marks a whole subtree dead,
//! `cancel_later_nodes` kills the encounter-order suffix, and the
//! left-spine test gates find-first's write of the shared
//! short-circuit slot. A task that observes the shared slot set, an
//! ancestor canceled, or a recorded failure installs the empty result
//! and completes without touching its source.
//!
//! A panic from a user callback is caught at the leaf (or combine)
//! boundary, recorded first-wins, and cancels the tree from the root;
//! the terminal surfaces it as `UserCallbackFailure`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rill_core::{Result, RillError, SIZE_UNKNOWN};

use crate::plan::Plan;
use crate::pool;

/// The size estimate assumed for unbounded sources when computing the
/// target leaf size.
const UNKNOWN_SIZE_SWAG: u64 = 1000;

/// `1 + ceil((estimate + 7) / 8) / parallelism`: small enough to keep
/// every worker fed, large enough to amortize the split bookkeeping.
pub(crate) fn target_leaf_size(estimate: u64, parallelism: usize) -> u64 {
    let estimate = if estimate == SIZE_UNKNOWN {
        UNKNOWN_SIZE_SWAG
    } else {
        estimate
    };
    1 + ((estimate + 7) / 8) / parallelism.max(1) as u64
}

/// One task's record in the tree.
pub(crate) struct TaskNode {
    parent: Option<Arc<TaskNode>>,
    is_left: bool,
    right_child: OnceLock<Arc<TaskNode>>,
    canceled: AtomicBool,
}

impl TaskNode {
    pub(crate) fn root() -> Arc<TaskNode> {
        Arc::new(TaskNode {
            parent: None,
            is_left: true,
            right_child: OnceLock::new(),
            canceled: AtomicBool::new(false),
        })
    }

    /// Creates the two children of a splitting task and links the right
    /// one for suffix cancellation. Called at most once per node.
    fn fork(this: &Arc<TaskNode>) -> (Arc<TaskNode>, Arc<TaskNode>) {
        let left = Arc::new(TaskNode {
            parent: Some(Arc::clone(this)),
            is_left: true,
            right_child: OnceLock::new(),
            canceled: AtomicBool::new(false),
        });
        let right = Arc::new(TaskNode {
            parent: Some(Arc::clone(this)),
            is_left: false,
            right_child: OnceLock::new(),
            canceled: AtomicBool::new(false),
        });
        let linked = this.right_child.set(Arc::clone(&right));
        debug_assert!(linked.is_ok(), "task split twice");
        (left, right)
    }

    fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    /// True when this task or any ancestor was canceled; descendants of
    /// a canceled task are thereby canceled without being touched.
    fn is_canceled(&self) -> bool {
        if self.canceled.load(Ordering::Acquire) {
            return true;
        }
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            if node.canceled.load(Ordering::Acquire) {
                return true;
            }
            current = node.parent.as_deref();
        }
        false
    }

    /// Cancels every task later in encounter order: at every ancestor
    /// level where the walk ascends a left edge, the right sibling's
    /// subtree dies.
    fn cancel_later_nodes(&self) {
        let mut is_left = self.is_left;
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            if is_left {
                if let Some(right) = node.right_child.get() {
                    right.cancel();
                }
            }
            is_left = node.is_left;
            current = node.parent.as_deref();
        }
    }

    /// True on the leftmost root-to-leaf path.
    fn is_left_spine(&self) -> bool {
        if !self.is_left {
            return false;
        }
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            if !node.is_left {
                return false;
            }
            current = node.parent.as_deref();
        }
        true
    }
}

/// The shared short-circuit result slot: write-once across the tree.
pub(crate) struct SharedSlot<S> {
    set: AtomicBool,
    value: Mutex<Option<S>>,
}

impl<S> SharedSlot<S> {
    pub(crate) fn new() -> Self {
        Self {
            set: AtomicBool::new(false),
            value: Mutex::new(None),
        }
    }

    /// Installs `value` if the slot is still empty; the first write
    /// wins and later offers are dropped.
    pub(crate) fn offer(&self, value: S) -> bool {
        let mut slot = self.value.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        self.set.store(true, Ordering::Release);
        true
    }

    pub(crate) fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    pub(crate) fn take(&self) -> Option<S> {
        self.value.lock().take()
    }
}

/// First-failure-wins capture of user-callback panics.
struct PanicCell {
    set: AtomicBool,
    error: Mutex<Option<RillError>>,
}

impl PanicCell {
    fn new() -> Self {
        Self {
            set: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    fn record(&self, error: RillError) {
        let mut slot = self.error.lock();
        if slot.is_none() {
            *slot = Some(error);
            self.set.store(true, Ordering::Release);
        }
    }

    fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    fn take(&self) -> Option<RillError> {
        self.error.lock().take()
    }
}

pub(crate) struct ExecCtl {
    root: Arc<TaskNode>,
    panics: PanicCell,
}

impl ExecCtl {
    fn fail(&self, payload: Box<dyn std::any::Any + Send>) {
        self.panics.record(RillError::from_panic(payload));
        // one cancellation wave: everything under the root dies
        self.root.cancel();
    }
}

/// What a leaf computation sees of its task.
pub(crate) struct TaskHandle {
    node: Arc<TaskNode>,
}

impl TaskHandle {
    pub(crate) fn is_left_spine(&self) -> bool {
        self.node.is_left_spine()
    }

    pub(crate) fn cancel_later_nodes(&self) {
        self.node.cancel_later_nodes();
    }
}

struct Ctx<'a, Out: Send + 'static, R> {
    target: u64,
    ctl: &'a ExecCtl,
    leaf: &'a (dyn Fn(&mut dyn Plan<Out>, &TaskHandle) -> R + Sync),
    combine: &'a (dyn Fn(R, R) -> R + Sync),
    empty: &'a (dyn Fn() -> R + Sync),
    abort: &'a (dyn Fn() -> bool + Sync),
}

impl<Out: Send + 'static, R> Clone for Ctx<'_, Out, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Out: Send + 'static, R> Copy for Ctx<'_, Out, R> {}

/// Runs `plan` through the splitting task tree and hands back the
/// combined result, or the first captured user-callback failure.
///
/// `leaf` consumes one chunk; `combine` merges two adjacent results in
/// encounter order; `empty` is the result a canceled or aborted task
/// installs; `abort` is the terminal's shared-slot check, consulted
/// before any task touches its source.
pub(crate) fn invoke<Out, R>(
    plan: Box<dyn Plan<Out>>,
    leaf: &(dyn Fn(&mut dyn Plan<Out>, &TaskHandle) -> R + Sync),
    combine: &(dyn Fn(R, R) -> R + Sync),
    empty: &(dyn Fn() -> R + Sync),
    abort: &(dyn Fn() -> bool + Sync),
) -> Result<R>
where
    Out: Send + 'static,
    R: Send,
{
    let target = target_leaf_size(plan.estimate_size(), pool::parallelism());
    let ctl = ExecCtl {
        root: TaskNode::root(),
        panics: PanicCell::new(),
    };
    let root_node = Arc::clone(&ctl.root);
    let ctx = Ctx {
        target,
        ctl: &ctl,
        leaf,
        combine,
        empty,
        abort,
    };
    let result = pool::invoke(move || compute(plan, root_node, ctx));
    match ctl.panics.take() {
        Some(error) => Err(error),
        None => Ok(result),
    }
}

fn compute<Out, R>(mut plan: Box<dyn Plan<Out>>, node: Arc<TaskNode>, ctx: Ctx<'_, Out, R>) -> R
where
    Out: Send + 'static,
    R: Send,
{
    if ctx.ctl.panics.is_set() || (ctx.abort)() || node.is_canceled() {
        return (ctx.empty)();
    }
    if plan.estimate_size() > ctx.target {
        if let Some(prefix) = plan.try_split() {
            let (left_node, right_node) = TaskNode::fork(&node);
            let (left, right) = pool::join(
                move || compute(prefix, left_node, ctx),
                move || compute(plan, right_node, ctx),
            );
            if ctx.ctl.panics.is_set() {
                return (ctx.empty)();
            }
            return match catch_unwind(AssertUnwindSafe(|| (ctx.combine)(left, right))) {
                Ok(value) => value,
                Err(payload) => {
                    ctx.ctl.fail(payload);
                    (ctx.empty)()
                }
            };
        }
    }
    let handle = TaskHandle { node };
    match catch_unwind(AssertUnwindSafe(|| (ctx.leaf)(&mut *plan, &handle))) {
        Ok(value) => value,
        Err(payload) => {
            ctx.ctl.fail(payload);
            (ctx.empty)()
        }
    }
}
