//! Frame Scheduler - batched host access and completion waits.
//!
//! Host access is split into two phases per frame:
//!
//! ```text
//! read phase    forced-reflow tasks: measure / force layout, each may queue a mutation
//! mutate phase  mutation tasks: write classes and styles, never read layout
//! ```
//!
//! The scheduler also owns the suspension points of a transition: waits for
//! an `animationend` / `transitionend` on a given node, each optionally
//! bounded by a fallback deadline on the scheduler's clock. Waits are one-shot
//! and can be given up (the cancellation token is the [`WaitId`]).
//!
//! The scheduler stores tasks as data; whoever drains the queues decides what
//! a task means.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::host::NodeId;

/// Fallback after which a stuck completion wait is forced to fire.
pub const FALLBACK_ANIMATION_END: Duration = Duration::from_secs(1);

/// Session watermark: bumped on every trigger.
pub type SessionId = u64;

/// Host event a wait listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitKind {
    AnimationEnd,
    TransitionEnd,
}

/// Handle for a pending completion wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaitId(u64);

/// A pending completion wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionWait {
    pub node: NodeId,
    pub kind: WaitKind,
    pub session: SessionId,
    /// Clock time at which the wait fires on its own.
    pub deadline: Option<Duration>,
}

/// Read/mutate queues plus completion waits.
#[derive(Debug)]
pub struct FrameScheduler<R, M> {
    reflows: VecDeque<R>,
    mutations: VecDeque<M>,
    waits: BTreeMap<WaitId, CompletionWait>,
    next_wait: u64,
    now: Duration,
}

impl<R, M> Default for FrameScheduler<R, M> {
    fn default() -> Self {
        Self {
            reflows: VecDeque::new(),
            mutations: VecDeque::new(),
            waits: BTreeMap::new(),
            next_wait: 0,
            now: Duration::ZERO,
        }
    }
}

impl<R, M> FrameScheduler<R, M> {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Phases
    // -------------------------------------------------------------------------

    /// Queue a read-phase task for the next frame.
    pub fn request_forced_reflow(&mut self, task: R) {
        self.reflows.push_back(task);
    }

    /// Queue a mutate-phase task for the next frame.
    pub fn request_mutation(&mut self, task: M) {
        self.mutations.push_back(task);
    }

    /// Take every queued read-phase task.
    pub fn take_reflows(&mut self) -> Vec<R> {
        self.reflows.drain(..).collect()
    }

    /// Take every queued mutate-phase task.
    pub fn take_mutations(&mut self) -> Vec<M> {
        self.mutations.drain(..).collect()
    }

    /// No read or mutate work is queued.
    pub fn is_idle(&self) -> bool {
        self.reflows.is_empty() && self.mutations.is_empty()
    }

    // -------------------------------------------------------------------------
    // Completion waits
    // -------------------------------------------------------------------------

    /// Wait for `kind` on `node`. With a `fallback`, the wait fires on its own
    /// once the clock passes `now + fallback`.
    pub fn wait_for(
        &mut self,
        node: NodeId,
        kind: WaitKind,
        session: SessionId,
        fallback: Option<Duration>,
    ) -> WaitId {
        let id = WaitId(self.next_wait);
        self.next_wait += 1;
        let deadline = fallback.map(|f| self.now + f);
        self.waits.insert(id, CompletionWait { node, kind, session, deadline });
        id
    }

    /// Stop waiting. Returns whether the wait was still pending.
    pub fn give_up(&mut self, id: WaitId) -> bool {
        self.waits.remove(&id).is_some()
    }

    /// Give a pending wait a fallback deadline if it has none.
    pub fn ensure_deadline(&mut self, id: WaitId, fallback: Duration) {
        let now = self.now;
        if let Some(wait) = self.waits.get_mut(&id) {
            wait.deadline.get_or_insert(now + fallback);
        }
    }

    pub fn is_waiting(&self, id: WaitId) -> bool {
        self.waits.contains_key(&id)
    }

    pub fn pending_waits(&self) -> usize {
        self.waits.len()
    }

    /// Resolve every wait listening for `kind` on `node`.
    pub fn resolve(&mut self, node: NodeId, kind: WaitKind) -> Vec<CompletionWait> {
        let matched: Vec<WaitId> = self
            .waits
            .iter()
            .filter(|(_, w)| w.node == node && w.kind == kind)
            .map(|(&id, _)| id)
            .collect();
        matched
            .into_iter()
            .filter_map(|id| self.waits.remove(&id))
            .collect()
    }

    /// Drop every wait on a node `is_mounted` rejects and return them.
    /// Node ids may be recycled by the host once unmounted.
    pub fn forget_unmounted(&mut self, is_mounted: impl Fn(NodeId) -> bool) -> Vec<CompletionWait> {
        let orphaned: Vec<WaitId> = self
            .waits
            .iter()
            .filter(|(_, w)| !is_mounted(w.node))
            .map(|(&id, _)| id)
            .collect();
        orphaned
            .into_iter()
            .filter_map(|id| self.waits.remove(&id))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock to `now` and return every wait whose deadline passed,
    /// in registration order. The clock never moves backwards.
    pub fn advance(&mut self, now: Duration) -> Vec<CompletionWait> {
        self.now = self.now.max(now);
        let current = self.now;
        let expired: Vec<WaitId> = self
            .waits
            .iter()
            .filter(|(_, w)| w.deadline.is_some_and(|d| d <= current))
            .map(|(&id, _)| id)
            .collect();
        expired
            .into_iter()
            .filter_map(|id| self.waits.remove(&id))
            .collect()
    }
}
