//! Swipe Bridge - let a drag gesture abort a running transition.
//!
//! When a session runs with swipe control, the engine arms the bridge with
//! the outgoing and incoming slide nodes and the session's id. Gesture
//! events are then routed here. A user-initiated abort yields
//! [`SwipeOutcome::Cancelled`], and the engine takes the cancellation path
//! instead of waiting for the animation to end.
//!
//! # Gesture model
//!
//! - `Start` begins tracking (ignored when not armed)
//! - `Move { progress }` records how far the user dragged back toward the
//!   outgoing slide, `0.0..=1.0`
//! - `End` releases: at or past [`SWIPE_CANCEL_THRESHOLD`] the transition is
//!   cancelled, otherwise the bridge disarms and the animation completes
//! - `Abort` cancels immediately

use tracing::{debug, trace};

use crate::host::NodeId;

/// Drag-back fraction at which releasing cancels the transition.
pub const SWIPE_CANCEL_THRESHOLD: f32 = 0.5;

/// Gesture input routed to the bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEvent {
    Start,
    Move { progress: f32 },
    End,
    Abort,
}

/// What the engine should do after a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome<T> {
    /// Nothing to do.
    None,
    /// The gesture let go without aborting; the animation finishes normally.
    Released,
    /// The gesture aborted the transition registered with this token.
    Cancelled(T),
}

#[derive(Debug, Clone, Copy)]
struct Armed<T> {
    from: NodeId,
    to: NodeId,
    token: T,
    dragging: bool,
    progress: f32,
}

/// Registration slot for at most one swipe-controlled transition.
#[derive(Debug)]
pub struct SwipeBridge<T> {
    armed: Option<Armed<T>>,
}

impl<T> Default for SwipeBridge<T> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<T: Copy + std::fmt::Debug> SwipeBridge<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm gesture tracking for the `from` → `to` pair. `token` is handed back
    /// on cancellation. Replaces any previous registration.
    pub fn allow_swipe_control(&mut self, from: NodeId, to: NodeId, token: T) {
        trace!(from = from.0, to = to.0, ?token, "swipe control armed");
        self.armed = Some(Armed { from, to, token, dragging: false, progress: 0.0 });
    }

    /// Drop the registration without cancelling anything.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Nodes of the armed pair, outgoing first.
    pub fn armed_nodes(&self) -> Option<(NodeId, NodeId)> {
        self.armed.map(|a| (a.from, a.to))
    }

    /// Current drag-back progress, if a drag is in progress.
    pub fn progress(&self) -> Option<f32> {
        self.armed.filter(|a| a.dragging).map(|a| a.progress)
    }

    /// Feed a gesture event.
    pub fn handle(&mut self, event: SwipeEvent) -> SwipeOutcome<T> {
        let Some(armed) = self.armed.as_mut() else {
            return SwipeOutcome::None;
        };

        match event {
            SwipeEvent::Start => {
                armed.dragging = true;
                armed.progress = 0.0;
                SwipeOutcome::None
            }
            SwipeEvent::Move { progress } => {
                if armed.dragging {
                    armed.progress = progress.clamp(0.0, 1.0);
                }
                SwipeOutcome::None
            }
            SwipeEvent::End => {
                if !armed.dragging {
                    return SwipeOutcome::None;
                }
                let cancelled = armed.progress >= SWIPE_CANCEL_THRESHOLD;
                let token = armed.token;
                self.armed = None;
                if cancelled {
                    debug!(?token, "swipe released past threshold");
                    SwipeOutcome::Cancelled(token)
                } else {
                    SwipeOutcome::Released
                }
            }
            SwipeEvent::Abort => {
                let token = armed.token;
                self.armed = None;
                debug!(?token, "swipe aborted");
                SwipeOutcome::Cancelled(token)
            }
        }
    }
}
