//! Mount API - bind a transition to reactive inputs.
//!
//! The render effect reads the input getter (tracking whatever signals it
//! touches) and renders the transition with the result. Setting the active
//! key signal is then all it takes to trigger a transition.
//!
//! ```ignore
//! let key = signal(0);
//! let transition = Rc::new(RefCell::new(Transition::new(host, props)));
//!
//! let key_for_input = key.clone();
//! let handle = mount_transition(transition.clone(), move || {
//!     RenderInput::new(key_for_input.get(), SlideRender::dynamic(|s| format!("slide {}", s.key)))
//! });
//!
//! key.set(1);                          // render effect re-runs, transition starts
//! transition.borrow_mut().flush_frame();
//! handle.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::effect;
use tracing::debug;

use crate::engine::Transition;
use crate::host::SlideHost;
use crate::primitives::RenderInput;

// =============================================================================
// Transition Handle
// =============================================================================

/// Handle returned by [`mount_transition`]. Dropping it stops the render effect.
pub struct TransitionHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    replay: Box<dyn Fn() -> bool>,
}

impl TransitionHandle {
    /// Render the input of an effect run that found the transition borrowed.
    /// Returns whether a deferred input was rendered.
    pub fn replay_pending(&self) -> bool {
        (self.replay)()
    }

    /// Stop the render effect. The transition keeps its last state.
    pub fn unmount(mut self) {
        self.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.stop_effect.is_some()
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for TransitionHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Create the render effect for `transition`.
///
/// Runs once immediately, then whenever a signal read by `input` changes.
///
/// A run that finds the transition already borrowed keeps its input as
/// pending. Only the newest pending input is kept. It is rendered as soon as
/// the borrowing render returns, or by [`TransitionHandle::replay_pending`]
/// when the borrow was held outside any render.
pub fn mount_transition<H, F>(transition: Rc<RefCell<Transition<H>>>, input: F) -> TransitionHandle
where
    H: SlideHost + 'static,
    H::Content: Clone + 'static,
    F: Fn() -> RenderInput<H::Content> + 'static,
{
    let pending: Rc<RefCell<Option<RenderInput<H::Content>>>> = Rc::new(RefCell::new(None));

    let transition_for_effect = transition.clone();
    let pending_for_effect = pending.clone();
    let stop_fn = effect(move || {
        let next = input();
        render_or_defer(&transition_for_effect, &pending_for_effect, next);
    });

    let replay = move || {
        let deferred = pending.borrow_mut().take();
        match deferred {
            Some(next) => render_or_defer(&transition, &pending, next),
            None => false,
        }
    };

    TransitionHandle {
        stop_effect: Some(Box::new(stop_fn)),
        replay: Box::new(replay),
    }
}

/// Render `next`, then any input deferred while it rendered. Returns whether
/// the last input was rendered rather than deferred.
fn render_or_defer<H>(
    transition: &RefCell<Transition<H>>,
    pending: &RefCell<Option<RenderInput<H::Content>>>,
    mut next: RenderInput<H::Content>,
) -> bool
where
    H: SlideHost,
    H::Content: Clone,
{
    loop {
        match transition.try_borrow_mut() {
            Ok(mut transition) => transition.render(next),
            Err(_) => {
                debug!(key = next.active_key, "transition busy, render deferred");
                *pending.borrow_mut() = Some(next);
                return false;
            }
        }
        let deferred = pending.borrow_mut().take();
        match deferred {
            Some(newer) => next = newer,
            None => return true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
