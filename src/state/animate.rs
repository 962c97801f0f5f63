//! Animation State - global animation level and the heavy-animation bracket.
//!
//! # Animation level
//!
//! A single reactive setting shared by every transition on the thread. At
//! [`AnimationLevel::Min`] transitions snap instead of animating.
//!
//! # Heavy animation
//!
//! While a transition animates, other subsystems may want to postpone
//! expensive work. Each animated session holds a [`HeavyAnimationGuard`];
//! the reactive flag stays `true` while at least one guard is live.
//!
//! # Example
//!
//! ```ignore
//! use spark_transition::state::animate::{begin_heavy_animation, is_heavy_animating};
//!
//! let guard = begin_heavy_animation();
//! assert!(is_heavy_animating());
//! guard.end();
//! guard.end(); // second call is a no-op
//! assert!(!is_heavy_animating());
//! ```

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::trace;

use crate::types::AnimationLevel;

// =============================================================================
// ANIMATION LEVEL
// =============================================================================

thread_local! {
    static ANIMATION_LEVEL: Signal<AnimationLevel> = signal(AnimationLevel::default());
}

/// Current animation level.
pub fn animation_level() -> AnimationLevel {
    ANIMATION_LEVEL.with(|s| s.get())
}

/// Change the animation level for every transition on this thread.
pub fn set_animation_level(level: AnimationLevel) {
    ANIMATION_LEVEL.with(|s| s.set(level));
}

/// Transitions snap instead of animating.
pub fn animations_disabled() -> bool {
    animation_level() == AnimationLevel::Min
}

/// Restore the default animation level (for testing).
pub fn reset_animation_settings() {
    set_animation_level(AnimationLevel::default());
}

// =============================================================================
// HEAVY ANIMATION
// =============================================================================

thread_local! {
    static HEAVY_COUNT: Cell<usize> = const { Cell::new(0) };
    static HEAVY_ACTIVE: Signal<bool> = signal(false);
}

/// Token for one running heavy animation. Ending it twice is harmless.
#[derive(Debug, Clone)]
pub struct HeavyAnimationGuard {
    ended: Rc<Cell<bool>>,
}

impl HeavyAnimationGuard {
    /// Release this animation's hold on the heavy flag. Idempotent.
    pub fn end(&self) {
        if self.ended.replace(true) {
            return;
        }
        let remaining = HEAVY_COUNT.with(|count| {
            let next = count.get().saturating_sub(1);
            count.set(next);
            next
        });
        trace!(remaining, "heavy animation ended");
        if remaining == 0 {
            HEAVY_ACTIVE.with(|s| s.set(false));
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended.get()
    }
}

/// Mark the start of a heavy animation.
pub fn begin_heavy_animation() -> HeavyAnimationGuard {
    let running = HEAVY_COUNT.with(|count| {
        let next = count.get() + 1;
        count.set(next);
        next
    });
    trace!(running, "heavy animation started");
    if running == 1 {
        HEAVY_ACTIVE.with(|s| s.set(true));
    }
    HeavyAnimationGuard { ended: Rc::new(Cell::new(false)) }
}

/// Any heavy animation is running. Not reactive; see [`heavy_animation_signal`].
pub fn is_heavy_animating() -> bool {
    HEAVY_COUNT.with(|count| count.get() > 0)
}

/// Number of live heavy-animation guards.
pub fn heavy_animation_count() -> usize {
    HEAVY_COUNT.with(|count| count.get())
}

/// Reactive flag mirroring [`is_heavy_animating`].
pub fn heavy_animation_signal() -> Signal<bool> {
    HEAVY_ACTIVE.with(|s| s.clone())
}

/// Forget every running heavy animation (for testing).
pub fn reset_heavy_animations() {
    HEAVY_COUNT.with(|count| count.set(0));
    HEAVY_ACTIVE.with(|s| s.set(false));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_animation_settings();
        reset_heavy_animations();
    }

    #[test]
    fn test_default_level_animates() {
        setup();
        assert_eq!(animation_level(), AnimationLevel::Max);
        assert!(!animations_disabled());
    }

    #[test]
    fn test_min_level_disables() {
        setup();
        set_animation_level(AnimationLevel::Min);
        assert!(animations_disabled());
        reset_animation_settings();
        assert!(!animations_disabled());
    }

    #[test]
    fn test_guard_end_is_idempotent() {
        setup();
        let guard = begin_heavy_animation();
        let clone = guard.clone();
        assert!(is_heavy_animating());

        guard.end();
        clone.end();
        assert!(guard.is_ended());
        assert_eq!(heavy_animation_count(), 0);
        assert!(!heavy_animation_signal().get());
    }

    #[test]
    fn test_overlapping_guards() {
        setup();
        let first = begin_heavy_animation();
        let second = begin_heavy_animation();
        assert_eq!(heavy_animation_count(), 2);

        first.end();
        assert!(is_heavy_animating());
        assert!(heavy_animation_signal().get());

        second.end();
        assert!(!is_heavy_animating());
        assert!(!heavy_animation_signal().get());
    }
}
