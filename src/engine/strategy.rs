//! Animation Strategy Selector.
//!
//! Maps a named style plus the global and one-shot flags to the way a
//! transition is executed. Selection happens before any host mutation: the
//! class-driven and transform-driven strategies touch different class and
//! style sets and never mix within one session.

use crate::types::AnimationName;

/// How one transition session is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStrategy {
    /// Apply final classes synchronously, no animation.
    Instant,
    /// Transform-driven style with animations disabled: snap transforms.
    InstantOptimized,
    /// Explicit `translate3d` choreography, waits for `transitionend`.
    Optimized,
    /// Toggle classes and let the stylesheet animate, waits for `animationend`.
    ClassDriven,
}

/// Styles animated through explicit transforms rather than stylesheet classes.
pub fn is_transform_driven(name: AnimationName) -> bool {
    matches!(name, AnimationName::SlideOptimized | AnimationName::SlideOptimizedRtl)
}

/// Transform-driven styles that mirror the horizontal direction.
pub fn is_rtl(name: AnimationName) -> bool {
    matches!(name, AnimationName::SlideOptimizedRtl)
}

/// Styles whose backwards keyframes finish on the outgoing slide, so the
/// completion wait is attached to it instead of the incoming slide.
pub const WATCH_OUTGOING_WHEN_BACKWARDS: &[AnimationName] =
    &[AnimationName::Reveal, AnimationName::SlideFadeAndroid];

/// Whether the completion wait should watch the outgoing slide.
pub fn watches_outgoing(name: AnimationName, is_backwards: bool) -> bool {
    is_backwards && WATCH_OUTGOING_WHEN_BACKWARDS.contains(&name)
}

/// Pick the strategy for a session.
///
/// Transform-driven styles keep their own instant variant; the one-shot
/// swipe-cancel fallback only affects class-driven styles.
pub fn select_strategy(
    name: AnimationName,
    animations_disabled: bool,
    swipe_just_cancelled: bool,
) -> AnimationStrategy {
    if is_transform_driven(name) {
        return if animations_disabled {
            AnimationStrategy::InstantOptimized
        } else {
            AnimationStrategy::Optimized
        };
    }

    if name == AnimationName::None || animations_disabled || swipe_just_cancelled {
        AnimationStrategy::Instant
    } else {
        AnimationStrategy::ClassDriven
    }
}
