//! State Module - runtime state shared by transitions
//!
//! - **Animate** - global animation level, heavy-animation bracket
//! - **Swipe** - gesture bridge that can abort a running transition

pub mod animate;
pub mod swipe;

pub use animate::{
    animation_level, animations_disabled, begin_heavy_animation, heavy_animation_count,
    heavy_animation_signal, is_heavy_animating, reset_animation_settings, reset_heavy_animations,
    set_animation_level, HeavyAnimationGuard,
};
pub use swipe::{SwipeBridge, SwipeEvent, SwipeOutcome, SWIPE_CANCEL_THRESHOLD};
