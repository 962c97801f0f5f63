//! # spark-transition
//!
//! Slide transition orchestrator for reactive UI containers.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A [`Transition`] owns a container of keyed slides. Each render names the
//! active key; when it differs from the previous render, the controller
//! hands off from the outgoing slide to the incoming one:
//!
//! ```text
//! render(active_key) → RenderCache → SlideHost::render_slides → strategy
//!     → classes / styles (mutate phase) → animationend | transitionend | fallback
//!     → settle → cleanup
//! ```
//!
//! Everything visible goes through the [`SlideHost`] trait. [`HeadlessHost`]
//! is an in-memory host with Taffy-backed height measurement.
//!
//! ## Modules
//!
//! - [`types`] - Slide keys, animation names, directions, class contract
//! - [`engine`] - Render cache, direction, strategy, the transition controller
//! - [`host`] - Host seam and the headless host
//! - [`layout`] - Taffy-based slide height measurement
//! - [`pipeline`] - Frame scheduler and the reactive mount
//! - [`primitives`] - Props and slide content
//! - [`state`] - Animation level, heavy-animation bracket, swipe bridge

pub mod engine;
pub mod error;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Result, TransitionError};

pub use engine::{AnimationStrategy, HostEvent, RenderCache, Transition};

pub use host::{HeadlessHost, NodeId, RenderedSlide, SlideHost, Target};

pub use pipeline::{mount_transition, TransitionHandle, FALLBACK_ANIMATION_END};

pub use primitives::{RenderInput, SlideRender, TransitionCallback, TransitionProps};

pub use state::{
    // Animation level
    animation_level, animations_disabled, set_animation_level, reset_animation_settings,
    // Heavy animation
    begin_heavy_animation, is_heavy_animating, heavy_animation_signal, HeavyAnimationGuard,
    // Swipe
    SwipeEvent, SWIPE_CANCEL_THRESHOLD,
};
