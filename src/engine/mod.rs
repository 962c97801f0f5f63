//! Transition Engine - render cache, direction, strategy and the state machine.
//!
//! - **RenderCache** - last known content for every key still in play
//! - **Direction** - forward / backward resolution from key order
//! - **Strategy** - which animation path a trigger takes
//! - **Height** - container height restoration
//! - **Transition** - the per-container controller tying it all together

mod direction;
mod height;
mod render_cache;
mod strategy;
mod transition;

pub use direction::{resolve_is_backwards, rtl_adjusted};
pub use height::{measure_height, measure_target, pin_container_height};
pub use render_cache::RenderCache;
pub use strategy::{
    is_rtl, is_transform_driven, select_strategy, watches_outgoing, AnimationStrategy,
    WATCH_OUTGOING_WHEN_BACKWARDS,
};
pub use transition::{HostEvent, MutationTask, ReflowTask, Transition};
