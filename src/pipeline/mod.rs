//! Frame Pipeline
//!
//! ```text
//! render() ──▶ read phase (forced reflows, measurements) ──▶ mutate phase (classes, styles)
//!                        ▲                                          │
//!                        └──── completion waits / fallback clock ◀──┘
//! ```
//!
//! - **scheduler** - read/mutate queues and completion waits
//! - **mount** - render effect binding a transition to signals

pub mod mount;
pub mod scheduler;

pub use mount::{mount_transition, TransitionHandle};
pub use scheduler::{
    CompletionWait, FrameScheduler, SessionId, WaitId, WaitKind, FALLBACK_ANIMATION_END,
};
