//! Primitives - props and content types a transition is built from.

mod types;

pub use types::*;
