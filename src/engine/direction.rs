//! Direction Resolver - forward or backward visual motion.

use crate::types::{Direction, SlideKey};

/// Decide whether the transition from `prev` to `next` runs backwards.
///
/// An explicit direction wins. `Auto` is backwards when the previous key is
/// greater than the next one, `Inverse` when it is smaller. Without a
/// previous key there is no transition, so this returns `false`.
pub fn resolve_is_backwards(direction: Direction, prev: Option<SlideKey>, next: SlideKey) -> bool {
    match (direction, prev) {
        (Direction::Backward, _) => true,
        (Direction::Forward, _) => false,
        (Direction::Auto, Some(prev)) => prev > next,
        (Direction::Inverse, Some(prev)) => prev < next,
        (_, None) => false,
    }
}

/// Flip the direction for right-to-left transform styles.
pub fn rtl_adjusted(is_backwards: bool, is_rtl: bool) -> bool {
    if is_rtl { !is_backwards } else { is_backwards }
}
