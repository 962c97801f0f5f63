//! Height Restoration - pin the container to the settled slide's height.
//!
//! Slides are usually stacked out of flow while they animate, so the
//! container has no intrinsic height of its own. After a transition settles
//! (and whenever content changes) the settled slide is released to
//! `height: auto` and its measured pixel height is written onto the container.
//!
//! Measuring happens in the read phase; [`pin_container_height`] is the
//! mutate-phase half and never reads layout.

use crate::host::{NodeId, SlideHost, Target};
use crate::types::{px, SlideClass, StyleProp};

/// Slide whose height the container should follow: the active slide, or the
/// outgoing one while a transition is still in flight.
pub fn measure_target<H: SlideHost + ?Sized>(host: &H) -> Option<NodeId> {
    let nodes = host.slide_nodes();
    let find = |class: SlideClass| {
        let name = class.class_name()?;
        nodes
            .iter()
            .find(|(_, node)| host.has_class(Target::Slide(*node), name))
            .map(|&(_, node)| node)
    };
    find(SlideClass::ACTIVE).or_else(|| find(SlideClass::FROM))
}

/// Read the natural height of `node`. `None` when unmeasured or zero.
pub fn measure_height<H: SlideHost + ?Sized>(host: &H, node: NodeId) -> Option<f32> {
    host.client_height(node).filter(|h| *h > 0.0)
}

/// Release `node` to its natural height and pin the container to `height`.
pub fn pin_container_height<H: SlideHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    height: f32,
    with_flex_basis: bool,
) {
    let value = px(height);
    host.set_style(Target::Slide(node), StyleProp::Height, Some("auto"));
    host.set_style(Target::Container, StyleProp::Height, Some(&value));
    if with_flex_basis {
        host.set_style(Target::Container, StyleProp::FlexBasis, Some(&value));
    }
}
