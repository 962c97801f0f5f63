//! Host Seam - where slides are actually rendered.
//!
//! The transition engine never owns rendered output. Everything it does to
//! the screen goes through [`SlideHost`]: reconciling the list of slides,
//! toggling classes, writing inline styles and reading layout.
//!
//! # Node handles
//!
//! Slides are addressed by an explicit key → [`NodeId`] mapping that the host
//! populates when it mounts a slide and invalidates when it unmounts it.
//! The engine never relies on the position of a node among its siblings.
//!
//! # Read and mutate phases
//!
//! [`SlideHost::client_height`] and [`SlideHost::force_reflow`] are read-phase
//! operations. The engine only calls them from the scheduler's read phase or
//! synchronously before queuing a mutation, never from inside a mutation.

mod headless;

pub use headless::HeadlessHost;

use crate::types::{SlideClass, SlideKey, StyleProp};

// =============================================================================
// Handles
// =============================================================================

/// Stable handle for a mounted slide node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Element a class or style operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The transition container hosting every slide.
    Container,
    /// One mounted slide.
    Slide(NodeId),
}

/// One slide as produced by a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlide<C> {
    pub key: SlideKey,
    pub content: C,
    /// Content sits inside a keyed wrapper element.
    pub wrapped: bool,
}

// =============================================================================
// SlideHost
// =============================================================================

/// Rendering environment for a transition container.
pub trait SlideHost {
    /// Content type rendered inside a slide.
    type Content;

    /// Reconcile mounted slides with `slides`, in order.
    ///
    /// A key already mounted keeps its node (and its classes); new keys get
    /// new nodes; keys no longer listed are unmounted. A host may defer
    /// mounting, in which case [`slide_nodes`](Self::slide_nodes) stays empty
    /// until it catches up.
    fn render_slides(&mut self, slides: Vec<RenderedSlide<Self::Content>>);

    /// Mounted slides in render order.
    fn slide_nodes(&self) -> Vec<(SlideKey, NodeId)>;

    /// Node currently mounted for `key`.
    fn node_for(&self, key: SlideKey) -> Option<NodeId> {
        self.slide_nodes()
            .into_iter()
            .find_map(|(k, node)| (k == key).then_some(node))
    }

    fn add_class(&mut self, target: Target, class: &str);

    fn remove_class(&mut self, target: Target, class: &str);

    fn has_class(&self, target: Target, class: &str) -> bool;

    fn toggle_class(&mut self, target: Target, class: &str, on: bool) {
        if on {
            self.add_class(target, class);
        } else {
            self.remove_class(target, class);
        }
    }

    /// Set an inline style. `None` clears the property.
    fn set_style(&mut self, target: Target, prop: StyleProp, value: Option<&str>);

    /// Rendered height of a slide in pixels. Read phase only.
    fn client_height(&self, node: NodeId) -> Option<f32>;

    /// Force a synchronous layout of `node`. Read phase only.
    fn force_reflow(&mut self, node: NodeId);

    fn set_container_id(&mut self, id: Option<&str>);
}

// =============================================================================
// Class helpers
// =============================================================================

/// Add every flag of `add` and remove every flag of `remove` on a slide.
pub fn apply_slide_classes<H: SlideHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    add: SlideClass,
    remove: SlideClass,
) {
    for flag in remove.iter() {
        if let Some(name) = flag.class_name() {
            host.remove_class(Target::Slide(node), name);
        }
    }
    for flag in add.iter() {
        if let Some(name) = flag.class_name() {
            host.add_class(Target::Slide(node), name);
        }
    }
}
