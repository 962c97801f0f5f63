//! Headless Host - in-memory slide container.
//!
//! Behaves like a keyed DOM container without a renderer:
//! - Node allocation with a free pool for O(1) handle reuse
//! - Contract classes stored as [`SlideClass`] bits, anything else as strings
//! - Inline styles per element
//! - Natural heights measured with Taffy whenever slides change
//!
//! Mounting can be deferred to reproduce the "children not mounted yet" race:
//! with [`HeadlessHost::set_deferred_mount`] on, `render_slides` only stages
//! the slides until [`HeadlessHost::mount_pending`] is called.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::trace;

use super::{NodeId, RenderedSlide, SlideHost, Target};
use crate::layout::{measure_slide_heights, MeasureItem};
use crate::types::{SlideClass, SlideKey, StyleProp};

/// Default height of one text row in pixels.
pub const DEFAULT_LINE_HEIGHT: f32 = 20.0;

// =============================================================================
// Element state
// =============================================================================

#[derive(Debug, Default, Clone)]
struct ElementState {
    classes: SlideClass,
    extra_classes: BTreeSet<String>,
    styles: BTreeMap<StyleProp, String>,
}

impl ElementState {
    fn add_class(&mut self, class: &str) {
        match SlideClass::from_class_name(class) {
            Some(flag) => self.classes.insert(flag),
            None => {
                self.extra_classes.insert(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, class: &str) {
        match SlideClass::from_class_name(class) {
            Some(flag) => self.classes.remove(flag),
            None => {
                self.extra_classes.remove(class);
            }
        }
    }

    fn has_class(&self, class: &str) -> bool {
        match SlideClass::from_class_name(class) {
            Some(flag) => self.classes.contains(flag),
            None => self.extra_classes.contains(class),
        }
    }

    fn set_style(&mut self, prop: StyleProp, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => {
                self.styles.insert(prop, v.to_string());
            }
            _ => {
                self.styles.remove(&prop);
            }
        }
    }
}

#[derive(Debug)]
struct MountedSlide {
    key: SlideKey,
    node: NodeId,
    content: String,
    wrapped: bool,
    element: ElementState,
}

// =============================================================================
// HeadlessHost
// =============================================================================

/// In-memory [`SlideHost`] for `String` slide content.
#[derive(Debug)]
pub struct HeadlessHost {
    width: u16,
    line_height: f32,
    container: ElementState,
    container_id: Option<String>,
    slides: Vec<MountedSlide>,
    heights: HashMap<NodeId, f32>,
    free_nodes: Vec<usize>,
    next_node: usize,
    deferred_mount: bool,
    pending: Option<Vec<RenderedSlide<String>>>,
    reflow_count: usize,
    render_count: usize,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(80)
    }
}

impl HeadlessHost {
    /// Container `width` columns wide.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            line_height: DEFAULT_LINE_HEIGHT,
            container: ElementState::default(),
            container_id: None,
            slides: Vec::new(),
            heights: HashMap::new(),
            free_nodes: Vec::new(),
            next_node: 0,
            deferred_mount: false,
            pending: None,
            reflow_count: 0,
            render_count: 0,
        }
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Stage slides on `render_slides` instead of mounting them.
    pub fn set_deferred_mount(&mut self, deferred: bool) {
        self.deferred_mount = deferred;
    }

    /// Mount whatever the last deferred render staged.
    pub fn mount_pending(&mut self) {
        if let Some(slides) = self.pending.take() {
            self.reconcile(slides);
        }
    }

    /// Replace a mounted slide's text without a render pass (content reflow).
    pub fn replace_content(&mut self, key: SlideKey, content: impl Into<String>) {
        if let Some(slide) = self.slides.iter_mut().find(|s| s.key == key) {
            slide.content = content.into();
        }
        self.remeasure();
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn mounted_keys(&self) -> Vec<SlideKey> {
        self.slides.iter().map(|s| s.key).collect()
    }

    pub fn content(&self, key: SlideKey) -> Option<&str> {
        self.slide(key).map(|s| s.content.as_str())
    }

    pub fn is_wrapped(&self, key: SlideKey) -> Option<bool> {
        self.slide(key).map(|s| s.wrapped)
    }

    /// Contract classes on the slide mounted for `key`.
    pub fn slide_classes(&self, key: SlideKey) -> Option<SlideClass> {
        self.slide(key).map(|s| s.element.classes)
    }

    pub fn slide_has_class(&self, key: SlideKey, class: &str) -> bool {
        self.slide(key).is_some_and(|s| s.element.has_class(class))
    }

    pub fn slide_style(&self, key: SlideKey, prop: StyleProp) -> Option<&str> {
        self.slide(key)
            .and_then(|s| s.element.styles.get(&prop))
            .map(String::as_str)
    }

    pub fn container_has_class(&self, class: &str) -> bool {
        self.container.has_class(class)
    }

    pub fn container_style(&self, prop: StyleProp) -> Option<&str> {
        self.container.styles.get(&prop).map(String::as_str)
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    /// Slides carrying `class`, by key.
    pub fn keys_with(&self, class: SlideClass) -> Vec<SlideKey> {
        self.slides
            .iter()
            .filter(|s| s.element.classes.contains(class))
            .map(|s| s.key)
            .collect()
    }

    pub fn reflow_count(&self) -> usize {
        self.reflow_count
    }

    /// Number of `render_slides` calls seen.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn slide(&self, key: SlideKey) -> Option<&MountedSlide> {
        self.slides.iter().find(|s| s.key == key)
    }

    fn element_mut(&mut self, target: Target) -> Option<&mut ElementState> {
        match target {
            Target::Container => Some(&mut self.container),
            Target::Slide(node) => self
                .slides
                .iter_mut()
                .find(|s| s.node == node)
                .map(|s| &mut s.element),
        }
    }

    fn element(&self, target: Target) -> Option<&ElementState> {
        match target {
            Target::Container => Some(&self.container),
            Target::Slide(node) => self.slides.iter().find(|s| s.node == node).map(|s| &s.element),
        }
    }

    fn allocate_node(&mut self) -> NodeId {
        let index = self.free_nodes.pop().unwrap_or_else(|| {
            let index = self.next_node;
            self.next_node += 1;
            index
        });
        NodeId(index)
    }

    fn release_node(&mut self, node: NodeId) {
        self.heights.remove(&node);
        self.free_nodes.push(node.0);
    }

    fn reconcile(&mut self, rendered: Vec<RenderedSlide<String>>) {
        let mut previous: Vec<MountedSlide> = std::mem::take(&mut self.slides);
        let mut next = Vec::with_capacity(rendered.len());

        for slide in rendered {
            match previous.iter().position(|m| m.key == slide.key) {
                Some(position) => {
                    let mut mounted = previous.swap_remove(position);
                    mounted.content = slide.content;
                    mounted.wrapped = slide.wrapped;
                    next.push(mounted);
                }
                None => {
                    let node = self.allocate_node();
                    trace!(key = slide.key, node = node.0, "mount slide");
                    next.push(MountedSlide {
                        key: slide.key,
                        node,
                        content: slide.content,
                        wrapped: slide.wrapped,
                        element: ElementState::default(),
                    });
                }
            }
        }

        for gone in previous {
            trace!(key = gone.key, node = gone.node.0, "unmount slide");
            self.release_node(gone.node);
        }

        self.slides = next;
        self.remeasure();
    }

    fn remeasure(&mut self) {
        let items: Vec<MeasureItem<'_>> = self
            .slides
            .iter()
            .map(|s| MeasureItem { id: s.node.0, text: s.content.as_str() })
            .collect();
        let heights = measure_slide_heights(&items, self.width, self.line_height);
        self.heights = heights.into_iter().map(|(id, h)| (NodeId(id), h)).collect();
    }
}

impl SlideHost for HeadlessHost {
    type Content = String;

    fn render_slides(&mut self, slides: Vec<RenderedSlide<String>>) {
        self.render_count += 1;
        if self.deferred_mount {
            self.pending = Some(slides);
            return;
        }
        self.reconcile(slides);
    }

    fn slide_nodes(&self) -> Vec<(SlideKey, NodeId)> {
        self.slides.iter().map(|s| (s.key, s.node)).collect()
    }

    fn node_for(&self, key: SlideKey) -> Option<NodeId> {
        self.slide(key).map(|s| s.node)
    }

    fn add_class(&mut self, target: Target, class: &str) {
        if let Some(element) = self.element_mut(target) {
            element.add_class(class);
        }
    }

    fn remove_class(&mut self, target: Target, class: &str) {
        if let Some(element) = self.element_mut(target) {
            element.remove_class(class);
        }
    }

    fn has_class(&self, target: Target, class: &str) -> bool {
        self.element(target).is_some_and(|e| e.has_class(class))
    }

    fn set_style(&mut self, target: Target, prop: StyleProp, value: Option<&str>) {
        if let Some(element) = self.element_mut(target) {
            element.set_style(prop, value);
        }
    }

    fn client_height(&self, node: NodeId) -> Option<f32> {
        let explicit = self
            .slides
            .iter()
            .find(|s| s.node == node)
            .and_then(|s| s.element.styles.get(&StyleProp::Height))
            .and_then(|h| h.strip_suffix("px"))
            .and_then(|h| h.parse::<f32>().ok());
        explicit.or_else(|| self.heights.get(&node).copied())
    }

    fn force_reflow(&mut self, _node: NodeId) {
        self.reflow_count += 1;
    }

    fn set_container_id(&mut self, id: Option<&str>) {
        self.container_id = id.map(str::to_string);
    }
}

// =============================================================================
// Tests
// =============================================================================
