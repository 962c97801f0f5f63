//! Primitive types - Transition props, slide content and callbacks.
//!
//! Props follow the framework convention: a plain struct with a `Default`
//! implementation, filled in with `..Default::default()`.

use std::fmt;
use std::rc::Rc;

use crate::types::{AnimationName, Direction, SlideKey, SlideState};

// =============================================================================
// Callback Types
// =============================================================================

/// Lifecycle callback (start, stop, container click).
///
/// Rc so the controller can clone it into pending completions.
pub type TransitionCallback = Rc<dyn Fn()>;

/// Content function: receives the slide's state and produces its content.
pub type ContentFn<C> = Rc<dyn Fn(SlideState) -> C>;

// =============================================================================
// Slide Render - static content or a function of slide state
// =============================================================================

/// Content for a slide: either a fixed value or a function resolved at render
/// time with `(is_active, is_from, key, active_key)`.
pub enum SlideRender<C> {
    /// Same content regardless of slide state.
    Static(C),
    /// Content computed from the slide's state.
    Dynamic(ContentFn<C>),
}

impl<C: Clone> SlideRender<C> {
    /// Resolve into concrete content for one slide.
    pub fn resolve(&self, state: SlideState) -> C {
        match self {
            SlideRender::Static(content) => content.clone(),
            SlideRender::Dynamic(f) => f(state),
        }
    }
}

impl<C> SlideRender<C> {
    /// Build dynamic content from a closure.
    pub fn dynamic(f: impl Fn(SlideState) -> C + 'static) -> Self {
        SlideRender::Dynamic(Rc::new(f))
    }
}

impl<C: Clone> Clone for SlideRender<C> {
    fn clone(&self) -> Self {
        match self {
            SlideRender::Static(content) => SlideRender::Static(content.clone()),
            SlideRender::Dynamic(f) => SlideRender::Dynamic(f.clone()),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for SlideRender<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideRender::Static(content) => f.debug_tuple("Static").field(content).finish(),
            SlideRender::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<C> From<C> for SlideRender<C> {
    fn from(content: C) -> Self {
        SlideRender::Static(content)
    }
}

// =============================================================================
// Render Input - what the collaborator supplies on every render
// =============================================================================

/// Per-render input: the active key, optional neighbours to pre-render, and
/// the content for the active slide.
#[derive(Debug, Clone)]
pub struct RenderInput<C> {
    pub active_key: SlideKey,
    /// Neighbour rendered ahead of time (e.g. for swipe-back).
    pub prev_key: Option<SlideKey>,
    /// Neighbour rendered ahead of time (e.g. for swipe-forward).
    pub next_key: Option<SlideKey>,
    pub children: SlideRender<C>,
}

impl<C> RenderInput<C> {
    /// Input with only an active key and its content.
    pub fn new(active_key: SlideKey, children: impl Into<SlideRender<C>>) -> Self {
        Self {
            active_key,
            prev_key: None,
            next_key: None,
            children: children.into(),
        }
    }
}

// =============================================================================
// Transition Props
// =============================================================================

/// Properties for the transition container.
///
/// # Example
///
/// ```ignore
/// use spark_transition::{AnimationName, TransitionProps};
///
/// let props = TransitionProps {
///     name: AnimationName::SlideFade,
///     should_cleanup: true,
///     cleanup_exception_key: Some(0),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Default)]
pub struct TransitionProps {
    pub name: AnimationName,
    pub direction: Direction,
    /// Fixed key space `0..render_count`. Disables pruning on key change.
    pub render_count: Option<usize>,
    pub should_restore_height: bool,
    pub should_cleanup: bool,
    pub cleanup_exception_key: Option<SlideKey>,
    /// Wrap slides in keyed wrappers (async content that remounts mid-animation).
    pub should_wrap: bool,
    pub wrap_exception_key: Option<SlideKey>,
    pub id: Option<String>,
    pub class_name: Option<String>,
    /// Extra classes for every slide, whitespace separated.
    pub slide_class_name: Option<String>,
    pub with_swipe_control: bool,
    pub on_start: Option<TransitionCallback>,
    pub on_stop: Option<TransitionCallback>,
    pub on_container_click: Option<TransitionCallback>,
}

impl TransitionProps {
    /// Fast-list mode: no fixed render count.
    pub fn is_fast_list(&self) -> bool {
        self.render_count.is_none()
    }

    /// Tokens of `slide_class_name`.
    pub fn slide_class_tokens(&self) -> impl Iterator<Item = &str> {
        self.slide_class_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }

    pub(crate) fn fire_start(&self) {
        if let Some(cb) = &self.on_start {
            cb();
        }
    }

    pub(crate) fn fire_stop(&self) {
        if let Some(cb) = &self.on_stop {
            cb();
        }
    }
}

impl fmt::Debug for TransitionProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionProps")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("render_count", &self.render_count)
            .field("should_restore_height", &self.should_restore_height)
            .field("should_cleanup", &self.should_cleanup)
            .field("cleanup_exception_key", &self.cleanup_exception_key)
            .field("should_wrap", &self.should_wrap)
            .field("wrap_exception_key", &self.wrap_exception_key)
            .field("id", &self.id)
            .field("class_name", &self.class_name)
            .field("slide_class_name", &self.slide_class_name)
            .field("with_swipe_control", &self.with_swipe_control)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_render_ignores_state() {
        let render: SlideRender<&str> = "hello".into();
        let state = SlideState { is_active: false, is_from: true, key: 3, active_key: 1 };
        assert_eq!(render.resolve(state), "hello");
    }

    #[test]
    fn test_dynamic_render_sees_state() {
        let render = SlideRender::dynamic(|s: SlideState| {
            format!("{}:{}:{}", s.key, s.active_key, if s.is_active { "on" } else { "off" })
        });
        let state = SlideState { is_active: true, is_from: false, key: 2, active_key: 2 };
        assert_eq!(render.resolve(state), "2:2:on");
    }

    #[test]
    fn test_slide_class_tokens() {
        let props = TransitionProps {
            slide_class_name: Some("  page   custom-scroll ".to_string()),
            ..Default::default()
        };
        let tokens: Vec<&str> = props.slide_class_tokens().collect();
        assert_eq!(tokens, vec!["page", "custom-scroll"]);
        assert!(props.is_fast_list());
    }
}
