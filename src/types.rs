//! Core types for spark-transition.
//!
//! These types define the contract between the transition engine and the host
//! that renders slides: keys, named styles, directions, the fixed CSS class
//! vocabulary and the inline style properties the engine is allowed to touch.

use std::fmt;
use std::str::FromStr;

use crate::error::TransitionError;

// =============================================================================
// Slide Key
// =============================================================================

/// Ordinal identifying one renderable content unit.
///
/// Keys are not necessarily contiguous or monotonic. Only their relative
/// ordering matters (for direction inference).
pub type SlideKey = i32;

/// Arguments passed to dynamic slide content when it is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideState {
    /// This slide is the active one.
    pub is_active: bool,
    /// This slide was the active one before the current transition.
    pub is_from: bool,
    /// Key of the slide being rendered.
    pub key: SlideKey,
    /// Key currently designated active.
    pub active_key: SlideKey,
}

// =============================================================================
// Animation Name
// =============================================================================

/// Named transition style. The CSS spelling is what ends up in the
/// `Transition-<name>` container classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationName {
    None,
    #[default]
    Slide,
    SlideRtl,
    SlideFade,
    ZoomFade,
    SlideLayers,
    Fade,
    PushSlide,
    Reveal,
    SlideOptimized,
    SlideOptimizedRtl,
    SemiFade,
    SlideVertical,
    SlideVerticalFade,
    SlideFadeAndroid,
}

impl AnimationName {
    pub const ALL: [AnimationName; 15] = [
        Self::None,
        Self::Slide,
        Self::SlideRtl,
        Self::SlideFade,
        Self::ZoomFade,
        Self::SlideLayers,
        Self::Fade,
        Self::PushSlide,
        Self::Reveal,
        Self::SlideOptimized,
        Self::SlideOptimizedRtl,
        Self::SemiFade,
        Self::SlideVertical,
        Self::SlideVerticalFade,
        Self::SlideFadeAndroid,
    ];

    /// CSS spelling of the style name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Slide => "slide",
            Self::SlideRtl => "slideRtl",
            Self::SlideFade => "slideFade",
            Self::ZoomFade => "zoomFade",
            Self::SlideLayers => "slideLayers",
            Self::Fade => "fade",
            Self::PushSlide => "pushSlide",
            Self::Reveal => "reveal",
            Self::SlideOptimized => "slideOptimized",
            Self::SlideOptimizedRtl => "slideOptimizedRtl",
            Self::SemiFade => "semiFade",
            Self::SlideVertical => "slideVertical",
            Self::SlideVerticalFade => "slideVerticalFade",
            Self::SlideFadeAndroid => "slideFadeAndroid",
        }
    }

    /// Container class applied while a forward transition runs.
    pub fn forward_class(self) -> String {
        format!("Transition-{}", self.as_str())
    }

    /// Container class applied while a backwards transition runs.
    pub fn backwards_class(self) -> String {
        format!("Transition-{}Backwards", self.as_str())
    }
}

impl fmt::Display for AnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationName {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| TransitionError::UnknownAnimation(s.to_string()))
    }
}

// =============================================================================
// Direction
// =============================================================================

/// How the visual direction of a transition is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Backwards when the previous key is numerically greater than the next.
    #[default]
    Auto,
    /// Backwards when the previous key is numerically smaller than the next.
    Inverse,
    /// Explicit `1`. Never backwards.
    Forward,
    /// Explicit `-1`. Always backwards.
    Backward,
}

impl FromStr for Direction {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(Self::Auto),
            "inverse" => Ok(Self::Inverse),
            "1" | "forward" => Ok(Self::Forward),
            "-1" | "backward" => Ok(Self::Backward),
            other => Err(TransitionError::UnknownDirection(other.to_string())),
        }
    }
}

// =============================================================================
// Animation Level
// =============================================================================

/// User-facing animation setting. `Min` disables transition animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum AnimationLevel {
    Min = 0,
    Medium = 1,
    #[default]
    Max = 2,
}

impl TryFrom<u8> for AnimationLevel {
    type Error = TransitionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Min),
            1 => Ok(Self::Medium),
            2 => Ok(Self::Max),
            other => Err(TransitionError::InvalidAnimationLevel(other)),
        }
    }
}

// =============================================================================
// Slide Classes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Contract classes a slide node can carry.
    ///
    /// Stylesheets key their animations off these names, so the spelling
    /// returned by [`SlideClass::class_name`] is fixed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SlideClass: u8 {
        const SLIDE = 1 << 0;
        const ACTIVE = 1 << 1;
        const FROM = 1 << 2;
        const TO = 1 << 3;
        const INACTIVE = 1 << 4;
    }
}

pub const SLIDE_CLASS_NAME: &str = "Transition_slide";
pub const ACTIVE_SLIDE_CLASS_NAME: &str = "Transition_slide-active";
pub const FROM_SLIDE_CLASS_NAME: &str = "Transition_slide-from";
pub const TO_SLIDE_CLASS_NAME: &str = "Transition_slide-to";
pub const INACTIVE_SLIDE_CLASS_NAME: &str = "Transition_slide-inactive";

/// Class carried by every transition container.
pub const CONTAINER_CLASS_NAME: &str = "Transition";

impl SlideClass {
    /// CSS class name of a single flag. Returns `None` for combined or empty sets.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::SLIDE => Some(SLIDE_CLASS_NAME),
            Self::ACTIVE => Some(ACTIVE_SLIDE_CLASS_NAME),
            Self::FROM => Some(FROM_SLIDE_CLASS_NAME),
            Self::TO => Some(TO_SLIDE_CLASS_NAME),
            Self::INACTIVE => Some(INACTIVE_SLIDE_CLASS_NAME),
            _ => None,
        }
    }

    /// Flag for a contract class name, if it is one.
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            SLIDE_CLASS_NAME => Some(Self::SLIDE),
            ACTIVE_SLIDE_CLASS_NAME => Some(Self::ACTIVE),
            FROM_SLIDE_CLASS_NAME => Some(Self::FROM),
            TO_SLIDE_CLASS_NAME => Some(Self::TO),
            INACTIVE_SLIDE_CLASS_NAME => Some(Self::INACTIVE),
            _ => None,
        }
    }

    /// Classes that only exist while a transition is in flight.
    pub const TRANSITIONAL: Self = Self::FROM.union(Self::TO);
}

// =============================================================================
// Inline Styles
// =============================================================================

/// Inline style properties the engine writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProp {
    Transition,
    Transform,
    Height,
    FlexBasis,
}

impl StyleProp {
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::Transform => "transform",
            Self::Height => "height",
            Self::FlexBasis => "flex-basis",
        }
    }
}

/// Resting transform for a settled slide.
pub const TRANSFORM_REST: &str = "translate3d(0, 0, 0)";

/// Off-screen transform on one side of the container.
pub fn transform_offscreen(to_left: bool) -> String {
    format!("translate3d({}100%, 0, 0)", if to_left { "-" } else { "" })
}

/// Format a pixel length for inline styles.
pub fn px(value: f32) -> String {
    format!("{}px", value.round() as i64)
}

// =============================================================================
// Transition Phase
// =============================================================================

/// Lifecycle phase of the controller's current transition session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Preparing,
    Animating,
    Settling,
}

// =============================================================================
// Tests
// =============================================================================
