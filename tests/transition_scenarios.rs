//! End-to-end transition scenarios against the headless host.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use spark_transition::SlideHost;
use spark_transition::state::animate::{heavy_animation_count, reset_heavy_animations};
use spark_transition::{
    reset_animation_settings, set_animation_level, AnimationLevel, AnimationName, Direction,
    HeadlessHost, HostEvent, RenderInput, SlideClass, SlideKey, SlideRender, StyleProp,
    SwipeEvent, Transition, TransitionPhase, TransitionProps, ACTIVE_SLIDE_CLASS_NAME,
    FALLBACK_ANIMATION_END, SLIDE_CLASS_NAME,
};

// =============================================================================
// Helpers
// =============================================================================

#[derive(Clone, Default)]
struct Counters {
    starts: Rc<Cell<usize>>,
    stops: Rc<Cell<usize>>,
}

impl Counters {
    fn attach(&self, props: TransitionProps) -> TransitionProps {
        let starts = self.starts.clone();
        let stops = self.stops.clone();
        TransitionProps {
            on_start: Some(Rc::new(move || starts.set(starts.get() + 1))),
            on_stop: Some(Rc::new(move || stops.set(stops.get() + 1))),
            ..props
        }
    }

    fn get(&self) -> (usize, usize) {
        (self.starts.get(), self.stops.get())
    }
}

fn setup(props: TransitionProps) -> Transition<HeadlessHost> {
    reset_animation_settings();
    reset_heavy_animations();
    Transition::new(HeadlessHost::new(40).with_line_height(10.0), props)
}

fn slides(key: SlideKey) -> RenderInput<String> {
    RenderInput::new(key, SlideRender::dynamic(|s| format!("slide {}", s.key)))
}

/// Content with `key + 1` lines, so each slide has a distinct height.
fn tall_slides(key: SlideKey) -> RenderInput<String> {
    RenderInput::new(
        key,
        SlideRender::dynamic(|s| vec!["line"; s.key as usize + 1].join("\n")),
    )
}

fn fixed(count: usize) -> TransitionProps {
    TransitionProps { render_count: Some(count), ..Default::default() }
}

fn finish_animation(t: &mut Transition<HeadlessHost>, key: SlideKey) {
    let node = t.host().node_for(key).expect("slide mounted");
    t.dispatch(HostEvent::AnimationEnd(node));
    t.flush_frame();
}

// =============================================================================
// Mount and direction
// =============================================================================

#[test]
fn test_initial_mount_snaps_without_callbacks() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(fixed(3)));
    t.render(slides(1));

    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert_eq!(t.host().keys_with(SlideClass::SLIDE), vec![1]);
    assert_eq!(counters.get(), (0, 0));
    assert!(!t.is_animating());
}

#[test]
fn test_forward_and_backward_container_classes() {
    let mut t = setup(fixed(3));
    t.render(slides(0));
    t.render(slides(1));
    assert!(t.host().container_has_class("Transition-slide"));
    assert!(!t.host().container_has_class("Transition-slideBackwards"));
    finish_animation(&mut t, 1);

    t.render(slides(0));
    assert!(t.host().container_has_class("Transition-slideBackwards"));
    assert!(!t.host().container_has_class("Transition-slide"));
    finish_animation(&mut t, 0);
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![0]);
}

#[test]
fn test_explicit_direction_overrides_key_order() {
    let mut t = setup(TransitionProps { direction: Direction::Backward, ..fixed(3) });
    t.render(slides(0));
    t.render(slides(2));
    assert!(t.host().container_has_class("Transition-slideBackwards"));

    let mut t = setup(TransitionProps { direction: Direction::Inverse, ..fixed(3) });
    t.render(slides(0));
    t.render(slides(1));
    assert!(t.host().container_has_class("Transition-slideBackwards"));
}

#[test]
fn test_transitional_classes_during_animation() {
    let mut t = setup(fixed(3));
    t.render(RenderInput { next_key: Some(2), ..slides(0) });
    t.render(RenderInput { next_key: Some(2), ..slides(1) });

    assert_eq!(t.host().keys_with(SlideClass::FROM), vec![0]);
    assert_eq!(t.host().keys_with(SlideClass::TO), vec![1]);
    assert_eq!(t.host().keys_with(SlideClass::INACTIVE), vec![2]);
    assert!(t.host().keys_with(SlideClass::ACTIVE).is_empty());
}

#[test]
fn test_slide_class_tokens_on_every_slide() {
    let mut t = setup(TransitionProps {
        slide_class_name: Some("card  padded".to_string()),
        ..fixed(3)
    });
    t.render(RenderInput { prev_key: Some(0), next_key: Some(2), ..slides(1) });

    for key in [0, 1, 2] {
        assert!(t.host().slide_has_class(key, SLIDE_CLASS_NAME));
        assert!(t.host().slide_has_class(key, "card"));
        assert!(t.host().slide_has_class(key, "padded"));
    }
}

// =============================================================================
// Instant paths
// =============================================================================

#[test]
fn test_none_name_is_instant() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(TransitionProps { name: AnimationName::None, ..fixed(2) }));
    t.render(slides(0));
    t.render(slides(1));

    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert_eq!(t.host().keys_with(SlideClass::INACTIVE), vec![0]);
    assert_eq!(counters.get(), (1, 1));
    assert_eq!(t.pending_completions(), 0);
    assert_eq!(t.phase(), TransitionPhase::Idle);
}

#[test]
fn test_disabled_animations_are_instant() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(fixed(2)));
    set_animation_level(AnimationLevel::Min);
    t.render(slides(0));
    t.render(slides(1));

    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert!(!t.host().container_has_class("Transition-slide"));
    assert_eq!(counters.get(), (1, 1));
    assert_eq!(heavy_animation_count(), 0);
    reset_animation_settings();
}

// =============================================================================
// Callbacks and cleanup
// =============================================================================

#[test]
fn test_start_and_stop_fire_once_per_transition() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(fixed(2)));
    t.render(slides(0));
    t.render(slides(1));
    assert_eq!(counters.get(), (1, 0));
    assert_eq!(heavy_animation_count(), 1);

    finish_animation(&mut t, 1);
    assert_eq!(counters.get(), (1, 1));
    assert_eq!(heavy_animation_count(), 0);

    // A stray late event changes nothing.
    finish_animation(&mut t, 1);
    assert_eq!(counters.get(), (1, 1));
}

#[test]
fn test_cleanup_evicts_all_but_exception() {
    let mut t = setup(TransitionProps {
        should_cleanup: true,
        cleanup_exception_key: Some(0),
        ..fixed(3)
    });
    t.render(slides(0));
    t.render(slides(1));
    t.render(slides(1));
    finish_animation(&mut t, 1);
    t.render(slides(2));
    finish_animation(&mut t, 2);

    assert_eq!(t.cache().keys(), vec![0, 2]);
    assert_eq!(t.host().mounted_keys(), vec![0, 2]);
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![2]);
}

#[test]
fn test_cleanup_without_exception_keeps_active() {
    let mut t = setup(TransitionProps { should_cleanup: true, ..fixed(3) });
    t.render(slides(0));
    t.render(slides(1));
    finish_animation(&mut t, 1);

    // The force update re-records the active slide.
    assert_eq!(t.cache().keys(), vec![1]);
    assert_eq!(t.host().mounted_keys(), vec![1]);
}

// =============================================================================
// Supersession
// =============================================================================

#[test]
fn test_newest_trigger_wins() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(fixed(3)));
    t.render(slides(0));
    t.render(slides(1));
    assert!(!t.host().slide_has_class(1, ACTIVE_SLIDE_CLASS_NAME));
    t.render(slides(2));
    assert!(!t.host().slide_has_class(1, ACTIVE_SLIDE_CLASS_NAME));
    assert_eq!(t.watermark(), 2);
    assert_eq!(heavy_animation_count(), 2);

    // The superseded session completes late: no class changes.
    finish_animation(&mut t, 1);
    assert_eq!(t.host().keys_with(SlideClass::TO), vec![2]);
    assert_eq!(t.host().keys_with(SlideClass::FROM), vec![1]);
    assert!(!t.host().slide_has_class(1, ACTIVE_SLIDE_CLASS_NAME));
    assert!(t.is_animating());
    assert_eq!(counters.get(), (1, 0));
    assert_eq!(heavy_animation_count(), 1);

    finish_animation(&mut t, 2);
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![2]);
    assert_eq!(t.host().keys_with(SlideClass::INACTIVE), vec![0, 1]);
    assert!(!t.host().slide_has_class(1, ACTIVE_SLIDE_CLASS_NAME));
    assert_eq!(counters.get(), (1, 1));
    assert_eq!(heavy_animation_count(), 0);
}

#[test]
fn test_superseded_then_back_to_first_key() {
    let mut t = setup(fixed(2));
    t.render(slides(0));
    t.render(slides(1));
    t.render(slides(0));
    assert_eq!(t.watermark(), 2);

    // Completion of the first session (watching slide 1) is stale.
    finish_animation(&mut t, 1);
    assert!(t.is_animating());

    finish_animation(&mut t, 0);
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![0]);
    assert!(!t.is_animating());
}

#[test]
fn test_unmounted_slide_releases_stale_session() {
    let mut t = setup(TransitionProps { should_cleanup: true, ..fixed(3) });
    t.render(slides(0));
    t.render(slides(1));
    t.render(slides(2));
    assert_eq!(t.pending_completions(), 2);

    // Cleanup unmounts slides 0 and 1 while session 1 still waits on slide 1.
    finish_animation(&mut t, 2);
    assert_eq!(t.host().mounted_keys(), vec![2]);
    assert_eq!(t.pending_completions(), 0);
    assert_eq!(heavy_animation_count(), 0);

    // Node ids of the unmounted slides get recycled.
    t.render(slides(0));
    assert_eq!(t.pending_completions(), 1);
    finish_animation(&mut t, 0);
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![0]);
    assert!(!t.is_animating());
}

#[test]
fn test_instant_trigger_closes_running_animation() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(fixed(3)));
    t.render(slides(0));
    t.render(slides(1));
    set_animation_level(AnimationLevel::Min);
    t.render(slides(2));

    assert_eq!(counters.get(), (1, 1));
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![2]);
    assert!(!t.is_animating());

    // The old session still lets go of its guard.
    t.advance_clock(FALLBACK_ANIMATION_END);
    t.flush_frame();
    assert_eq!(heavy_animation_count(), 0);
    assert_eq!(counters.get(), (1, 1));
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![2]);
    reset_animation_settings();
}

// =============================================================================
// Fallback timer
// =============================================================================

#[test]
fn test_fallback_forces_completion() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(fixed(2)));
    t.render(slides(0));
    t.render(slides(1));

    t.advance_clock(Duration::from_millis(999));
    t.flush_frame();
    assert!(t.is_animating());

    t.advance_clock(FALLBACK_ANIMATION_END);
    t.flush_frame();
    assert!(!t.is_animating());
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert_eq!(counters.get(), (1, 1));

    // The real event arriving afterwards is ignored.
    finish_animation(&mut t, 1);
    assert_eq!(counters.get(), (1, 1));
}

// =============================================================================
// Swipe control
// =============================================================================

#[test]
fn test_swipe_waits_without_fallback() {
    let mut t = setup(TransitionProps { with_swipe_control: true, ..fixed(2) });
    t.render(slides(0));
    t.render(slides(1));
    assert!(t.is_swipe_armed());

    t.advance_clock(Duration::from_secs(10));
    t.flush_frame();
    assert!(t.is_animating());

    finish_animation(&mut t, 1);
    assert!(!t.is_animating());
    assert!(!t.is_swipe_armed());
}

#[test]
fn test_swipe_cancel_restores_outgoing() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(TransitionProps { with_swipe_control: true, ..fixed(2) }));
    t.render(slides(0));
    t.render(slides(1));

    t.dispatch(HostEvent::Swipe(SwipeEvent::Start));
    t.dispatch(HostEvent::Swipe(SwipeEvent::Move { progress: 0.8 }));
    t.dispatch(HostEvent::Swipe(SwipeEvent::End));

    assert!(!t.is_animating());
    assert_eq!(t.active_key(), Some(0));
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![0]);
    assert!(t.host().keys_with(SlideClass::FROM).is_empty());
    assert!(!t.host().container_has_class("Transition-slide"));
    assert_eq!(counters.get(), (1, 1));
    assert_eq!(heavy_animation_count(), 0);

    // The next change to the cancelled key is instant, once.
    t.render(slides(1));
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert!(!t.is_animating());
    assert_eq!(counters.get(), (2, 2));

    t.render(slides(0));
    assert!(t.is_animating());
}

#[test]
fn test_short_swipe_lets_animation_finish() {
    let mut t = setup(TransitionProps { with_swipe_control: true, ..fixed(2) });
    t.render(slides(0));
    t.render(slides(1));

    t.dispatch(HostEvent::Swipe(SwipeEvent::Start));
    t.dispatch(HostEvent::Swipe(SwipeEvent::Move { progress: 0.1 }));
    t.dispatch(HostEvent::Swipe(SwipeEvent::End));
    assert!(t.is_animating());
    assert!(!t.is_swipe_armed());

    // Released waits fall back to the timer.
    t.advance_clock(FALLBACK_ANIMATION_END);
    t.flush_frame();
    assert!(!t.is_animating());
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
}

// =============================================================================
// Transform-driven path
// =============================================================================

#[test]
fn test_optimized_slide_in() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(TransitionProps {
        name: AnimationName::SlideOptimized,
        ..fixed(2)
    }));
    t.render(slides(0));
    assert_eq!(t.host().slide_style(0, StyleProp::Transform), Some("translate3d(0, 0, 0)"));

    t.render(slides(1));
    assert_eq!(t.host().slide_style(1, StyleProp::Transform), Some("translate3d(100%, 0, 0)"));
    assert_eq!(t.host().slide_style(1, StyleProp::Transition), Some("none"));
    assert_eq!(t.host().reflow_count(), 0);

    t.flush_frame();
    assert_eq!(t.host().reflow_count(), 1);
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert_eq!(t.host().slide_style(0, StyleProp::Transform), Some("translate3d(-100%, 0, 0)"));
    assert_eq!(t.host().slide_style(1, StyleProp::Transform), Some("translate3d(0, 0, 0)"));
    assert_eq!(t.host().slide_style(1, StyleProp::Transition), None);

    // animationend is not what this path listens for.
    finish_animation(&mut t, 1);
    assert!(t.is_animating());

    let node = t.host().node_for(1).unwrap();
    t.dispatch(HostEvent::TransitionEnd(node));
    t.flush_frame();
    assert!(!t.is_animating());
    assert_eq!(t.host().slide_style(0, StyleProp::Transform), None);
    assert_eq!(t.host().slide_style(0, StyleProp::Transition), Some("none"));
    assert_eq!(counters.get(), (1, 1));
}

#[test]
fn test_optimized_rtl_flips_direction() {
    let mut t = setup(TransitionProps { name: AnimationName::SlideOptimizedRtl, ..fixed(2) });
    t.render(slides(0));
    t.render(slides(1));
    assert_eq!(t.host().slide_style(1, StyleProp::Transform), Some("translate3d(-100%, 0, 0)"));

    t.flush_frame();
    assert_eq!(t.host().slide_style(0, StyleProp::Transform), Some("translate3d(100%, 0, 0)"));
}

#[test]
fn test_optimized_sets_container_direction() {
    let mut t = setup(TransitionProps { name: AnimationName::SlideOptimized, ..fixed(2) });
    t.render(slides(0));
    t.render(slides(1));
    assert!(t.host().container_has_class("Transition-slideOptimized"));
    assert!(!t.host().container_has_class("Transition-slideOptimizedBackwards"));

    let node = t.host().node_for(1).unwrap();
    t.flush_frame();
    t.dispatch(HostEvent::TransitionEnd(node));
    t.flush_frame();

    t.render(slides(0));
    assert!(t.host().container_has_class("Transition-slideOptimizedBackwards"));
    assert!(!t.host().container_has_class("Transition-slideOptimized"));
}

#[test]
fn test_optimized_rtl_container_class_uses_flipped_direction() {
    let mut t = setup(TransitionProps { name: AnimationName::SlideOptimizedRtl, ..fixed(2) });
    t.render(slides(0));
    t.render(slides(1));
    assert!(t.host().container_has_class("Transition-slideOptimizedRtlBackwards"));
    assert!(!t.host().container_has_class("Transition-slideOptimizedRtl"));
}

#[test]
fn test_optimized_rtl_disabled_keeps_direction() {
    let mut t = setup(TransitionProps { name: AnimationName::SlideOptimizedRtl, ..fixed(2) });
    set_animation_level(AnimationLevel::Min);
    t.render(slides(0));
    t.render(slides(1));

    assert!(t.host().container_has_class("Transition-slideOptimizedRtl"));
    assert!(!t.host().container_has_class("Transition-slideOptimizedRtlBackwards"));
    reset_animation_settings();
}

#[test]
fn test_optimized_disabled_snaps() {
    let counters = Counters::default();
    let mut t = setup(counters.attach(TransitionProps {
        name: AnimationName::SlideOptimized,
        ..fixed(2)
    }));
    set_animation_level(AnimationLevel::Min);
    t.render(slides(0));
    t.render(slides(1));

    assert!(!t.is_animating());
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![1]);
    assert_eq!(t.host().slide_style(1, StyleProp::Transform), Some("translate3d(0, 0, 0)"));
    assert_eq!(t.host().slide_style(0, StyleProp::Transform), None);
    assert_eq!(counters.get(), (1, 1));
    reset_animation_settings();
}

// =============================================================================
// Watched node asymmetry
// =============================================================================

#[test]
fn test_reveal_backwards_watches_outgoing() {
    let mut t = setup(TransitionProps { name: AnimationName::Reveal, ..fixed(2) });
    t.render(slides(1));
    t.render(slides(0));

    finish_animation(&mut t, 0);
    assert!(t.is_animating());
    finish_animation(&mut t, 1);
    assert!(!t.is_animating());
}

#[test]
fn test_reveal_forward_watches_incoming() {
    let mut t = setup(TransitionProps { name: AnimationName::Reveal, ..fixed(2) });
    t.render(slides(0));
    t.render(slides(1));

    finish_animation(&mut t, 0);
    assert!(t.is_animating());
    finish_animation(&mut t, 1);
    assert!(!t.is_animating());
}

// =============================================================================
// Deferred mount
// =============================================================================

#[test]
fn test_trigger_waits_for_mount() {
    let mut t = setup(fixed(2));
    t.host_mut().set_deferred_mount(true);
    t.render(slides(0));
    assert!(t.host().mounted_keys().is_empty());

    t.host_mut().mount_pending();
    t.force_update();
    assert_eq!(t.host().keys_with(SlideClass::ACTIVE), vec![0]);

    // Slide 1 is not mounted yet: the trigger is held back.
    t.render(slides(1));
    assert!(!t.is_animating());

    t.host_mut().set_deferred_mount(false);
    t.host_mut().mount_pending();
    t.force_update();
    assert!(t.is_animating());
    assert_eq!(t.host().keys_with(SlideClass::TO), vec![1]);
}

// =============================================================================
// Height restoration
// =============================================================================

#[test]
fn test_height_follows_active_slide() {
    let mut t = setup(TransitionProps { should_restore_height: true, ..fixed(3) });
    t.render(tall_slides(0));
    t.flush_frame();
    assert_eq!(t.host().container_style(StyleProp::Height), Some("10px"));
    assert_eq!(t.host().container_style(StyleProp::FlexBasis), Some("10px"));
    assert_eq!(t.host().slide_style(0, StyleProp::Height), Some("auto"));

    t.render(tall_slides(2));
    t.flush_frame();
    finish_animation(&mut t, 2);
    assert_eq!(t.host().container_style(StyleProp::Height), Some("30px"));
}

#[test]
fn test_height_follows_content_without_key_change() {
    let mut t = setup(TransitionProps { should_restore_height: true, ..fixed(2) });
    t.render(RenderInput::new(0, SlideRender::Static("a".to_string())));
    t.flush_frame();
    assert_eq!(t.host().container_style(StyleProp::Height), Some("10px"));

    // The slide grows on its own; nothing is pinned until the next render.
    t.host_mut().replace_content(0, "a\nb\nc");
    t.flush_frame();
    assert_eq!(t.host().container_style(StyleProp::Height), Some("10px"));

    t.render(RenderInput::new(0, SlideRender::Static("a\nb\nc".to_string())));
    t.flush_frame();
    assert!(!t.is_animating());
    assert_eq!(t.host().container_style(StyleProp::Height), Some("30px"));
    assert_eq!(t.host().container_style(StyleProp::FlexBasis), Some("30px"));
}

#[test]
fn test_height_untouched_when_disabled() {
    let mut t = setup(fixed(2));
    t.render(tall_slides(1));
    t.flush_frame();
    assert_eq!(t.host().container_style(StyleProp::Height), None);
}
