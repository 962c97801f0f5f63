//! Transition Engine - the slide handoff state machine.
//!
//! ```text
//! IDLE ──trigger──▶ PREPARING ──▶ ANIMATING ──completion──▶ SETTLING ──▶ IDLE
//!                       │              │
//!                       │              └──swipe cancel──▶ IDLE (rolled back)
//!                       └──instant / no nodes──▶ IDLE
//! ```
//!
//! A trigger is an edge: the active key of this render differs from the one
//! of the previous render. Re-renders with an unchanged key only re-apply the
//! static active/inactive classes (and do nothing at all while animating).
//!
//! # Sessions and the watermark
//!
//! Every trigger bumps a session watermark. Completion waits carry the id of
//! the session that armed them; when a completion arrives for a session that
//! is no longer the watermark, its class and style mutations are suppressed
//! and only its own bookkeeping (heavy-animation guard) is released. The
//! newest trigger decides the final state, never the last callback to fire.
//!
//! # Start/stop bracket
//!
//! `on_start` opens a bracket and `on_stop` closes it, exactly once each.
//! A trigger that supersedes a running animation continues the open bracket
//! instead of opening a second one. Instant transitions call both back to
//! back. The initial mount calls neither.
//!
//! Callbacks run while the controller is mutably borrowed and must not call
//! back into it.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use super::direction::{resolve_is_backwards, rtl_adjusted};
use super::height::{measure_height, measure_target, pin_container_height};
use super::render_cache::RenderCache;
use super::strategy::{
    is_rtl, is_transform_driven, select_strategy, watches_outgoing, AnimationStrategy,
};
use crate::host::{apply_slide_classes, NodeId, RenderedSlide, SlideHost, Target};
use crate::pipeline::scheduler::{
    FrameScheduler, SessionId, WaitId, WaitKind, FALLBACK_ANIMATION_END,
};
use crate::primitives::{RenderInput, TransitionProps};
use crate::state::animate::{animations_disabled, begin_heavy_animation, HeavyAnimationGuard};
use crate::state::swipe::{SwipeBridge, SwipeEvent, SwipeOutcome};
use crate::types::{
    transform_offscreen, SlideClass, SlideKey, SlideState, StyleProp, TransitionPhase,
    CONTAINER_CLASS_NAME, TRANSFORM_REST,
};

// =============================================================================
// Events and tasks
// =============================================================================

/// Input from the rendering environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// `animationend` fired on a slide.
    AnimationEnd(NodeId),
    /// `transitionend` fired on a slide.
    TransitionEnd(NodeId),
    /// The container was clicked.
    ContainerClick,
    /// Gesture input for the swipe bridge.
    Swipe(SwipeEvent),
}

/// Read-phase work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReflowTask {
    /// Flush layout of the incoming slide before it slides in.
    SlideIn { session: SessionId, node: NodeId },
}

/// Mutate-phase work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationTask {
    /// Second pass of a transform-driven transition.
    SlideIn { session: SessionId },
    /// Terminal mutations of a session. `measured_height` was read before queuing.
    Settle { session: SessionId, measured_height: Option<f32> },
    /// Pin the container to a slide's height.
    PinHeight { node: NodeId, height: f32 },
}

/// Everything needed to settle or cancel one animated session.
#[derive(Debug)]
struct SessionRecord {
    active_key: SlideKey,
    prev_key: SlideKey,
    from: Option<NodeId>,
    to: Option<NodeId>,
    is_backwards: bool,
    strategy: AnimationStrategy,
    guard: HeavyAnimationGuard,
    wait: Option<WaitId>,
}

// =============================================================================
// Transition
// =============================================================================

/// Transition controller for one container.
pub struct Transition<H: SlideHost> {
    host: H,
    props: TransitionProps,
    cache: RenderCache<H::Content>,
    scheduler: FrameScheduler<ReflowTask, MutationTask>,
    swipe: SwipeBridge<SessionId>,
    last_input: Option<RenderInput<H::Content>>,
    /// Active key of the previous render.
    rendered_active_key: Option<SlideKey>,
    /// Previous active key of a trigger that found no mounted nodes.
    deferred_from: Option<SlideKey>,
    watermark: SessionId,
    sessions: HashMap<SessionId, SessionRecord>,
    is_animating: bool,
    is_swipe_just_cancelled: bool,
    bracket_open: bool,
    phase: TransitionPhase,
    phase_signal: Signal<TransitionPhase>,
    animating_signal: Signal<bool>,
}

impl<H> Transition<H>
where
    H: SlideHost,
    H::Content: Clone,
{
    pub fn new(host: H, props: TransitionProps) -> Self {
        let mut transition = Self {
            host,
            props: TransitionProps::default(),
            cache: RenderCache::new(),
            scheduler: FrameScheduler::new(),
            swipe: SwipeBridge::new(),
            last_input: None,
            rendered_active_key: None,
            deferred_from: None,
            watermark: 0,
            sessions: HashMap::new(),
            is_animating: false,
            is_swipe_just_cancelled: false,
            bracket_open: false,
            phase: TransitionPhase::Idle,
            phase_signal: signal(TransitionPhase::Idle),
            animating_signal: signal(false),
        };
        transition.set_props(props);
        transition
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn props(&self) -> &TransitionProps {
        &self.props
    }

    pub fn cache(&self) -> &RenderCache<H::Content> {
        &self.cache
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Reactive view of [`phase`](Self::phase).
    pub fn phase_signal(&self) -> Signal<TransitionPhase> {
        self.phase_signal.clone()
    }

    /// Reactive view of [`is_animating`](Self::is_animating).
    pub fn animating_signal(&self) -> Signal<bool> {
        self.animating_signal.clone()
    }

    /// Id of the most recent session.
    pub fn watermark(&self) -> SessionId {
        self.watermark
    }

    /// Active key the controller believes is on screen.
    pub fn active_key(&self) -> Option<SlideKey> {
        self.rendered_active_key
    }

    pub fn is_swipe_armed(&self) -> bool {
        self.swipe.is_armed()
    }

    pub fn pending_completions(&self) -> usize {
        self.scheduler.pending_waits()
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Replace the props. Container id and classes follow immediately.
    pub fn set_props(&mut self, props: TransitionProps) {
        for token in self.props.class_name.as_deref().unwrap_or_default().split_whitespace() {
            self.host.remove_class(Target::Container, token);
        }
        self.host.add_class(Target::Container, CONTAINER_CLASS_NAME);
        for token in props.class_name.as_deref().unwrap_or_default().split_whitespace() {
            self.host.add_class(Target::Container, token);
        }
        self.host.set_container_id(props.id.as_deref());
        self.props = props;
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Render pass: update the cache, reconcile slides with the host, then
    /// run the transition logic and the height effect.
    pub fn render(&mut self, input: RenderInput<H::Content>) {
        let active_key = input.active_key;
        let prev_active_key = self.deferred_from.take().or(self.rendered_active_key);
        let has_active_key_changed = prev_active_key.is_some_and(|prev| prev != active_key);

        if self.props.is_fast_list() && has_active_key_changed {
            self.cache.evict_all_except(prev_active_key);
        }

        self.cache.record(active_key, input.children.clone());
        for neighbour in [input.prev_key, input.next_key].into_iter().flatten() {
            self.cache.record(neighbour, input.children.clone());
        }

        self.rendered_active_key = Some(active_key);
        self.last_input = Some(input);

        let slides = self.build_slides(active_key, prev_active_key.filter(|_| has_active_key_changed));
        let expected = slides.len();
        self.host.render_slides(slides);
        self.forget_unmounted();

        self.run_transition(active_key, prev_active_key, has_active_key_changed, expected);
        self.restore_height_effect();
    }

    /// Re-render with the last input (after cleanup or a deferred mount).
    pub fn force_update(&mut self) {
        if let Some(input) = self.last_input.clone() {
            self.render(input);
        }
    }

    fn build_slides(
        &self,
        active_key: SlideKey,
        from_key: Option<SlideKey>,
    ) -> Vec<RenderedSlide<H::Content>> {
        let keys: Vec<SlideKey> = match self.props.render_count {
            Some(count) => (0..count)
                .filter_map(|i| SlideKey::try_from(i).ok())
                .filter(|key| self.cache.has(*key))
                .collect(),
            None => self.cache.keys(),
        };
        let fast_list = self.props.is_fast_list();

        keys.into_iter()
            .filter_map(|key| {
                let render = self.cache.get(key)?;
                let content = render.resolve(SlideState {
                    is_active: key == active_key,
                    is_from: Some(key) == from_key,
                    key,
                    active_key,
                });
                let wrapped = fast_list
                    || (self.props.should_wrap && Some(key) != self.props.wrap_exception_key);
                Some(RenderedSlide { key, content, wrapped })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Trigger
    // -------------------------------------------------------------------------

    fn run_transition(
        &mut self,
        active_key: SlideKey,
        prev_active_key: Option<SlideKey>,
        has_active_key_changed: bool,
        expected: usize,
    ) {
        let nodes = self.host.slide_nodes();
        if nodes.is_empty() {
            trace!(key = active_key, "no slides mounted yet");
            if has_active_key_changed {
                self.deferred_from = prev_active_key;
            }
            return;
        }

        for &(_, node) in &nodes {
            apply_slide_classes(&mut self.host, node, SlideClass::SLIDE, SlideClass::empty());
            for token in self.props.slide_class_tokens() {
                self.host.add_class(Target::Slide(node), token);
            }
        }

        let Some(prev_key) = prev_active_key.filter(|_| has_active_key_changed) else {
            if !self.is_animating {
                self.apply_static_classes(active_key);
            }
            return;
        };

        if nodes.len() != expected {
            debug!(mounted = nodes.len(), expected, "slide count mismatch, waiting for mount");
            self.deferred_from = Some(prev_key);
            return;
        }

        self.set_phase(TransitionPhase::Preparing);
        self.supersede_running();

        self.watermark += 1;
        let session = self.watermark;
        let name = self.props.name;
        let is_backwards = resolve_is_backwards(self.props.direction, Some(prev_key), active_key);
        let strategy = select_strategy(name, animations_disabled(), self.is_swipe_just_cancelled);
        let to = self.host.node_for(active_key);
        let from = self.host.node_for(prev_key);

        debug!(session, from = prev_key, to = active_key, is_backwards, ?strategy, %name, "transition triggered");

        match strategy {
            AnimationStrategy::Instant => {
                self.is_swipe_just_cancelled = false;
                self.apply_instant(active_key);
            }
            AnimationStrategy::InstantOptimized | AnimationStrategy::Optimized => {
                let Some(to) = to else {
                    trace!(key = active_key, "incoming slide not mounted");
                    self.set_phase(if self.is_animating {
                        TransitionPhase::Animating
                    } else {
                        TransitionPhase::Idle
                    });
                    return;
                };
                let record = SessionRecord {
                    active_key,
                    prev_key,
                    from,
                    to: Some(to),
                    is_backwards: if strategy == AnimationStrategy::Optimized {
                        rtl_adjusted(is_backwards, is_rtl(name))
                    } else {
                        is_backwards
                    },
                    strategy,
                    guard: begin_heavy_animation(),
                    wait: None,
                };
                if strategy == AnimationStrategy::InstantOptimized {
                    record.guard.end();
                    self.apply_instant_optimized(&record);
                } else {
                    self.start_optimized(session, record);
                }
            }
            AnimationStrategy::ClassDriven => {
                let record = SessionRecord {
                    active_key,
                    prev_key,
                    from,
                    to,
                    is_backwards,
                    strategy,
                    guard: begin_heavy_animation(),
                    wait: None,
                };
                self.start_class_driven(session, record);
            }
        }
    }

    /// A new trigger arrived while a session animates: the old one can only
    /// settle as stale from now on, so make sure it still gets a deadline.
    fn supersede_running(&mut self) {
        if !self.is_animating {
            return;
        }
        if let Some(record) = self.sessions.get(&self.watermark) {
            trace!(session = self.watermark, "session superseded");
            if let Some(wait) = record.wait {
                self.scheduler.ensure_deadline(wait, FALLBACK_ANIMATION_END);
            }
        }
        self.swipe.disarm();
    }

    /// Release waits and swipe registrations on slides the host unmounted.
    /// A stale session goes with its slide; the current one completes.
    fn forget_unmounted(&mut self) {
        let mounted: HashSet<NodeId> = self.host.slide_nodes().into_iter().map(|(_, node)| node).collect();

        if self
            .swipe
            .armed_nodes()
            .is_some_and(|(from, to)| !mounted.contains(&from) || !mounted.contains(&to))
        {
            trace!(session = self.watermark, "swipe pair unmounted");
            self.swipe.disarm();
            if let Some(wait) = self.sessions.get(&self.watermark).and_then(|r| r.wait) {
                self.scheduler.ensure_deadline(wait, FALLBACK_ANIMATION_END);
            }
        }

        for wait in self.scheduler.forget_unmounted(|node| mounted.contains(&node)) {
            if wait.session == self.watermark {
                trace!(session = wait.session, node = wait.node.0, "watched slide unmounted");
                self.complete(wait.session);
            } else if let Some(record) = self.sessions.remove(&wait.session) {
                trace!(session = wait.session, node = wait.node.0, "stale session dropped");
                record.guard.end();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Static and instant paths
    // -------------------------------------------------------------------------

    fn apply_static_classes(&mut self, active_key: SlideKey) {
        let optimized = is_transform_driven(self.props.name);
        for (key, node) in self.host.slide_nodes() {
            if key == active_key {
                apply_slide_classes(&mut self.host, node, SlideClass::ACTIVE, SlideClass::INACTIVE);
                if optimized {
                    self.host.set_style(Target::Slide(node), StyleProp::Transition, Some("none"));
                    self.host.set_style(Target::Slide(node), StyleProp::Transform, Some(TRANSFORM_REST));
                }
            } else if !optimized {
                apply_slide_classes(&mut self.host, node, SlideClass::INACTIVE, SlideClass::ACTIVE);
            }
        }
    }

    /// Mark `active_key` active and every other slide inactive, stripping
    /// transitional classes.
    fn apply_final_classes(&mut self, active_key: SlideKey) {
        for (key, node) in self.host.slide_nodes() {
            if key == active_key {
                apply_slide_classes(
                    &mut self.host,
                    node,
                    SlideClass::ACTIVE,
                    SlideClass::TRANSITIONAL | SlideClass::INACTIVE,
                );
            } else {
                apply_slide_classes(
                    &mut self.host,
                    node,
                    SlideClass::INACTIVE,
                    SlideClass::TRANSITIONAL | SlideClass::ACTIVE,
                );
            }
        }
    }

    fn clear_container_direction(&mut self) {
        let name = self.props.name;
        self.host.remove_class(Target::Container, &name.forward_class());
        self.host.remove_class(Target::Container, &name.backwards_class());
    }

    fn set_container_direction(&mut self, is_backwards: bool) {
        let name = self.props.name;
        self.host.toggle_class(Target::Container, &name.forward_class(), !is_backwards);
        self.host.toggle_class(Target::Container, &name.backwards_class(), is_backwards);
    }

    fn apply_instant(&mut self, active_key: SlideKey) {
        self.clear_container_direction();
        self.apply_final_classes(active_key);
        self.finish_instant();
    }

    fn apply_instant_optimized(&mut self, record: &SessionRecord) {
        self.set_container_direction(record.is_backwards);
        if let Some(from) = record.from {
            apply_slide_classes(&mut self.host, from, SlideClass::empty(), SlideClass::ACTIVE);
            self.host.set_style(Target::Slide(from), StyleProp::Transition, Some("none"));
            self.host.set_style(Target::Slide(from), StyleProp::Transform, None);
        }
        if let Some(to) = record.to {
            apply_slide_classes(&mut self.host, to, SlideClass::ACTIVE, SlideClass::empty());
            self.host.set_style(Target::Slide(to), StyleProp::Transition, Some("none"));
            self.host.set_style(Target::Slide(to), StyleProp::Transform, Some(TRANSFORM_REST));
        }
        self.finish_instant();
    }

    /// Close out a transition that never animated.
    fn finish_instant(&mut self) {
        if self.bracket_open {
            self.bracket_open = false;
        } else {
            self.props.fire_start();
        }
        self.props.fire_stop();
        self.set_animating(false);
        self.set_phase(TransitionPhase::Idle);
        self.cleanup();
    }

    // -------------------------------------------------------------------------
    // Animated paths
    // -------------------------------------------------------------------------

    fn open_bracket(&mut self) {
        if !self.bracket_open {
            self.bracket_open = true;
            self.props.fire_start();
        }
    }

    fn close_bracket(&mut self) {
        if self.bracket_open {
            self.bracket_open = false;
            self.props.fire_stop();
        }
    }

    fn start_class_driven(&mut self, session: SessionId, mut record: SessionRecord) {
        for (key, node) in self.host.slide_nodes() {
            let is_from = key == record.prev_key;
            let is_to = key == record.active_key;
            let mut add = SlideClass::empty();
            add.set(SlideClass::FROM, is_from);
            add.set(SlideClass::TO, is_to);
            add.set(SlideClass::INACTIVE, !is_from && !is_to);
            let remove = SlideClass::ACTIVE | (SlideClass::TRANSITIONAL | SlideClass::INACTIVE).difference(add);
            apply_slide_classes(&mut self.host, node, add, remove);
        }

        self.set_animating(true);
        self.set_phase(TransitionPhase::Animating);
        self.open_bracket();
        self.set_container_direction(record.is_backwards);

        let watched = if watches_outgoing(self.props.name, record.is_backwards) {
            record.from
        } else {
            record.to
        };

        let Some(watched) = watched else {
            trace!(session, "no slide to watch, completing now");
            self.sessions.insert(session, record);
            self.complete(session);
            return;
        };

        let swipe_pair = match (record.from, record.to) {
            (Some(from), Some(to)) if self.props.with_swipe_control => Some((from, to)),
            _ => None,
        };
        let fallback = if swipe_pair.is_some() { None } else { Some(FALLBACK_ANIMATION_END) };
        record.wait = Some(self.scheduler.wait_for(watched, WaitKind::AnimationEnd, session, fallback));
        if let Some((from, to)) = swipe_pair {
            self.swipe.allow_swipe_control(from, to, session);
        }
        self.sessions.insert(session, record);
    }

    fn start_optimized(&mut self, session: SessionId, mut record: SessionRecord) {
        let Some(to) = record.to else {
            record.guard.end();
            return;
        };

        self.set_animating(true);
        self.set_phase(TransitionPhase::Animating);
        self.open_bracket();
        self.set_container_direction(record.is_backwards);

        if let Some(from) = record.from {
            self.host.set_style(Target::Slide(from), StyleProp::Transition, Some("none"));
            self.host.set_style(Target::Slide(from), StyleProp::Transform, Some(TRANSFORM_REST));
        }
        let offscreen = transform_offscreen(record.is_backwards);
        self.host.set_style(Target::Slide(to), StyleProp::Transition, Some("none"));
        self.host.set_style(Target::Slide(to), StyleProp::Transform, Some(&offscreen));

        self.scheduler.request_forced_reflow(ReflowTask::SlideIn { session, node: to });
        record.wait = Some(self.scheduler.wait_for(
            to,
            WaitKind::TransitionEnd,
            session,
            Some(FALLBACK_ANIMATION_END),
        ));
        self.sessions.insert(session, record);
    }

    fn slide_in(&mut self, session: SessionId) {
        if session != self.watermark {
            trace!(session, "stale slide-in skipped");
            return;
        }
        let Some(record) = self.sessions.get(&session) else {
            return;
        };
        let (from, to, is_backwards) = (record.from, record.to, record.is_backwards);

        if let Some(from) = from {
            let exit = transform_offscreen(!is_backwards);
            apply_slide_classes(&mut self.host, from, SlideClass::empty(), SlideClass::ACTIVE);
            self.host.set_style(Target::Slide(from), StyleProp::Transition, None);
            self.host.set_style(Target::Slide(from), StyleProp::Transform, Some(&exit));
        }
        if let Some(to) = to {
            apply_slide_classes(&mut self.host, to, SlideClass::ACTIVE, SlideClass::empty());
            self.host.set_style(Target::Slide(to), StyleProp::Transition, None);
            self.host.set_style(Target::Slide(to), StyleProp::Transform, Some(TRANSFORM_REST));
        }
    }

    // -------------------------------------------------------------------------
    // Completion
    // -------------------------------------------------------------------------

    /// Completion signal for `session`. Read phase: measure now, mutate later.
    fn complete(&mut self, session: SessionId) {
        let Some(record) = self.sessions.get(&session) else {
            return;
        };
        let measured_height = if self.props.should_restore_height {
            record.to.and_then(|node| measure_height(&self.host, node))
        } else {
            None
        };
        if session == self.watermark {
            self.set_phase(TransitionPhase::Settling);
        }
        self.scheduler.request_mutation(MutationTask::Settle { session, measured_height });
    }

    fn settle(&mut self, session: SessionId, measured_height: Option<f32>) {
        let Some(record) = self.sessions.remove(&session) else {
            return;
        };

        if session != self.watermark {
            debug!(session, watermark = self.watermark, "stale completion suppressed");
            record.guard.end();
            return;
        }

        if let Some(wait) = record.wait {
            self.scheduler.give_up(wait);
        }
        self.swipe.disarm();

        match record.strategy {
            AnimationStrategy::Optimized => {
                if let Some(from) = record.from {
                    self.host.set_style(Target::Slide(from), StyleProp::Transition, Some("none"));
                    self.host.set_style(Target::Slide(from), StyleProp::Transform, None);
                }
            }
            _ => {
                self.clear_container_direction();
                self.apply_final_classes(record.active_key);
            }
        }

        if let (Some(height), Some(to)) = (measured_height, record.to) {
            pin_container_height(&mut self.host, to, height, false);
        }

        debug!(session, key = record.active_key, "transition settled");
        self.close_bracket();
        record.guard.end();
        self.set_animating(false);
        self.set_phase(TransitionPhase::Idle);
        self.cleanup();
    }

    /// Swipe cancellation: roll back to the outgoing slide without settling.
    fn cancel(&mut self, session: SessionId) {
        let Some(record) = self.sessions.remove(&session) else {
            return;
        };
        if let Some(wait) = record.wait {
            self.scheduler.give_up(wait);
        }
        if session != self.watermark {
            record.guard.end();
            return;
        }

        debug!(session, back_to = record.prev_key, "transition cancelled by swipe");
        self.is_swipe_just_cancelled = true;
        self.clear_container_direction();
        self.apply_final_classes(record.prev_key);
        self.close_bracket();
        record.guard.end();
        self.set_animating(false);
        self.set_phase(TransitionPhase::Idle);
        self.rendered_active_key = Some(record.prev_key);
    }

    fn cleanup(&mut self) {
        if !self.props.should_cleanup {
            return;
        }
        self.cache.evict_all_except(self.props.cleanup_exception_key);
        trace!(remaining = self.cache.len(), "render cache cleaned up");
        self.force_update();
    }

    // -------------------------------------------------------------------------
    // Height effect
    // -------------------------------------------------------------------------

    /// Re-pin the container height after every render, independent of
    /// triggers, so content reflow without a key change is followed.
    fn restore_height_effect(&mut self) {
        if !self.props.should_restore_height {
            return;
        }
        let Some(node) = measure_target(&self.host) else {
            return;
        };
        let Some(height) = measure_height(&self.host, node) else {
            return;
        };
        self.scheduler.request_mutation(MutationTask::PinHeight { node, height });
    }

    // -------------------------------------------------------------------------
    // Driving
    // -------------------------------------------------------------------------

    /// Deliver a host event.
    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::AnimationEnd(node) => {
                for wait in self.scheduler.resolve(node, WaitKind::AnimationEnd) {
                    self.complete(wait.session);
                }
            }
            HostEvent::TransitionEnd(node) => {
                for wait in self.scheduler.resolve(node, WaitKind::TransitionEnd) {
                    self.complete(wait.session);
                }
            }
            HostEvent::ContainerClick => {
                if let Some(cb) = &self.props.on_container_click {
                    cb();
                }
            }
            HostEvent::Swipe(swipe) => match self.swipe.handle(swipe) {
                SwipeOutcome::Cancelled(session) => self.cancel(session),
                SwipeOutcome::Released => {
                    if let Some(wait) = self.sessions.get(&self.watermark).and_then(|r| r.wait) {
                        self.scheduler.ensure_deadline(wait, FALLBACK_ANIMATION_END);
                    }
                }
                SwipeOutcome::None => {}
            },
        }
    }

    /// Move the clock to `now`, forcing completion of waits past their fallback.
    pub fn advance_clock(&mut self, now: Duration) {
        for wait in self.scheduler.advance(now) {
            trace!(session = wait.session, "fallback fired");
            self.complete(wait.session);
        }
    }

    /// Run queued read-phase then mutate-phase work until nothing is queued.
    pub fn flush_frame(&mut self) {
        while !self.scheduler.is_idle() {
            for task in self.scheduler.take_reflows() {
                match task {
                    ReflowTask::SlideIn { session, node } => {
                        self.host.force_reflow(node);
                        self.scheduler.request_mutation(MutationTask::SlideIn { session });
                    }
                }
            }
            for task in self.scheduler.take_mutations() {
                match task {
                    MutationTask::SlideIn { session } => self.slide_in(session),
                    MutationTask::Settle { session, measured_height } => {
                        self.settle(session, measured_height)
                    }
                    MutationTask::PinHeight { node, height } => {
                        pin_container_height(&mut self.host, node, height, true)
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Reactive outputs
    // -------------------------------------------------------------------------

    fn set_phase(&mut self, phase: TransitionPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.phase_signal.set(phase);
        }
    }

    fn set_animating(&mut self, animating: bool) {
        if self.is_animating != animating {
            self.is_animating = animating;
            self.animating_signal.set(animating);
        }
    }
}

impl<H: SlideHost> std::fmt::Debug for Transition<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("props", &self.props)
            .field("rendered_active_key", &self.rendered_active_key)
            .field("watermark", &self.watermark)
            .field("phase", &self.phase)
            .field("is_animating", &self.is_animating)
            .field("is_swipe_just_cancelled", &self.is_swipe_just_cancelled)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
