//! The scroll engine.
//!
//! Owns the gesture phase machine, the per-gesture session, the animators,
//! and the plane router, and turns a stream of [`InputEvent`]s plus a frame
//! clock into committed viewport offsets. Event handlers only stage offsets
//! through the deferred buffer; [`ScrollEngine::on_frame`] is the single
//! place the viewport actually moves.

use std::sync::{Arc, Mutex, Weak};

use drift_animation::{
    AnimationScheduler, Easing, FlingAnimator, Spring, SpringId, TimedScroll,
};
use drift_core::{
    GestureListener, GestureOutcome, InputEvent, RoutingInfo, Size, TouchAction, Vec2,
};
use tracing::{debug, trace};

use crate::bounds::{rubber_resistance, SoftClamp};
use crate::config::{ScrollConfig, ScrollOrientation};
use crate::deferred::DeferredOffset;
use crate::measure::IncrementalMeasurer;
use crate::planes::{Plane, PlaneRole, PlaneSet};
use crate::session::GestureSession;
use crate::snap::SnapProvider;
use crate::state::{PhaseEvent, ScrollPhase};
use crate::velocity::VelocityAccumulator;
use crate::viewport::ViewportState;

/// Who claimed a processed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureConsumer {
    /// The engine scrolled (or shielded the surface below).
    Engine,
    /// A child or plane consumed the event.
    Child,
    /// Nobody wanted it; the caller may offer it elsewhere.
    Unclaimed,
}

/// What one frame tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// A staged or animated offset was committed this frame.
    pub offset_applied: bool,
    /// Animations are still in flight; keep the frame clock running.
    pub animating: bool,
    /// A measurement batch was scheduled this frame.
    pub measurement_scheduled: bool,
}

const CLAMP_EPSILON: f32 = 0.5;
const DOMINANT_AXIS_RATIO: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn dominant_axis(v: Vec2) -> Option<Axis> {
    let (ax, ay) = (v.x.abs(), v.y.abs());
    if ax > ay && ay <= ax * DOMINANT_AXIS_RATIO {
        Some(Axis::Horizontal)
    } else if ay > ax && ax <= ay * DOMINANT_AXIS_RATIO {
        Some(Axis::Vertical)
    } else {
        None
    }
}

pub struct ScrollEngine {
    config: ScrollConfig,
    viewport: ViewportState,
    phase: ScrollPhase,
    session: GestureSession,
    accumulator: VelocityAccumulator,
    deferred: DeferredOffset,
    planes: PlaneSet,

    scheduler: Weak<Mutex<AnimationScheduler>>,
    spring_x: Option<SpringId>,
    spring_y: Option<SpringId>,
    fling_x: FlingAnimator,
    fling_y: FlingAnimator,
    auto_scroll: Option<TimedScroll>,

    snap: Option<Box<dyn SnapProvider>>,
    measurer: Option<IncrementalMeasurer>,

    /// Index of the header child, if any. Once the header consumes a Down,
    /// the whole gesture is locked to it.
    header: Option<usize>,
    /// Drop everything until the next Down arrives.
    gestures_locked: bool,
    /// Latest direction-adjusted velocity from the event stream.
    velocity: Vec2,
    snap_checked: bool,
    repaint_requested: bool,
}

impl ScrollEngine {
    pub fn new(config: ScrollConfig, content: Size, viewport: Size) -> Self {
        let fling = FlingAnimator::new(config.deceleration, config.min_fling_velocity);
        Self {
            config,
            viewport: ViewportState::new(content, viewport),
            phase: ScrollPhase::Idle,
            session: GestureSession::default(),
            accumulator: VelocityAccumulator::default(),
            deferred: DeferredOffset::default(),
            planes: PlaneSet::default(),
            scheduler: Weak::new(),
            spring_x: None,
            spring_y: None,
            fling_x: fling,
            fling_y: fling,
            auto_scroll: None,
            snap: None,
            measurer: None,
            header: None,
            gestures_locked: false,
            velocity: Vec2::ZERO,
            snap_checked: false,
            repaint_requested: false,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Swap in a new configuration. Rebuilding the fling animators halts
    /// any fling mid-flight; springs and timed scrolls keep their old
    /// tuning until they finish.
    pub fn set_config(&mut self, config: ScrollConfig) {
        self.fling_x = FlingAnimator::new(config.deceleration, config.min_fling_velocity);
        self.fling_y = self.fling_x;
        self.config = config;
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn offset(&self) -> Vec2 {
        self.viewport.offset()
    }

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }

    pub fn overscroll(&self) -> Vec2 {
        self.viewport.overscroll()
    }

    pub fn is_overscrolled(&self) -> bool {
        self.viewport.is_overscrolled()
    }

    /// A finger is currently on the surface. Hosts use this to keep
    /// scrollbars visible through a touch.
    pub fn is_in_contact(&self) -> bool {
        self.session.in_contact
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn set_content_size(&mut self, content: Size) {
        self.viewport.set_content_size(content);
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport.set_viewport_size(viewport);
    }

    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<AnimationScheduler>>) {
        self.scheduler = Arc::downgrade(scheduler);
    }

    pub fn set_snap_provider(&mut self, snap: Option<Box<dyn SnapProvider>>) {
        self.snap = snap;
    }

    pub fn set_measurer(&mut self, measurer: Option<IncrementalMeasurer>) {
        self.measurer = measurer;
    }

    /// Mark the child at `index` as the header region.
    pub fn set_header(&mut self, index: Option<usize>) {
        self.header = index;
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.planes.set_plane(plane);
    }

    pub fn clear_plane(&mut self, role: PlaneRole) {
        self.planes.clear_plane(role);
    }

    pub fn planes_mut(&mut self) -> &mut PlaneSet {
        &mut self.planes
    }

    /// Drop all input until the next Down. Used after a modal child takes
    /// over mid-gesture.
    pub fn lock_gestures_until_down(&mut self) {
        self.gestures_locked = true;
    }

    /// The host paints when this drains true.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Route one input event. `children` are the engine's scrollable
    /// children in z-order (topmost first); when planes are installed they
    /// replace the children for routing purposes.
    pub fn process_gestures(
        &mut self,
        event: &InputEvent,
        routing: &RoutingInfo,
        children: &mut [&mut dyn GestureListener],
    ) -> GestureConsumer {
        let consumed_default = if self.config.block_gestures_below {
            GestureConsumer::Engine
        } else {
            GestureConsumer::Unclaimed
        };

        if self.gestures_locked {
            if event.action != TouchAction::Down {
                return consumed_default;
            }
            self.gestures_locked = false;
        }

        match event.action {
            TouchAction::Down => {
                self.session.had_down = true;
                self.session.in_contact = true;
                self.session.header_locked = false;
                self.stop_scrolling();
                self.reset_session();
                self.phase.apply(PhaseEvent::ContactDown);
            }
            TouchAction::Up => {
                self.session.in_contact = false;
            }
            _ => {}
        }

        let direction = if self.config.reverse_gestures { -1.0 } else { 1.0 };

        if event.action == TouchAction::Panning {
            let mut v = event.velocity * (direction / self.config.pixel_scale);
            if !self.config.orientation.allows_horizontal() {
                v.x = 0.0;
            }
            if !self.config.orientation.allows_vertical() {
                v.y = 0.0;
            }
            self.velocity = v;
        }

        let wrong_direction = self.is_wrong_direction(event);
        let had_touches = self.session.last_touches;
        self.session.last_touches = event.touches;
        let user_panning = self.phase == ScrollPhase::Panning;

        let mut consumed = GestureConsumer::Unclaimed;
        let mut passed_to_children = false;

        // Children see the gesture first until the engine is actively
        // panning; Ups always reach them so nested gestures can finish.
        if !user_panning || self.config.scroll_locked || event.action == TouchAction::Up {
            passed_to_children = true;
            if self.pass_to_children(event, routing, children).is_consumed() {
                match event.action {
                    TouchAction::Panning => self.session.child_was_panning = true,
                    TouchAction::Tapped if self.session.had_down => {
                        self.session.child_was_tapped = true
                    }
                    _ => {}
                }
                if event.action != TouchAction::Up {
                    return GestureConsumer::Child;
                }
                consumed = GestureConsumer::Child;
            }
        }

        if event.touches >= 2 || had_touches >= 2 || event.manipulation.is_some() {
            // Pinch territory: the pan machine stands down.
            if user_panning {
                self.reset_session();
                self.phase.apply(PhaseEvent::ContactDown);
            }
            if !self.config.zoom_locked {
                if let Some(manipulation) = event.manipulation {
                    self.apply_zoom_delta(manipulation.scale);
                    consumed = GestureConsumer::Engine;
                }
            }
        } else {
            match event.action {
                TouchAction::Panning if !self.config.scroll_locked => {
                    if let Some(outcome) =
                        self.handle_pan(event, direction, wrong_direction, user_panning)
                    {
                        consumed = outcome;
                    } else {
                        return consumed_default;
                    }
                }
                TouchAction::Up => {
                    if self.handle_up(routing, user_panning) {
                        consumed = GestureConsumer::Engine;
                    }
                    self.session.header_locked = false;
                }
                TouchAction::Wheel => {
                    if let Some(outcome) = self.handle_wheel(event) {
                        consumed = outcome;
                    }
                }
                _ => {}
            }
        }

        match consumed {
            GestureConsumer::Unclaimed => {
                if !passed_to_children
                    && self.pass_to_children(event, routing, children).is_consumed()
                {
                    return GestureConsumer::Child;
                }
                consumed_default
            }
            other => other,
        }
    }

    /// One pan event. `None` means "refuse to consume": the engine is
    /// pinned at a hard edge and an outer scroller should take over.
    fn handle_pan(
        &mut self,
        event: &InputEvent,
        direction: f32,
        wrong_direction: bool,
        user_panning: bool,
    ) -> Option<GestureConsumer> {
        // A child owns this gesture.
        if self.session.child_was_tapped || self.session.child_was_panning {
            return Some(GestureConsumer::Unclaimed);
        }
        if self.session.wrong_direction {
            return Some(GestureConsumer::Unclaimed);
        }
        if self.session.header_locked && !self.config.can_scroll_using_header {
            return Some(GestureConsumer::Unclaimed);
        }

        if !user_panning {
            if self.config.ignore_wrong_direction && wrong_direction {
                // Lock the decision for the rest of the gesture.
                self.session.wrong_direction = true;
                self.session.focused = false;
                trace!("pan rejected: wrong direction for orientation");
                return Some(GestureConsumer::Unclaimed);
            }
            if !self.pan_engages() {
                return Some(GestureConsumer::Unclaimed);
            }
        }

        // Re-anchor if the engine lost the gesture mid-flight (a child let
        // go, focus returned).
        if !self.session.focused {
            self.reset_session();
        }

        self.phase.apply(PhaseEvent::PanMoved);
        self.accumulator.capture(self.velocity);

        let mut moved =
            event.delta * (self.config.pan_distance_scale * direction / self.config.pixel_scale);
        if !self.config.orientation.allows_horizontal() {
            moved.x = 0.0;
        }
        if !self.config.orientation.allows_vertical() {
            moved.y = 0.0;
        }

        // Exponential smoothing across events of this gesture.
        let alpha = self.config.pan_smoothing;
        let smoothed = self.session.last_delta + (moved - self.session.last_delta) * alpha;
        self.session.last_delta = smoothed;

        let bounds = self.viewport.bounds();
        let max_over = self.viewport.max_overscroll(self.config.max_overscroll_ratio);
        let previous = self.session.pan_offset;

        let mut step = smoothed;
        if self.config.bounces {
            // Progressive resistance while stretching further past an edge.
            let over = bounds.overscroll(previous);
            if over.x != 0.0 && step.x * over.x > 0.0 {
                step.x *= rubber_resistance(over.x.abs(), max_over.x);
            }
            if over.y != 0.0 && step.y * over.y > 0.0 {
                step.y *= rubber_resistance(over.y.abs(), max_over.y);
            }
        }

        let candidate = previous + step;
        let clamp = if self.config.bounces {
            bounds.clamp_soft(candidate, max_over)
        } else {
            SoftClamp {
                offset: bounds.clamp_hard(candidate),
                overscroll: Vec2::ZERO,
            }
        };
        self.session.pan_offset = clamp.offset;

        if !self.config.bounces && self.pinned_at_edge(previous, candidate, clamp.offset) {
            // Hard edge, pushing outward: stage nothing more and let the
            // event escape to an enclosing scroller.
            return None;
        }

        self.deferred.stage(clamp.offset, self.velocity);
        self.repaint_requested = true;
        Some(GestureConsumer::Engine)
    }

    /// Release handling. True when the engine claimed the Up by launching
    /// or settling its own motion.
    fn handle_up(&mut self, routing: &RoutingInfo, user_panning: bool) -> bool {
        self.session.focused = false;

        let overscrolled = self.viewport.bounds().overscroll(self.session.pan_offset);
        let child_owns = (self.session.child_was_tapped && overscrolled == Vec2::ZERO)
            || (self.session.child_was_panning && !user_panning);
        if child_owns {
            return false;
        }
        if self.config.scroll_locked {
            return false;
        }
        if self.session.header_locked && !self.config.can_scroll_using_header {
            return false;
        }
        if routing.already_consumed {
            self.settle();
            return false;
        }

        let final_velocity =
            self.accumulator.final_velocity(self.config.max_velocity) * self.config.velocity_scale;
        self.accumulator.clear();

        if !user_panning
            && self.config.ignore_wrong_direction
            && self.config.orientation != ScrollOrientation::Both
        {
            let mismatched = match dominant_axis(final_velocity) {
                Some(Axis::Horizontal) => self.config.orientation == ScrollOrientation::Vertical,
                Some(Axis::Vertical) => self.config.orientation == ScrollOrientation::Horizontal,
                None => false,
            };
            if mismatched {
                self.settle();
                return false;
            }
        }

        let mut launched = false;
        if overscrolled != Vec2::ZERO {
            launched = self.start_bounce(overscrolled, final_velocity);
        } else if self.release_is_swipe(final_velocity) {
            launched = self.start_fling(final_velocity);
        }

        if launched {
            self.repaint_requested = true;
            true
        } else {
            self.settle();
            user_panning
        }
    }

    fn handle_wheel(&mut self, event: &InputEvent) -> Option<GestureConsumer> {
        let wheel = event.wheel?;

        if let Some(scale) = wheel.scale {
            if self.config.zoom_locked {
                return None;
            }
            self.apply_zoom_delta(scale);
            return Some(GestureConsumer::Engine);
        }

        if self.config.scroll_locked {
            return None;
        }

        // Notches arriving mid-animation retarget from the current target
        // so rapid wheeling accumulates instead of restarting.
        let base = self
            .auto_scroll
            .as_ref()
            .map(|a| a.target())
            .unwrap_or_else(|| self.viewport.offset());
        let travel = wheel.delta * self.config.wheel_line_size;
        let mut target = base;
        match self.config.orientation {
            ScrollOrientation::Horizontal => target.x += travel,
            _ => target.y += travel,
        }
        let target = self.viewport.bounds().clamp_hard(target);

        self.auto_scroll = Some(TimedScroll::new(
            self.viewport.offset(),
            target,
            self.config.wheel_scroll_ms,
            Easing::EaseOutCubic,
        ));
        self.repaint_requested = true;
        Some(GestureConsumer::Engine)
    }

    /// Advance animators and commit at most one offset. Call once per
    /// rendered frame with the elapsed seconds.
    pub fn on_frame(&mut self, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();

        if let Some((offset, _velocity)) = self.deferred.take() {
            self.viewport.set_offset(offset);
            report.offset_applied = true;
        }

        if self.phase == ScrollPhase::Flinging {
            report.offset_applied |= self.tick_flings(dt);
        }
        if self.spring_x.is_some() || self.spring_y.is_some() {
            report.offset_applied |= self.read_springs();
        }
        if let Some(mut anim) = self.auto_scroll.take() {
            if let Some(offset) = anim.tick(dt) {
                self.viewport.set_offset(offset);
                report.offset_applied = true;
                if anim.is_running() {
                    self.auto_scroll = Some(anim);
                }
            }
        }

        if self.phase == ScrollPhase::Settled {
            self.finish_settle();
        }

        if let Some(measurer) = &self.measurer {
            let offset = self.viewport.offset();
            let viewport = self.viewport.viewport_size();
            let leading_edge = match self.config.orientation {
                ScrollOrientation::Horizontal => -offset.x + viewport.width,
                _ => -offset.y + viewport.height,
            };
            report.measurement_scheduled = measurer.check_trigger(leading_edge);
        }

        report.animating = self.phase.is_animating()
            || self.auto_scroll.is_some()
            || self.spring_x.is_some()
            || self.spring_y.is_some()
            || self.deferred.is_pending();
        if report.offset_applied {
            self.repaint_requested = true;
        }
        report
    }

    /// Animate (or jump) to `target`, clamped into bounds.
    pub fn scroll_to(&mut self, target: Vec2, animated: bool) {
        let target = self.viewport.bounds().clamp_hard(target);
        self.stop_motion();
        self.repaint_requested = true;

        if !animated {
            self.viewport.set_offset(target);
            return;
        }

        let Some(scheduler) = self.scheduler.upgrade() else {
            self.viewport.set_offset(target);
            return;
        };
        let Ok(mut scheduler) = scheduler.lock() else {
            self.viewport.set_offset(target);
            return;
        };

        let offset = self.viewport.offset();
        if (target.x - offset.x).abs() > CLAMP_EPSILON {
            let mut spring = Spring::new(self.config.scroll_to_spring, offset.x);
            spring.set_target(target.x);
            self.spring_x = Some(scheduler.add_spring(spring));
        }
        if (target.y - offset.y).abs() > CLAMP_EPSILON {
            let mut spring = Spring::new(self.config.scroll_to_spring, offset.y);
            spring.set_target(target.y);
            self.spring_y = Some(scheduler.add_spring(spring));
        }
        if self.spring_x.is_none() && self.spring_y.is_none() {
            self.viewport.set_offset(target);
        }
    }

    /// Jump to `target` with no animation.
    pub fn scroll_to_now(&mut self, target: Vec2) {
        self.scroll_to(target, false);
    }

    /// Halt all motion where it stands.
    pub fn stop_scrolling(&mut self) {
        self.stop_motion();
        self.deferred.clear();
        self.snap_checked = false;
    }

    fn stop_motion(&mut self) {
        self.fling_x.stop();
        self.fling_y.stop();
        self.auto_scroll = None;
        if let Some(scheduler) = self.scheduler.upgrade() {
            if let Ok(mut scheduler) = scheduler.lock() {
                if let Some(id) = self.spring_x.take() {
                    scheduler.remove_spring(id);
                }
                if let Some(id) = self.spring_y.take() {
                    scheduler.remove_spring(id);
                }
            }
        }
        self.spring_x = None;
        self.spring_y = None;
    }

    fn reset_session(&mut self) {
        self.session.reset(self.viewport.offset());
        self.accumulator.clear();
        self.velocity = Vec2::ZERO;
        self.snap_checked = false;
    }

    fn settle(&mut self) {
        self.phase.apply(PhaseEvent::Released);
        self.repaint_requested = true;
    }

    fn pan_engages(&self) -> bool {
        let threshold = self.config.pan_velocity_threshold;
        match self.config.orientation {
            ScrollOrientation::Vertical => self.velocity.y.abs() >= threshold,
            ScrollOrientation::Horizontal => self.velocity.x.abs() >= threshold,
            ScrollOrientation::Both => {
                self.velocity.x.abs() >= threshold || self.velocity.y.abs() >= threshold
            }
        }
    }

    fn release_is_swipe(&self, final_velocity: Vec2) -> bool {
        let threshold = self.config.swipe_threshold * self.config.pixel_scale;
        match self.config.orientation {
            ScrollOrientation::Vertical => final_velocity.y.abs() >= threshold,
            ScrollOrientation::Horizontal => final_velocity.x.abs() >= threshold,
            ScrollOrientation::Both => {
                final_velocity.x.abs() >= threshold || final_velocity.y.abs() >= threshold
            }
        }
    }

    /// Per-event direction test: the larger delta axis decides, no
    /// dead-band. Near-diagonal drags on the off axis still count as wrong.
    fn is_wrong_direction(&self, event: &InputEvent) -> bool {
        if event.action != TouchAction::Panning {
            return false;
        }
        let (dx, dy) = (event.delta.x.abs(), event.delta.y.abs());
        match self.config.orientation {
            ScrollOrientation::Vertical => dx > dy,
            ScrollOrientation::Horizontal => dy > dx,
            ScrollOrientation::Both => false,
        }
    }

    /// At a hard edge and the candidate pushes outward on the active axis.
    fn pinned_at_edge(&self, previous: Vec2, candidate: Vec2, clamped: Vec2) -> bool {
        let pinned_x = (clamped.x - previous.x).abs() <= CLAMP_EPSILON
            && (candidate.x - clamped.x).abs() > CLAMP_EPSILON;
        let pinned_y = (clamped.y - previous.y).abs() <= CLAMP_EPSILON
            && (candidate.y - clamped.y).abs() > CLAMP_EPSILON;
        match self.config.orientation {
            ScrollOrientation::Horizontal => pinned_x,
            ScrollOrientation::Vertical => pinned_y,
            ScrollOrientation::Both => pinned_x && pinned_y,
        }
    }

    /// Spring the overscrolled axes home, inheriting release velocity
    /// (clamped to the bounce ceiling).
    fn start_bounce(&mut self, overscroll: Vec2, velocity: Vec2) -> bool {
        let Some(scheduler) = self.scheduler.upgrade() else {
            // No scheduler to drive springs: snap home instead.
            let home = self.viewport.bounds().clamp_hard(self.session.pan_offset);
            self.deferred.stage(home, Vec2::ZERO);
            return false;
        };
        let Ok(mut scheduler) = scheduler.lock() else {
            return false;
        };

        let cap = self.config.max_bounce_velocity;
        let offset = self.session.pan_offset;
        let home = self.viewport.bounds().clamp_hard(offset);
        let mut started = false;

        if overscroll.x != 0.0 {
            let v = velocity.x.clamp(-cap, cap);
            let mut spring = Spring::with_velocity(self.config.bounce_spring, offset.x, v);
            spring.set_target(home.x);
            self.spring_x = Some(scheduler.add_spring(spring));
            started = true;
        }
        if overscroll.y != 0.0 {
            let v = velocity.y.clamp(-cap, cap);
            let mut spring = Spring::with_velocity(self.config.bounce_spring, offset.y, v);
            spring.set_target(home.y);
            self.spring_y = Some(scheduler.add_spring(spring));
            started = true;
        }

        if started {
            debug!(?overscroll, "bounce-back started");
            self.phase.apply(PhaseEvent::BounceStarted);
        }
        started
    }

    fn start_fling(&mut self, velocity: Vec2) -> bool {
        // Start from the staged pan offset, not the committed one: a pan
        // staged between frames would otherwise be dropped at release.
        let offset = self.session.pan_offset;
        let mut started = false;
        if self.config.orientation.allows_horizontal() {
            started |= self.fling_x.start_from(offset.x, velocity.x);
        }
        if self.config.orientation.allows_vertical() {
            started |= self.fling_y.start_from(offset.y, velocity.y);
        }
        if started {
            debug!(vx = velocity.x, vy = velocity.y, "fling started");
            self.phase.apply(PhaseEvent::FlingStarted);
        }
        started
    }

    /// Advance the flings; crossing a bound hands the axis to a bounce
    /// spring (or stops dead when bounces are off).
    fn tick_flings(&mut self, dt: f32) -> bool {
        let bounds = self.viewport.bounds();
        let mut offset = self.viewport.offset();
        let mut moved = false;
        let mut bounced = false;

        if self.fling_x.is_running() {
            if let Some(x) = self.fling_x.tick(dt) {
                let clamped = x.clamp(bounds.left, bounds.right);
                offset.x = clamped;
                moved = true;
                if (clamped - x).abs() > f32::EPSILON {
                    let v = self.fling_x.velocity();
                    self.fling_x.stop();
                    bounced |= self.start_edge_bounce_x(clamped, v);
                }
            } else {
                moved = true;
            }
        }
        if self.fling_y.is_running() {
            if let Some(y) = self.fling_y.tick(dt) {
                let clamped = y.clamp(bounds.top, bounds.bottom);
                offset.y = clamped;
                moved = true;
                if (clamped - y).abs() > f32::EPSILON {
                    let v = self.fling_y.velocity();
                    self.fling_y.stop();
                    bounced |= self.start_edge_bounce_y(clamped, v);
                }
            } else {
                moved = true;
            }
        }

        if moved {
            self.viewport.set_offset(offset);
        }

        if !self.fling_x.is_running() && !self.fling_y.is_running() && !bounced {
            self.phase.apply(PhaseEvent::MotionEnded);
        }
        moved
    }

    fn start_edge_bounce_x(&mut self, edge: f32, velocity: f32) -> bool {
        if !self.config.bounces {
            return false;
        }
        let Some(scheduler) = self.scheduler.upgrade() else {
            return false;
        };
        let Ok(mut scheduler) = scheduler.lock() else {
            return false;
        };
        let cap = self.config.max_bounce_velocity;
        let mut spring =
            Spring::with_velocity(self.config.bounce_spring, edge, velocity.clamp(-cap, cap));
        spring.set_target(edge);
        self.spring_x = Some(scheduler.add_spring(spring));
        self.phase.apply(PhaseEvent::BounceStarted);
        true
    }

    fn start_edge_bounce_y(&mut self, edge: f32, velocity: f32) -> bool {
        if !self.config.bounces {
            return false;
        }
        let Some(scheduler) = self.scheduler.upgrade() else {
            return false;
        };
        let Ok(mut scheduler) = scheduler.lock() else {
            return false;
        };
        let cap = self.config.max_bounce_velocity;
        let mut spring =
            Spring::with_velocity(self.config.bounce_spring, edge, velocity.clamp(-cap, cap));
        spring.set_target(edge);
        self.spring_y = Some(scheduler.add_spring(spring));
        self.phase.apply(PhaseEvent::BounceStarted);
        true
    }

    /// Read spring values back into the offset; clean up settled springs.
    fn read_springs(&mut self) -> bool {
        let Some(scheduler) = self.scheduler.upgrade() else {
            self.spring_x = None;
            self.spring_y = None;
            return false;
        };
        let Ok(mut scheduler) = scheduler.lock() else {
            return false;
        };

        let mut offset = self.viewport.offset();
        let mut moved = false;

        if let Some(id) = self.spring_x {
            if let Some(spring) = scheduler.get_spring(id) {
                offset.x = spring.value();
                moved = true;
                if spring.is_settled() {
                    scheduler.remove_spring(id);
                    self.spring_x = None;
                }
            } else {
                self.spring_x = None;
            }
        }
        if let Some(id) = self.spring_y {
            if let Some(spring) = scheduler.get_spring(id) {
                offset.y = spring.value();
                moved = true;
                if spring.is_settled() {
                    scheduler.remove_spring(id);
                    self.spring_y = None;
                }
            } else {
                self.spring_y = None;
            }
        }

        if moved {
            self.viewport.set_offset(offset);
        }
        if self.spring_x.is_none() && self.spring_y.is_none() && self.phase.is_animating() {
            self.phase.apply(PhaseEvent::MotionEnded);
        }
        moved
    }

    fn finish_settle(&mut self) {
        // Still adjusting (snap animation, late springs): wait.
        if self.auto_scroll.is_some() || self.spring_x.is_some() || self.spring_y.is_some() {
            return;
        }
        if self.viewport.is_overscrolled() {
            let home = self.viewport.bounds().clamp_hard(self.viewport.offset());
            self.viewport.set_offset(home);
            self.repaint_requested = true;
        }
        if !self.snap_checked {
            self.snap_checked = true;
            let offset = self.viewport.offset();
            let snap_target = self
                .snap
                .as_ref()
                .and_then(|snap| snap.nearest_snap_offset(offset));
            if let Some(target) = snap_target {
                trace!(?target, "settling onto snap point");
                self.scroll_to(target, true);
                return;
            }
        }
        self.snap_checked = false;
        self.phase.apply(PhaseEvent::Rested);
    }

    fn apply_zoom_delta(&mut self, scale_delta: f32) {
        let zoom = self.viewport.zoom() + scale_delta;
        self.viewport
            .set_zoom(zoom, self.config.min_zoom, self.config.max_zoom);
        self.repaint_requested = true;
    }

    fn pass_to_children(
        &mut self,
        event: &InputEvent,
        routing: &RoutingInfo,
        children: &mut [&mut dyn GestureListener],
    ) -> GestureOutcome {
        if self.planes.is_active() {
            return self.planes.route(event, routing);
        }
        for (index, child) in children.iter_mut().enumerate() {
            if self.session.header_locked && self.header != Some(index) {
                continue;
            }
            if !child.is_gesture_for(event, event.location) {
                continue;
            }
            if child.process_gestures(event, routing).is_consumed() {
                if self.header == Some(index) && event.action == TouchAction::Down {
                    trace!("header claimed the gesture, locking routing to it");
                    self.session.header_locked = true;
                }
                return GestureOutcome::Consumed;
            }
        }
        GestureOutcome::Pass
    }
}
