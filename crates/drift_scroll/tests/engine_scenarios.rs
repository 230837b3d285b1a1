//! End-to-end gesture scenarios driving the engine through full
//! touch-down / pan / release cycles, including virtualized measurement
//! and plane routing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use drift_animation::AnimationScheduler;
use drift_core::{
    GestureListener, GestureOutcome, InputEvent, Point, Rect, RoutingInfo, TouchAction, Vec2,
};
use drift_scroll::{
    GestureConsumer, IncrementalMeasurer, MeasureConfig, Plane, PlaneRole, RowGridSnap,
    ScrollConfig, ScrollEngine, ScrollPhase, VirtualizedContent,
};

const DT: f32 = 1.0 / 60.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine(config: ScrollConfig) -> ScrollEngine {
    init_tracing();
    // 1000pt of content behind a 600pt viewport: offset range [-400, 0].
    ScrollEngine::new(
        config,
        drift_core::Size::new(600.0, 1000.0),
        drift_core::Size::new(600.0, 600.0),
    )
}

fn no_children() -> [&'static mut dyn GestureListener; 0] {
    []
}

fn send(engine: &mut ScrollEngine, event: InputEvent) -> GestureConsumer {
    engine.process_gestures(&event, &RoutingInfo::default(), &mut no_children())
}

fn drag_frames(engine: &mut ScrollEngine, delta: Vec2, velocity: Vec2, frames: usize) {
    for _ in 0..frames {
        send(
            engine,
            InputEvent::panning(Point::new(300.0, 300.0), delta, velocity),
        );
        engine.on_frame(DT);
    }
}

fn run_to_idle(engine: &mut ScrollEngine, scheduler: Option<&Arc<Mutex<AnimationScheduler>>>) {
    for _ in 0..2000 {
        if let Some(scheduler) = scheduler {
            scheduler.lock().unwrap().tick(DT);
        }
        let report = engine.on_frame(DT);
        if !report.animating && engine.phase() == ScrollPhase::Idle {
            return;
        }
    }
    panic!("engine never returned to idle, stuck in {:?}", engine.phase());
}

/// Hard-edged list: a pan trying to go past the end commits exactly the
/// boundary offset, never beyond.
#[test]
fn pan_past_the_end_commits_the_boundary_offset() {
    let mut engine = engine(ScrollConfig::default().with_bounces(false));
    send(&mut engine, InputEvent::down(Point::new(300.0, 300.0)));
    // Plenty of travel to overshoot -400 many times over.
    drag_frames(&mut engine, Vec2::new(0.0, -80.0), Vec2::new(0.0, -900.0), 60);
    assert_eq!(engine.offset().y, -400.0);
    assert_eq!(engine.offset().x, 0.0);
    assert!(!engine.is_overscrolled());
}

/// Release velocity is a recency-weighted blend clamped to the configured
/// ceiling before it reaches the fling.
#[test]
fn release_velocity_is_capped_at_the_ceiling() {
    let config = ScrollConfig {
        max_velocity: 400.0,
        ..ScrollConfig::default()
    };
    let mut engine = engine(config);
    send(&mut engine, InputEvent::down(Point::new(300.0, 300.0)));
    for vy in [-500.0, -520.0, -480.0] {
        send(
            &mut engine,
            InputEvent::panning(Point::new(300.0, 300.0), Vec2::new(0.0, -10.0), Vec2::new(0.0, vy)),
        );
        engine.on_frame(DT);
    }
    let released_at = engine.offset().y;
    assert_eq!(
        send(&mut engine, InputEvent::up(Point::new(300.0, 300.0))),
        GestureConsumer::Engine
    );
    assert_eq!(engine.phase(), ScrollPhase::Flinging);
    run_to_idle(&mut engine, None);

    // v=400 at 1500pt/s^2 deceleration travels about v^2/2a ~ 53pt. An
    // uncapped 500 would travel ~83pt.
    let travel = (engine.offset().y - released_at).abs();
    assert!(travel < 60.0, "fling traveled {travel}, ceiling not applied");
    assert!(travel > 40.0, "fling traveled {travel}, too short for a 400 release");
}

/// A full storm of gestures, flings, and bounces never leaves the offset
/// resting outside the scrollable bounds.
#[test]
fn offset_always_rests_inside_bounds() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut engine = engine(ScrollConfig::default());
    engine.set_scheduler(&scheduler);

    let gestures: [(f32, f32); 4] = [(-80.0, -2500.0), (60.0, 2000.0), (-30.0, -100.0), (90.0, 2800.0)];
    for (dy, vy) in gestures {
        send(&mut engine, InputEvent::down(Point::new(300.0, 300.0)));
        drag_frames(&mut engine, Vec2::new(0.0, dy), Vec2::new(0.0, vy), 12);
        send(&mut engine, InputEvent::up(Point::new(300.0, 300.0)));
        run_to_idle(&mut engine, Some(&scheduler));

        let y = engine.offset().y;
        assert!((-400.0..=0.0).contains(&y), "rested at {y}, outside bounds");
        assert!(!engine.is_overscrolled());
    }
}

/// Motion settles onto the nearest snap offset when a provider is
/// installed.
#[test]
fn settle_consults_the_snap_provider() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut engine = engine(ScrollConfig::default());
    engine.set_scheduler(&scheduler);
    engine.set_snap_provider(Some(Box::new(RowGridSnap { row_height: 100.0 })));

    send(&mut engine, InputEvent::down(Point::new(300.0, 300.0)));
    drag_frames(&mut engine, Vec2::new(0.0, -30.0), Vec2::new(0.0, -100.0), 5);
    send(&mut engine, InputEvent::up(Point::new(300.0, 300.0)));
    run_to_idle(&mut engine, Some(&scheduler));

    let y = engine.offset().y;
    assert!(
        (y / 100.0).fract().abs() < 0.02,
        "rested at {y}, not on the row grid"
    );
}

mod planes {
    use super::*;

    struct RecordingPlane {
        log: Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
        consume: bool,
    }

    impl GestureListener for RecordingPlane {
        fn hit_bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 600.0, 600.0)
        }

        fn process_gestures(&mut self, _: &InputEvent, _: &RoutingInfo) -> GestureOutcome {
            self.log.lock().unwrap().push(self.name);
            if self.consume {
                GestureOutcome::Consumed
            } else {
                GestureOutcome::Pass
            }
        }
    }

    fn recording_plane(
        role: PlaneRole,
        name: &'static str,
        consume: bool,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Plane {
        Plane::new(
            role,
            Rect::new(0.0, 0.0, 600.0, 600.0),
            Box::new(RecordingPlane {
                log: log.clone(),
                name,
                consume,
            }),
        )
    }

    /// Taps route through the plane stack topmost-first; the first
    /// consumer ends the walk.
    #[test]
    fn tap_routes_planes_in_z_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut engine = engine(ScrollConfig::default());
        engine.set_plane(recording_plane(PlaneRole::Backward, "backward", true, &log));
        engine.set_plane(recording_plane(PlaneRole::Current, "current", false, &log));
        engine.set_plane(recording_plane(PlaneRole::Forward, "forward", false, &log));

        send(&mut engine, InputEvent::down(Point::new(300.0, 300.0)));
        log.lock().unwrap().clear();

        let outcome = send(&mut engine, InputEvent::tapped(Point::new(300.0, 300.0)));
        assert_eq!(outcome, GestureConsumer::Child);
        assert_eq!(*log.lock().unwrap(), vec!["forward", "current", "backward"]);
    }

    /// A plane whose content is still being prepared is skipped without
    /// stalling the route.
    #[test]
    fn unready_forward_plane_yields_to_current() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut engine = engine(ScrollConfig::default());
        engine.set_plane(recording_plane(PlaneRole::Forward, "forward", true, &log));
        engine.set_plane(recording_plane(PlaneRole::Current, "current", true, &log));
        engine.planes_mut().set_ready(PlaneRole::Forward, false);

        send(&mut engine, InputEvent::down(Point::new(300.0, 300.0)));
        log.lock().unwrap().clear();

        let outcome = send(&mut engine, InputEvent::tapped(Point::new(300.0, 300.0)));
        assert_eq!(outcome, GestureConsumer::Child);
        assert_eq!(*log.lock().unwrap(), vec!["current"]);
    }
}

mod children {
    use super::*;

    struct TapChild {
        bounds: Rect,
        taps: Arc<AtomicUsize>,
    }

    impl GestureListener for TapChild {
        fn hit_bounds(&self) -> Rect {
            self.bounds
        }

        fn process_gestures(&mut self, event: &InputEvent, _: &RoutingInfo) -> GestureOutcome {
            if event.action == TouchAction::Tapped {
                self.taps.fetch_add(1, Ordering::SeqCst);
                return GestureOutcome::Consumed;
            }
            GestureOutcome::Pass
        }
    }

    /// A tap inside a child's bounds goes to the child; outside, it falls
    /// back to the engine's default.
    #[test]
    fn tap_hits_child_only_inside_its_bounds() {
        let taps = Arc::new(AtomicUsize::new(0));
        let mut child = TapChild {
            bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
            taps: taps.clone(),
        };
        let mut engine = engine(ScrollConfig::default());

        let inside = InputEvent::tapped(Point::new(100.0, 100.0));
        let children: &mut [&mut dyn GestureListener] = &mut [&mut child];
        let outcome = engine.process_gestures(&inside, &RoutingInfo::default(), children);
        assert_eq!(outcome, GestureConsumer::Child);
        assert_eq!(taps.load(Ordering::SeqCst), 1);

        let outside = InputEvent::tapped(Point::new(400.0, 400.0));
        let children: &mut [&mut dyn GestureListener] = &mut [&mut child];
        let outcome = engine.process_gestures(&outside, &RoutingInfo::default(), children);
        assert_eq!(outcome, GestureConsumer::Unclaimed);
        assert_eq!(taps.load(Ordering::SeqCst), 1);
    }
}

mod measurement {
    use super::*;
    use std::time::Duration;

    struct Rows {
        row_height: f32,
        total: usize,
        measured: AtomicUsize,
        batches: AtomicUsize,
    }

    impl VirtualizedContent for Rows {
        fn measured_content_end(&self) -> f32 {
            self.measured.load(Ordering::SeqCst) as f32 * self.row_height
        }

        fn last_measured_index(&self) -> usize {
            self.measured.load(Ordering::SeqCst).saturating_sub(1)
        }

        fn item_count(&self) -> usize {
            self.total
        }

        fn measure_additional_items(&self, batch: usize, ahead: usize, _scale: f32) -> usize {
            self.batches.fetch_add(1, Ordering::SeqCst);
            let before = self.measured.load(Ordering::SeqCst);
            let after = (before + batch + ahead).min(self.total);
            self.measured.store(after, Ordering::SeqCst);
            after - before
        }
    }

    /// Scrolling toward the measured frontier schedules background batches
    /// that extend the content, and the frontier keeps ahead of the
    /// viewport.
    #[test]
    fn scrolling_extends_the_measured_frontier() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        // 7 of 50 rows measured: frontier at 700, just past the viewport.
        let rows = Arc::new(Rows {
            row_height: 100.0,
            total: 50,
            measured: AtomicUsize::new(7),
            batches: AtomicUsize::new(0),
        });

        let mut engine = engine(ScrollConfig::default());
        engine.set_measurer(Some(IncrementalMeasurer::new(
            rows.clone(),
            MeasureConfig::default(),
            rt.handle().clone(),
            Box::new(|| {}),
        )));

        // Scroll down 300pt: viewport leading edge hits 900, past the
        // 700pt frontier.
        engine.scroll_to_now(Vec2::new(0.0, -300.0));
        engine.on_frame(DT);

        for _ in 0..200 {
            if rows.measured.load(Ordering::SeqCst) >= 9 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(
            rows.measured.load(Ordering::SeqCst) >= 9,
            "frontier never advanced past the viewport"
        );
        assert!(rows.batches.load(Ordering::SeqCst) >= 1);
    }
}
