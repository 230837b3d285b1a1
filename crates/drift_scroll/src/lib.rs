//! Drift Scroll Engine
//!
//! Retained-mode scroll and gesture physics for drawn surfaces:
//!
//! - **Gesture phase machine**: Down, Panning, Flinging, Bouncing, Settled,
//!   with every transition checked
//! - **Overscroll clamp**: hard edges or rubber-band stretch with
//!   progressive resistance and spring-back
//! - **Velocity accumulator**: recency-weighted release velocity with a
//!   per-axis ceiling
//! - **Deferred offsets**: gesture handlers stage, the frame tick commits,
//!   one move per frame
//! - **Incremental measurement**: background single-flight batches extend
//!   virtualized content as the viewport approaches the measured frontier
//! - **Plane routing**: gestures walk the Forward/Current/Backward
//!   virtualization planes in fixed z-order
//!
//! The engine is headless: it consumes [`drift_core::InputEvent`]s and a
//! frame clock, and produces committed offsets for the paint layer.

pub mod bounds;
pub mod config;
pub mod deferred;
pub mod engine;
pub mod measure;
pub mod planes;
pub mod session;
pub mod snap;
pub mod state;
pub mod velocity;
pub mod viewport;

pub use bounds::{ContentOffsetBounds, SoftClamp};
pub use config::{ScrollConfig, ScrollOrientation};
pub use deferred::DeferredOffset;
pub use engine::{FrameReport, GestureConsumer, ScrollEngine};
pub use measure::{IncrementalMeasurer, MeasureConfig, MeasureError, VirtualizedContent};
pub use planes::{Plane, PlaneRole, PlaneSet};
pub use session::GestureSession;
pub use snap::{RowGridSnap, SnapProvider};
pub use state::{PhaseEvent, ScrollPhase};
pub use velocity::VelocityAccumulator;
pub use viewport::ViewportState;
