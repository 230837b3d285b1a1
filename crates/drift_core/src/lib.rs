//! Drift Core Primitives
//!
//! Foundational types shared by the Drift scroll/gesture engine:
//!
//! - **Geometry**: `Vec2`, `Point`, `Size`, `Rect` in logical units
//! - **Input**: the platform-agnostic touch/wheel event record
//! - **Gesture contract**: the dispatch interface every scrollable child
//!   (and every virtualization plane) implements

pub mod geometry;
pub mod gesture;
pub mod input;

pub use geometry::{Point, Rect, Size, Vec2};
pub use gesture::{GestureListener, GestureOutcome, RoutingInfo};
pub use input::{InputEvent, Manipulation, TouchAction, WheelInfo};
