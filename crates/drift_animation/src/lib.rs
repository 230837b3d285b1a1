//! Drift Animation Primitives
//!
//! The animator objects the scroll engine orchestrates:
//!
//! - **Spring**: damped spring used for elastic bounce-back, interruptible
//!   with velocity inheritance
//! - **Fling**: constant-deceleration momentum carrying a released pan to
//!   a stop
//! - **Timed**: fixed-duration eased offset animation (wheel scrolling,
//!   programmatic scroll-to)
//! - **Scheduler**: slotmap-keyed spring storage ticked once per frame

pub mod fling;
pub mod scheduler;
pub mod spring;
pub mod timed;

pub use fling::FlingAnimator;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
pub use timed::{Easing, TimedScroll};
