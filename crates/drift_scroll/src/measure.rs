//! Incremental content measurement.
//!
//! Virtualized containers start with only a partial measurement of their
//! content. As the viewport approaches the measured frontier, the measurer
//! schedules a background batch that measures a few more items, then
//! requests a repaint. A single-permit semaphore keeps at most one batch in
//! flight; triggers arriving while a batch runs are dropped, and the batch
//! re-checks the frontier when it completes so back-to-back batches keep up
//! with a fast fling.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, trace, warn};

/// Content that can be measured in increments.
///
/// `measure_additional_items` runs on a background thread and may block; it
/// returns how many items it actually measured (zero when the tail was
/// already reached).
pub trait VirtualizedContent: Send + Sync + 'static {
    /// Far edge of the measured region along the scroll axis, in logical
    /// units.
    fn measured_content_end(&self) -> f32;

    /// Index of the last measured item.
    fn last_measured_index(&self) -> usize;

    /// Total number of items, measured or not.
    fn item_count(&self) -> usize;

    /// Measure up to `batch_size + ahead_count` further items at `scale`.
    fn measure_additional_items(&self, batch_size: usize, ahead_count: usize, scale: f32)
        -> usize;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    /// A batch is already running; this trigger is dropped, not queued.
    #[error("measurement batch already in flight")]
    InFlight,
    /// The container was disposed; no further batches will run.
    #[error("measurer has been disposed")]
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureConfig {
    /// Items measured per batch.
    pub batch_size: usize,
    /// Extra items measured past the batch, as look-ahead.
    pub ahead_count: usize,
    /// Distance from the measured frontier (logical units) at which a batch
    /// is scheduled. Zero means "when the frontier enters the viewport".
    pub trigger_distance: f32,
    /// Render scale passed to measurement.
    pub pixel_scale: f32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            ahead_count: 1,
            trigger_distance: 0.0,
            pixel_scale: 1.0,
        }
    }
}

struct MeasurerInner {
    content: Arc<dyn VirtualizedContent>,
    config: MeasureConfig,
    gate: Arc<Semaphore>,
    disposed: AtomicBool,
    // Latest viewport frontier, f32 bits; written by check_trigger, read by
    // the completion re-check.
    leading_edge_bits: AtomicU32,
    runtime: tokio::runtime::Handle,
    repaint: Box<dyn Fn() + Send + Sync>,
}

pub struct IncrementalMeasurer {
    inner: Arc<MeasurerInner>,
}

impl IncrementalMeasurer {
    pub fn new(
        content: Arc<dyn VirtualizedContent>,
        config: MeasureConfig,
        runtime: tokio::runtime::Handle,
        repaint: Box<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self {
            inner: Arc::new(MeasurerInner {
                content,
                config,
                gate: Arc::new(Semaphore::new(1)),
                disposed: AtomicBool::new(false),
                leading_edge_bits: AtomicU32::new(0),
                runtime,
                repaint,
            }),
        }
    }

    /// Stop scheduling and tell any running batch to discard its result.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// True while a batch is running.
    pub fn is_in_flight(&self) -> bool {
        self.inner.gate.available_permits() == 0
    }

    /// Called every frame with the viewport's leading edge along the scroll
    /// axis (positive distance scrolled into the content). Schedules a batch
    /// when the measured frontier is close enough; returns whether one was
    /// scheduled.
    pub fn check_trigger(&self, leading_edge: f32) -> bool {
        self.inner
            .leading_edge_bits
            .store(leading_edge.to_bits(), Ordering::Relaxed);
        match MeasurerInner::try_schedule(&self.inner, leading_edge) {
            Ok(scheduled) => scheduled,
            Err(MeasureError::InFlight) => {
                trace!(leading_edge, "measurement trigger dropped, batch in flight");
                false
            }
            Err(MeasureError::Disposed) => false,
        }
    }
}

impl MeasurerInner {
    fn wants_batch(&self, leading_edge: f32) -> bool {
        if self.content.last_measured_index() + 1 >= self.content.item_count() {
            return false;
        }
        let frontier = self.content.measured_content_end();
        frontier - leading_edge <= self.config.trigger_distance
    }

    /// Ok(true) when a batch was scheduled, Ok(false) when none was needed.
    fn try_schedule(inner: &Arc<Self>, leading_edge: f32) -> Result<bool, MeasureError> {
        if inner.disposed.load(Ordering::SeqCst) {
            return Err(MeasureError::Disposed);
        }
        if !inner.wants_batch(leading_edge) {
            return Ok(false);
        }
        let permit = inner
            .gate
            .clone()
            .try_acquire_owned()
            .map_err(|_| MeasureError::InFlight)?;

        let task = inner.clone();
        inner.runtime.spawn(async move {
            if task.disposed.load(Ordering::SeqCst) {
                drop(permit);
                return;
            }
            let content = task.content.clone();
            let MeasureConfig {
                batch_size,
                ahead_count,
                pixel_scale,
                ..
            } = task.config;
            let measured = tokio::task::spawn_blocking(move || {
                content.measure_additional_items(batch_size, ahead_count, pixel_scale)
            })
            .await;
            drop(permit);

            let measured = match measured {
                Ok(n) => n,
                Err(err) => {
                    warn!(%err, "measurement batch panicked, discarding");
                    return;
                }
            };
            if task.disposed.load(Ordering::SeqCst) {
                debug!("measurer disposed mid-batch, result discarded");
                return;
            }
            debug!(measured, "incremental measurement batch complete");
            (task.repaint)();

            // Re-check at the latest frontier so a fast fling gets
            // back-to-back batches without waiting for the next frame.
            let edge = f32::from_bits(task.leading_edge_bits.load(Ordering::Relaxed));
            if measured > 0 {
                let _ = Self::try_schedule(&task, edge);
            }
        });
        Ok(true)
    }
}
