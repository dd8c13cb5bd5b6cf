//! Frame Loop
//!
//! Ties the source, the metrics pipeline, and a render sink together at a
//! fixed tick rate. One tick is one read, one compute, one render, run back
//! to back. The loop is a single task meant for a current-thread runtime, so
//! the pipeline state needs no locking.
//!
//! The source read has no timeout: a source that blocks in `freeze_latest`
//! blocks the whole loop until it returns.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

use crate::config::OverlayLayout;
use crate::error::OverlayError;
use crate::metrics::{DerivedMetrics, DisplayMetrics, MetricsConfig};
use crate::reader::SampleReader;
use crate::source::TelemetrySource;

/// Consumer of per-tick display values
pub trait RenderSink {
    /// Draw one tick
    fn render(
        &mut self,
        metrics: &DisplayMetrics,
        layout: &OverlayLayout,
    ) -> Result<(), OverlayError>;
}

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// When the loop started ticking
    pub started_at: DateTime<Utc>,
    /// When the loop stopped
    pub stopped_at: DateTime<Utc>,
    /// Number of ticks rendered
    pub ticks: u64,
}

/// Fixed-rate sample → metrics → render loop
pub struct FrameLoop<S, R> {
    source: S,
    sink: R,
    metrics: DerivedMetrics,
    layout: OverlayLayout,
    tick_interval: Duration,
}

impl<S: TelemetrySource, R: RenderSink> FrameLoop<S, R> {
    /// Create a loop with fresh pipeline state
    pub fn new(
        source: S,
        sink: R,
        metrics: MetricsConfig,
        layout: OverlayLayout,
        tick_interval: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            metrics: DerivedMetrics::new(metrics),
            layout,
            tick_interval,
        }
    }

    /// Start the source and tick until cancelled or the source runs dry
    ///
    /// Cancellation is checked before each tick begins; a tick in progress
    /// always completes. Errors from the sink end the run.
    pub async fn run(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<SessionSummary, OverlayError> {
        self.source
            .startup()
            .map_err(|e| OverlayError::SourceUnavailable(e.to_string()))?;

        let started_at = Utc::now();
        let start = Instant::now();
        let mut ticks = 0u64;

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Frame loop started ({:.1} Hz)",
            1.0 / self.tick_interval.as_secs_f64()
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if cancel.is_cancelled() {
                break;
            }

            let sample = SampleReader::read(&mut self.source);
            let now = start.elapsed();
            let display = self.metrics.update(&sample, now);
            self.sink.render(&display, &self.layout)?;
            ticks += 1;
            trace!("Tick {} rendered at {:?}", ticks, now);

            if self.source.is_finished() {
                info!("Telemetry source finished");
                break;
            }
        }

        let summary = SessionSummary {
            started_at,
            stopped_at: Utc::now(),
            ticks,
        };
        info!("Frame loop stopped after {} ticks", summary.ticks);
        Ok(summary)
    }

    /// The metrics pipeline and its carried state
    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    /// The render sink
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Take the loop apart
    pub fn into_parts(self) -> (S, R) {
        (self.source, self.sink)
    }
}
