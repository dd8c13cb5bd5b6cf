//! # LapDash Core Library
//!
//! Core functionality for the LapDash sim racing overlay.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A polled telemetry source boundary with frozen snapshots
//! - Sample reading with per-channel default substitution
//! - Derived display metrics (speed/RPM zones, lap-improvement flash,
//!   rolling fuel consumption and laps-remaining projection)
//! - Demo and replay sources for running without the simulator
//! - A fixed-rate frame loop feeding a render sink
//!
//! ## Example
//!
//! ```rust,ignore
//! use lapdash_core::prelude::*;
//!
//! let config = OverlayConfig::load_or_default(OverlayConfig::default_path()?)?;
//! let mut frame_loop = FrameLoop::new(
//!     DemoSource::new(),
//!     my_sink,
//!     config.metrics.clone(),
//!     config.layout.clone(),
//!     config.tick_interval(),
//! );
//! let summary = frame_loop.run(&CancellationToken::new()).await?;
//! println!("rendered {} ticks", summary.ticks);
//! ```

pub mod config;
pub mod demo;
mod error;
pub mod frame_loop;
pub mod metrics;
pub mod reader;
pub mod sample;
pub mod source;
pub mod unit_conversion;

pub use error::OverlayError;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigError, OverlayConfig, OverlayLayout, WindowOffset};
    pub use crate::demo::DemoSource;
    pub use crate::error::OverlayError;
    pub use crate::frame_loop::{FrameLoop, RenderSink, SessionSummary};
    pub use crate::metrics::{
        DeltaBar, DeltaDirection, DerivedMetrics, DisplayMetrics, MetricsConfig, PipelineState,
        RpmZone, SpeedZone, SpeedZonePolicy,
    };
    pub use crate::reader::SampleReader;
    pub use crate::sample::{Gear, RawSample};
    pub use crate::source::{
        Channel, ChannelValue, Frame, ReplaySource, SourceError, TelemetrySource,
    };
    pub use tokio_util::sync::CancellationToken;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
