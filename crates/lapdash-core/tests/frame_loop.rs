use std::time::Duration;

use lapdash_core::config::OverlayLayout;
use lapdash_core::frame_loop::{FrameLoop, RenderSink};
use lapdash_core::metrics::{DisplayMetrics, MetricsConfig};
use lapdash_core::source::{Channel, ChannelValue, Frame, ReplaySource};
use lapdash_core::OverlayError;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct CollectingSink {
    frames: Vec<DisplayMetrics>,
    fail_after: Option<usize>,
}

impl RenderSink for CollectingSink {
    fn render(
        &mut self,
        metrics: &DisplayMetrics,
        _layout: &OverlayLayout,
    ) -> Result<(), OverlayError> {
        if self.fail_after == Some(self.frames.len()) {
            return Err(OverlayError::Render("window closed".into()));
        }
        self.frames.push(metrics.clone());
        Ok(())
    }
}

fn frame(lap: i64, lap_last_time: f64) -> Frame {
    let mut frame = Frame::new();
    frame.insert(Channel::Lap, ChannelValue::Int(lap));
    frame.insert(Channel::LapLastLapTime, ChannelValue::Float(lap_last_time));
    frame
}

fn build_loop(frames: Vec<Frame>, sink: CollectingSink) -> FrameLoop<ReplaySource, CollectingSink> {
    FrameLoop::new(
        ReplaySource::from_frames(frames),
        sink,
        MetricsConfig::default(),
        OverlayLayout::default(),
        Duration::from_millis(50),
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test(start_paused = true)]
async fn test_one_render_per_frame() {
    init_tracing();
    let frames = vec![frame(1, 0.0), frame(1, 0.0), frame(2, 91.3)];
    let mut frame_loop = build_loop(frames, CollectingSink::default());

    let summary = frame_loop.run(&CancellationToken::new()).await.unwrap();

    assert_eq!(summary.ticks, 3);
    assert!(summary.stopped_at >= summary.started_at);
    let laps: Vec<u32> = frame_loop.sink().frames.iter().map(|m| m.lap_number).collect();
    assert_eq!(laps, vec![1, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_flash_follows_loop_clock() {
    let mut frames = vec![frame(1, 90.0), frame(1, 89.5)];
    frames.extend((0..40).map(|_| frame(1, 89.5)));
    let mut frame_loop = build_loop(frames, CollectingSink::default());

    frame_loop.run(&CancellationToken::new()).await.unwrap();

    let flashes: Vec<bool> = frame_loop
        .sink()
        .frames
        .iter()
        .map(|m| m.improvement_flash)
        .collect();
    assert!(!flashes[0]);
    assert!(flashes[1]);
    assert!(!flashes[flashes.len() - 1]);

    // 1.2 s at 50 ms per tick
    let on = flashes.iter().filter(|f| **f).count();
    assert!((23..=25).contains(&on), "flash was on for {on} ticks");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_first_tick() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut frame_loop = build_loop(vec![frame(1, 0.0)], CollectingSink::default());

    let summary = frame_loop.run(&cancel).await.unwrap();
    assert_eq!(summary.ticks, 0);
    assert!(frame_loop.sink().frames.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_between_ticks() {
    let cancel = CancellationToken::new();
    let frames = (0..1000).map(|_| frame(1, 0.0)).collect();
    let mut frame_loop = build_loop(frames, CollectingSink::default());

    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(225)).await;
        stopper.cancel();
    });

    let summary = frame_loop.run(&cancel).await.unwrap();
    assert!(summary.ticks >= 4 && summary.ticks <= 6, "ticks = {}", summary.ticks);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_source_is_fatal() {
    let mut frame_loop = build_loop(Vec::new(), CollectingSink::default());
    let result = frame_loop.run(&CancellationToken::new()).await;
    assert!(matches!(result, Err(OverlayError::SourceUnavailable(_))));
}

#[tokio::test(start_paused = true)]
async fn test_sink_error_ends_run() {
    let sink = CollectingSink {
        fail_after: Some(2),
        ..CollectingSink::default()
    };
    let frames = (0..10).map(|_| frame(1, 0.0)).collect();
    let mut frame_loop = build_loop(frames, sink);

    let result = frame_loop.run(&CancellationToken::new()).await;
    assert!(matches!(result, Err(OverlayError::Render(_))));
    assert_eq!(frame_loop.sink().frames.len(), 2);
}
