//! Terminal render sinks
//!
//! Stand-ins for the overlay windows: one line per tick, either a readable
//! dash line or a JSON object for piping into something that draws.

use std::io::Write;

use lapdash_core::prelude::*;

/// Human-readable dash line per tick
pub struct TextSink<W> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn render(&mut self, m: &DisplayMetrics, _layout: &OverlayLayout) -> Result<(), OverlayError> {
        let shift = if m.shift_flash { " SHIFT" } else { "" };
        let flash = if m.improvement_flash { " *IMPROVED*" } else { "" };
        writeln!(
            self.out,
            "L{:<3} {:>6.1} mph [{:?}] {:>5.0} rpm [{:?}{}] G {:>3} | T {:>3.0}% B {:>3.0}% | \
             last {:>7.3}{} | Δbest {:+.3} Δlast {:+.3} | fuel {:>5.1}% avg {:.2} ({:.1} laps)",
            m.lap_number,
            m.speed_mph,
            m.speed_zone,
            m.rpm,
            m.rpm_zone,
            shift,
            m.gear.to_string(),
            m.throttle_pct,
            m.brake_pct,
            m.lap_last_time,
            flash,
            m.lap_delta_to_best,
            m.lap_delta_to_session_last,
            m.fuel_level_pct,
            m.avg_fuel_per_lap,
            m.laps_remaining,
        )
        .map_err(|e| OverlayError::Render(e.to_string()))
    }
}

/// One JSON object per tick
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonSink<W> {
    fn render(&mut self, m: &DisplayMetrics, _layout: &OverlayLayout) -> Result<(), OverlayError> {
        serde_json::to_writer(&mut self.out, m).map_err(|e| OverlayError::Render(e.to_string()))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| OverlayError::Render(e.to_string()))
    }
}
