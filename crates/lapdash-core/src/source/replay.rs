//! Replay source
//!
//! Plays back recorded frames from a JSON-lines file, one frame per line:
//!
//! ```text
//! {"SessionTime": 12.5, "Speed": 41.2, "Gear": 3, "FuelLevelPct": 0.84}
//! {"SessionTime": 12.55, "Speed": 41.4, "Gear": 3, "FuelLevelPct": null}
//! ```
//!
//! `null` or an absent key is a missing channel. Keys that are not overlay
//! channels are ignored.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{Channel, ChannelValue, Frame, SourceError, TelemetrySource};

/// Frame-by-frame playback of recorded telemetry
pub struct ReplaySource {
    /// Recorded frames
    frames: Vec<Frame>,
    /// Index of the next frame to freeze
    next: usize,
    /// Index of the currently frozen frame
    frozen: Option<usize>,
}

impl ReplaySource {
    /// Create a replay over in-memory frames
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            next: 0,
            frozen: None,
        }
    }

    /// Load a JSON-lines replay file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path.as_ref())?;
        let source = Self::parse(&content)?;
        debug!(
            "Loaded replay {} ({} frames)",
            path.as_ref().display(),
            source.len()
        );
        Ok(source)
    }

    /// Parse JSON-lines content. Blank lines are skipped.
    pub fn parse(content: &str) -> Result<Self, SourceError> {
        let mut frames = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let raw: Map<String, Value> = serde_json::from_str(line).map_err(|e| {
                SourceError::Parse {
                    line: index + 1,
                    message: e.to_string(),
                }
            })?;

            let mut frame = Frame::new();
            for (name, value) in raw {
                let Some(channel) = Channel::from_name(&name) else {
                    trace!("Ignoring unknown replay key '{}'", name);
                    continue;
                };
                match channel_value(&value) {
                    Some(value) => {
                        frame.insert(channel, value);
                    }
                    None if value.is_null() => {}
                    None => trace!(
                        "Line {}: {} holds a non-numeric value, treating as missing",
                        index + 1,
                        channel
                    ),
                }
            }
            frames.push(frame);
        }

        Ok(Self::from_frames(frames))
    }

    /// Get the number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the currently frozen frame
    pub fn position(&self) -> Option<usize> {
        self.frozen
    }
}

/// Numbers and booleans are channel values; anything else is missing
fn channel_value(value: &Value) -> Option<ChannelValue> {
    match value {
        Value::Bool(b) => Some(ChannelValue::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(ChannelValue::Int(i)),
            None => n.as_f64().map(ChannelValue::Float),
        },
        _ => None,
    }
}

impl TelemetrySource for ReplaySource {
    fn startup(&mut self) -> Result<(), SourceError> {
        if self.frames.is_empty() {
            return Err(SourceError::NotRunning("replay contains no frames".into()));
        }
        self.next = 0;
        self.frozen = None;
        Ok(())
    }

    fn freeze_latest(&mut self) {
        if self.next < self.frames.len() {
            self.frozen = Some(self.next);
            self.next += 1;
        }
    }

    fn read(&self, channel: Channel) -> Option<ChannelValue> {
        self.frozen
            .and_then(|index| self.frames.get(index))
            .and_then(|frame| frame.get(&channel).copied())
    }

    fn is_finished(&self) -> bool {
        self.next >= self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_nulls_and_unknown_keys() {
        let source = ReplaySource::parse(
            "{\"Speed\": 40.0, \"Gear\": 3, \"FuelLevelPct\": null, \"Bogus\": 1}\n\n{\"Lap\": 2}\n",
        )
        .unwrap();
        assert_eq!(source.len(), 2);

        let first = &source.frames[0];
        assert_eq!(first.get(&Channel::Speed), Some(&ChannelValue::Float(40.0)));
        assert_eq!(first.get(&Channel::Gear), Some(&ChannelValue::Int(3)));
        assert!(!first.contains_key(&Channel::FuelLevelPct));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_non_numeric_values_do_not_fail_the_line() {
        let source = ReplaySource::parse(concat!(
            "{\"Speed\": 40.0, \"DriverName\": \"Alice\"}\n",
            "{\"Speed\": 41.0, \"CarIdxLap\": [1, 2, 3], \"WeekendInfo\": {\"TrackName\": \"spa\"}}\n",
            "{\"Speed\": 42.0, \"Gear\": \"N\", \"Lap\": [4]}\n",
        ))
        .unwrap();
        assert_eq!(source.len(), 3);

        assert_eq!(source.frames[0].len(), 1);
        assert_eq!(source.frames[1].get(&Channel::Speed), Some(&ChannelValue::Float(41.0)));
        assert_eq!(source.frames[1].len(), 1);

        let third = &source.frames[2];
        assert_eq!(third.get(&Channel::Speed), Some(&ChannelValue::Float(42.0)));
        assert!(!third.contains_key(&Channel::Gear));
        assert!(!third.contains_key(&Channel::Lap));
    }

    #[test]
    fn test_bool_channel_values() {
        let source = ReplaySource::parse("{\"Speed\": true}\n").unwrap();
        assert_eq!(source.frames[0].get(&Channel::Speed), Some(&ChannelValue::Bool(true)));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = ReplaySource::parse("{\"Speed\": 1.0}\nnot json\n").err().unwrap();
        match err {
            SourceError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_playback_advances_one_frame_per_freeze() {
        let mut source = ReplaySource::parse("{\"Lap\": 1}\n{\"Lap\": 2}\n").unwrap();
        source.startup().unwrap();
        assert_eq!(source.read(Channel::Lap), None);
        assert!(!source.is_finished());

        source.freeze_latest();
        assert_eq!(source.read(Channel::Lap), Some(ChannelValue::Int(1)));
        source.freeze_latest();
        assert_eq!(source.read(Channel::Lap), Some(ChannelValue::Int(2)));
        assert!(source.is_finished());

        // Holds the last frame once exhausted
        source.freeze_latest();
        assert_eq!(source.position(), Some(1));
    }

    #[test]
    fn test_empty_replay_cannot_start() {
        let mut source = ReplaySource::from_frames(Vec::new());
        assert!(matches!(source.startup(), Err(SourceError::NotRunning(_))));
    }
}
