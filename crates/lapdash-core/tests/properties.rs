use std::time::Duration;

use lapdash_core::metrics::{step, FuelTracker, MetricsConfig, PipelineState, SpeedZonePolicy};
use lapdash_core::sample::RawSample;
use lapdash_core::unit_conversion::mps_to_mph;
use proptest::prelude::*;

fn sample_strategy() -> impl Strategy<Value = RawSample> {
    (
        0.0f64..120.0,
        0.0f64..12_000.0,
        0.0f64..=1.0,
        0u32..50,
        0.0f64..100.0,
        60.0f64..120.0,
    )
        .prop_map(|(speed, rpm, throttle, lap_number, fuel_level_pct, lap_last_time)| RawSample {
            speed,
            rpm,
            throttle,
            lap_number,
            fuel_level_pct,
            lap_last_time,
            shift_rpm: 7200.0,
            ..RawSample::default()
        })
}

proptest! {
    #[test]
    fn speed_conversion_is_exact(speed in -1000.0f64..1000.0) {
        prop_assert_eq!(mps_to_mph(speed), speed * 2.23694);
    }

    #[test]
    fn step_is_repeatable(
        samples in prop::collection::vec(sample_strategy(), 1..40),
        relative in any::<bool>(),
    ) {
        let config = MetricsConfig {
            speed_zones: if relative {
                SpeedZonePolicy::relative()
            } else {
                SpeedZonePolicy::default()
            },
            ..MetricsConfig::default()
        };

        let mut a = PipelineState::default();
        let mut b = PipelineState::default();
        for (tick, sample) in samples.iter().enumerate() {
            let now = Duration::from_millis(50 * tick as u64);
            let (out_a, next_a) = step(&config, &a, sample, now);
            let (out_b, next_b) = step(&config, &b, sample, now);
            prop_assert_eq!(out_a, out_b);
            prop_assert_eq!(&next_a, &next_b);
            a = next_a;
            b = next_b;
        }
    }

    #[test]
    fn max_speed_never_decreases(samples in prop::collection::vec(sample_strategy(), 1..60)) {
        let config = MetricsConfig::default();
        let mut state = PipelineState::default();
        for sample in &samples {
            let before = state.max_observed_speed_mph;
            let (out, next) = step(&config, &state, sample, Duration::ZERO);
            prop_assert!(next.max_observed_speed_mph >= before);
            prop_assert!(out.max_observed_speed_mph >= out.speed_mph);
            state = next;
        }
    }

    #[test]
    fn fuel_window_and_projection_stay_sane(
        levels in prop::collection::vec(0.0f64..100.0, 1..30),
        window in 1usize..8,
    ) {
        let mut tracker = FuelTracker::default();
        for (lap, level) in levels.iter().enumerate() {
            tracker.observe(lap as u32 + 1, *level, window);
            prop_assert!(tracker.history().count() <= window);
            prop_assert!(tracker.history().all(|used| used > 0.0));

            let remaining = tracker.laps_remaining(*level);
            prop_assert!(remaining.is_finite());
            prop_assert!(remaining >= 0.0);
            if tracker.average() == 0.0 {
                prop_assert_eq!(remaining, 0.0);
            }
        }
    }
}
