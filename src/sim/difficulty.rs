//! Difficulty curve
//!
//! Pure functions of elapsed survival time, recomputed every frame.

use crate::tuning::Tuning;

#[inline]
fn steps(t: f64, period: f64) -> u32 {
    (t.max(0.0) / period).floor() as u32
}

/// Projectile speed (pixels/frame): base, plus one step per speed period
pub fn speed(tuning: &Tuning, t: f64) -> f32 {
    tuning.base_speed + steps(t, tuning.speed_step_secs) as f32 * tuning.speed_step
}

/// Frames between emissions; shrinks once the late-game threshold is reached
pub fn emission_interval_frames(tuning: &Tuning, t: f64) -> u32 {
    let rate = if t < tuning.late_game_secs {
        1.0
    } else {
        tuning.late_game_rate
    };
    // The counter is integral, so `counter >= base / rate` is `counter >= ceil(base / rate)`
    ((tuning.base_emission_frames as f32 / rate).ceil() as u32).max(1)
}

/// Projectiles per emission: one more every burst period
pub fn burst_size(tuning: &Tuning, t: f64) -> u32 {
    steps(t, tuning.burst_step_secs).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_curve_at_start() {
        let tuning = Tuning::default();
        assert_eq!(speed(&tuning, 0.0), 2.0);
        assert_eq!(emission_interval_frames(&tuning, 0.0), 60);
        assert_eq!(burst_size(&tuning, 0.0), 1);
    }

    #[test]
    fn test_curve_steps() {
        let tuning = Tuning::default();
        assert_eq!(speed(&tuning, 19.99), 2.0);
        assert_eq!(speed(&tuning, 20.0), 2.5);
        assert_eq!(speed(&tuning, 65.0), 3.5);
        assert_eq!(burst_size(&tuning, 9.99), 1);
        assert_eq!(burst_size(&tuning, 10.0), 2);
    }

    #[test]
    fn test_late_game_at_65_seconds() {
        let tuning = Tuning::default();
        assert_eq!(emission_interval_frames(&tuning, 59.999), 60);
        assert_eq!(emission_interval_frames(&tuning, 60.0), 40);
        assert_eq!(emission_interval_frames(&tuning, 65.0), 40);
        assert_eq!(burst_size(&tuning, 65.0), 7);
    }

    #[test]
    fn test_burst_saturates_on_tiny_period() {
        // Bypasses `sanitized()`; the curve itself must still not overflow
        let tuning = Tuning {
            burst_step_secs: 1e-9,
            ..Default::default()
        };
        assert_eq!(burst_size(&tuning, 5.0), u32::MAX);
    }

    proptest! {
        #[test]
        fn prop_curve_is_monotonic(a in 0.0f64..3600.0, b in 0.0f64..3600.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            prop_assert!(speed(&tuning, lo) >= 2.0);
            prop_assert!(speed(&tuning, lo) <= speed(&tuning, hi));
            prop_assert!(burst_size(&tuning, lo) >= 1);
            prop_assert!(burst_size(&tuning, lo) <= burst_size(&tuning, hi));
        }

        #[test]
        fn prop_interval_is_60_or_40(t in 0.0f64..3600.0) {
            let tuning = Tuning::default();
            let expected = if t < 60.0 { 60 } else { 40 };
            prop_assert_eq!(emission_interval_frames(&tuning, t), expected);
        }
    }
}
