//! Time-of-day lighting model.
//!
//! A deliberately simplified, non-physical curve: the day is zoned into
//! night / dawn / day / dusk with linear ramps between the ambient levels and
//! a step for the directional sun light. The model is a pure function of the
//! clock value and is safe to recompute every frame.

use glam::Vec3;
use std::f32::consts::PI;

/// Radius of the sun's east-west arc.
pub const SUN_RADIUS: f32 = 100.0;
/// Ambient level during full daytime (6 < t < 18).
pub const DAY_AMBIENT: f32 = 1.5;
/// Ambient floor during deep night.
pub const NIGHT_AMBIENT: f32 = 0.35;
/// Ambient at the foot of the dawn ramp (t = 5).
pub const DAWN_AMBIENT: f32 = 0.4;
/// Slope of the dawn/dusk ambient ramps, per hour.
const RAMP_PER_HOUR: f32 = 1.1;
/// Directional sun intensity during the day.
pub const DAY_DIRECTIONAL: f32 = 3.0;
/// Directional sun intensity at night.
pub const NIGHT_DIRECTIONAL: f32 = 0.5;

/// Derived lighting state for one time-of-day value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub sun_position: Vec3,
    pub ambient: f32,
    pub directional: f32,
    pub stars_visible: bool,
}

/// Computes the full lighting state for a clock value in [0, 24).
pub fn lighting_at(time_of_day: f32) -> Lighting {
    Lighting {
        sun_position: sun_position(time_of_day),
        ambient: ambient_intensity(time_of_day),
        directional: directional_intensity(time_of_day),
        stars_visible: stars_visible(time_of_day),
    }
}

/// Sun position on a tilted east-west arc.
///
/// The arc angle is zero at t = 6 (sunrise on the +X horizon) and π/2 at
/// t = 12 (overhead).
pub fn sun_position(time_of_day: f32) -> Vec3 {
    let angle = (time_of_day / 24.0) * 2.0 * PI - PI / 2.0;
    Vec3::new(
        angle.cos() * SUN_RADIUS,
        angle.sin() * SUN_RADIUS,
        angle.sin() * SUN_RADIUS * 0.5,
    )
}

/// Piecewise-linear ambient intensity: night floor, dawn ramp, day plateau,
/// dusk ramp. Continuous at the ramp boundaries.
pub fn ambient_intensity(t: f32) -> f32 {
    if t > 6.0 && t < 18.0 {
        DAY_AMBIENT
    } else if t > 5.0 && t <= 6.0 {
        DAWN_AMBIENT + (t - 5.0) * RAMP_PER_HOUR
    } else if (18.0..19.0).contains(&t) {
        DAY_AMBIENT - (t - 18.0) * RAMP_PER_HOUR
    } else {
        NIGHT_AMBIENT
    }
}

/// Directional sun intensity: a day/night step, not ramped.
pub fn directional_intensity(t: f32) -> f32 {
    if t > 6.0 && t < 18.0 {
        DAY_DIRECTIONAL
    } else {
        NIGHT_DIRECTIONAL
    }
}

/// Whether the star field is visible.
pub fn stars_visible(t: f32) -> bool {
    t < 5.0 || t > 19.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_levels_at_noon_and_midnight() {
        assert_eq!(ambient_intensity(12.0), DAY_AMBIENT);
        assert_eq!(ambient_intensity(0.0), NIGHT_AMBIENT);
    }

    #[test]
    fn ambient_is_continuous_across_the_ramps() {
        let eps = 1e-3;
        // Dawn ramp meets the day plateau at t = 6.
        assert!((ambient_intensity(6.0) - ambient_intensity(6.0 + eps)).abs() < 0.01);
        // Day plateau meets the dusk ramp at t = 18.
        assert!((ambient_intensity(18.0 - eps) - ambient_intensity(18.0)).abs() < 0.01);
        // Ramp midpoints sit between floor and plateau.
        let mid_dawn = ambient_intensity(5.5);
        assert!(mid_dawn > DAWN_AMBIENT && mid_dawn < DAY_AMBIENT);
    }

    #[test]
    fn directional_is_a_day_night_step() {
        assert_eq!(directional_intensity(12.0), DAY_DIRECTIONAL);
        assert_eq!(directional_intensity(3.0), NIGHT_DIRECTIONAL);
        assert_eq!(directional_intensity(20.0), NIGHT_DIRECTIONAL);
    }

    #[test]
    fn stars_show_only_deep_at_night() {
        assert!(stars_visible(3.0));
        assert!(stars_visible(20.0));
        assert!(!stars_visible(12.0));
        assert!(!stars_visible(5.5));
        assert!(!stars_visible(19.0));
    }

    #[test]
    fn sun_rises_on_the_x_horizon_and_peaks_overhead() {
        // t = 6 puts the arc angle at 0: sun on the +X horizon.
        let sunrise = sun_position(6.0);
        assert!((sunrise - Vec3::new(SUN_RADIUS, 0.0, 0.0)).length() < 1e-3);

        // t = 12 puts the arc angle at π/2: sun overhead (with the z tilt).
        let noon = sun_position(12.0);
        assert!(noon.x.abs() < 1e-3);
        assert!((noon.y - SUN_RADIUS).abs() < 1e-3);
        assert!((noon.z - SUN_RADIUS * 0.5).abs() < 1e-3);

        // t = 0 puts the sun below the horizon.
        assert!(sun_position(0.0).y < 0.0);
    }

    #[test]
    fn lighting_at_composes_all_fields() {
        let l = lighting_at(12.0);
        assert_eq!(l.ambient, DAY_AMBIENT);
        assert_eq!(l.directional, DAY_DIRECTIONAL);
        assert!(!l.stars_visible);
        assert_eq!(l.sun_position, sun_position(12.0));
    }
}
