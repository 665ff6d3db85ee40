//! Small pure helpers shared by the model and the renderer

use glam::DVec2;
use std::f64::consts::PI;

/// Map an id string onto a stable base angle in `[0, 2π)`.
///
/// Rolling `hash * 31 + unit` over UTF-16 code units with 32-bit wraparound,
/// reduced to whole degrees. The same id lands on the same angle in every
/// session.
///
/// The whole fold wraps as `i32`. Variants that only truncate at the shift
/// and subtract in floating point diverge from this once ids pass a few
/// characters, so long NeoWs ids (7-8 digits) land on different angles than
/// they would under such a variant.
pub fn hash_to_angle(id: &str) -> f64 {
    let hash = id.encode_utf16().fold(0i32, |hash, unit| {
        (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    let degrees = (hash % 360).unsigned_abs();
    f64::from(degrees) * PI / 180.0
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Callers must pass distinct input bounds.
#[inline]
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Inclusive point-in-circle test on squared distances
#[inline]
pub fn is_point_in_circle(point: DVec2, center: DVec2, radius: f64) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_hash_to_angle_known_values() {
        assert_eq!(hash_to_angle(""), 0.0);
        // 'a' = 97 -> 97 degrees
        assert!((hash_to_angle("a") - 97.0_f64.to_radians()).abs() < 1e-12);
        // "ab" = 97 * 31 + 98 = 3105 -> 3105 % 360 = 225 degrees
        assert!((hash_to_angle("ab") - 225.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_hash_to_angle_wraps_like_int32() {
        // Long ids overflow 32 bits; the result must still be a whole degree in range
        let angle = hash_to_angle("3542519-2025-XG2-very-long-identifier");
        let degrees = angle.to_degrees().round();
        assert!((angle.to_degrees() - degrees).abs() < 1e-9);
        assert!((0.0..360.0).contains(&degrees));
    }

    #[test]
    fn test_map_range_midpoint() {
        assert!((map_range(5.0, 0.0, 10.0, 100.0, 200.0) - 150.0).abs() < 1e-12);
        // Inverted output range
        assert!((map_range(2.5, 0.0, 10.0, 1.0, 0.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_point_in_circle_boundary() {
        let center = DVec2::new(100.0, 100.0);
        assert!(is_point_in_circle(DVec2::new(105.0, 100.0), center, 5.0));
        assert!(!is_point_in_circle(DVec2::new(105.1, 100.0), center, 5.0));
        assert!(is_point_in_circle(DVec2::new(110.0, 110.0), center, 15.0));
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, PI / 2.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_hash_to_angle_deterministic_and_in_range(id in ".*") {
            let first = hash_to_angle(&id);
            prop_assert_eq!(first, hash_to_angle(&id));
            prop_assert!((0.0..TAU).contains(&first));
        }

        #[test]
        fn prop_map_range_hits_endpoints(
            in_min in -1e6f64..1e6,
            span in 1e-3f64..1e6,
            out_min in -1e6f64..1e6,
            out_max in -1e6f64..1e6,
        ) {
            let in_max = in_min + span;
            let lo = map_range(in_min, in_min, in_max, out_min, out_max);
            let hi = map_range(in_max, in_min, in_max, out_min, out_max);
            let tol = 1e-6 * (1.0 + out_min.abs() + out_max.abs());
            prop_assert!((lo - out_min).abs() <= tol);
            prop_assert!((hi - out_max).abs() <= tol);
        }
    }
}
