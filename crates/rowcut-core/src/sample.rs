//! Arc-length sampling of an axis with local tangent estimation.

use geo::{Euclidean, Length, LineInterpolatePoint, LineString, Point};

use crate::models::{SamplePoint, Tangent};

/// Tolerance for keeping the final sample when floating-point error puts the
/// last step just past the end of the axis.
const END_TOLERANCE: f64 = 1e-9;

/// Arc-length offset on either side of a sample used for the
/// central-difference tangent estimate.
const TANGENT_OFFSET: f64 = 0.01;

/// Sample evenly spaced points along `axis`, `interval` units apart.
///
/// Positions run d = 0, interval, 2*interval, ... while d <= length + ε, so
/// both endpoints are included and a non-degenerate axis of length L yields
/// floor(L / interval) + 1 samples. A zero-length axis yields no samples.
/// Purely a function of its inputs; `interval > 0` is the caller's
/// responsibility (the pipeline rejects non-positive parameters up front).
pub fn sample(axis: &LineString<f64>, interval: f64) -> Vec<SamplePoint> {
    debug_assert!(interval > 0.0);
    let length = Euclidean.length(axis);
    if length <= 0.0 {
        return Vec::new();
    }

    let mut samples = Vec::new();
    let mut d = 0.0;
    while d <= length + END_TOLERANCE {
        let s = d.min(length);
        samples.push(SamplePoint {
            point: interpolate(axis, s, length),
            s,
            tangent: tangent_at(axis, s, length),
        });
        d += interval;
    }
    samples
}

/// Estimate the unit tangent at arc-length `s` by interpolating the axis a
/// small offset on either side, clamped to [0, length]. Degenerate
/// displacements fall back to the +x direction.
pub fn tangent_at(axis: &LineString<f64>, s: f64, length: f64) -> Tangent {
    if length <= 0.0 {
        return Tangent::from_displacement(0.0, 0.0);
    }
    let s0 = (s - TANGENT_OFFSET).clamp(0.0, length);
    let s1 = (s + TANGENT_OFFSET).clamp(0.0, length);
    let p0 = interpolate(axis, s0, length);
    let p1 = interpolate(axis, s1, length);
    Tangent::from_displacement(p1.x() - p0.x(), p1.y() - p0.y())
}

fn interpolate(axis: &LineString<f64>, s: f64, length: f64) -> Point<f64> {
    let fraction = (s / length).clamp(0.0, 1.0);
    // None is only possible for an empty axis, which length > 0 rules out.
    axis.line_interpolate_point(fraction).unwrap_or_else(|| Point::new(0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn straight_axis(length: f64) -> LineString<f64> {
        LineString::from(vec![(0.0, 0.0), (length, 0.0)])
    }

    #[test]
    fn test_sample_count_includes_both_endpoints() {
        let samples = sample(&straight_axis(100.0), 20.0);
        assert_eq!(samples.len(), 6);
        let positions: Vec<f64> = samples.iter().map(|sp| sp.s).collect();
        assert_eq!(positions, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_sample_positions_stay_within_axis() {
        let samples = sample(&straight_axis(95.0), 20.0);
        assert_eq!(samples.len(), 5);
        for sp in &samples {
            assert!(sp.s >= 0.0 && sp.s <= 95.0);
        }
        // Consecutive gaps are exactly the interval except possibly the last.
        for pair in samples.windows(2).take(samples.len().saturating_sub(2)) {
            assert!((pair[1].s - pair[0].s - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_axis_yields_no_samples() {
        let degenerate = LineString::from(vec![(5.0, 5.0), (5.0, 5.0)]);
        assert!(sample(&degenerate, 10.0).is_empty());
    }

    #[test]
    fn test_tangent_follows_axis_direction() {
        let samples = sample(&straight_axis(100.0), 50.0);
        for sp in &samples {
            assert!((sp.tangent.dx() - 1.0).abs() < 1e-9);
            assert!(sp.tangent.dy().abs() < 1e-9);
        }
    }

    #[test]
    fn test_tangent_valid_at_axis_endpoints() {
        // s = 0 and s = L rely on the clamped offsets; both must still
        // produce a unit tangent along the axis.
        let axis = LineString::from(vec![(0.0, 0.0), (0.0, 40.0)]);
        let first = tangent_at(&axis, 0.0, 40.0);
        let last = tangent_at(&axis, 40.0, 40.0);
        for t in [first, last] {
            assert!(t.dx().abs() < 1e-9);
            assert!((t.dy() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tangent_on_bent_axis() {
        // Right-angle bend: tangents at the two ends point along different legs.
        let axis = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let length = Euclidean.length(&axis);
        let start = tangent_at(&axis, 0.0, length);
        let end = tangent_at(&axis, length, length);
        assert!((start.dx() - 1.0).abs() < 1e-9);
        assert!((end.dy() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let axis = LineString::from(vec![(0.0, 0.0), (33.0, 7.0), (71.0, -4.0)]);
        assert_eq!(sample(&axis, 7.5), sample(&axis, 7.5));
    }

    proptest! {
        #[test]
        fn prop_sample_count_and_range(
            steps in 0usize..60,
            frac in 0.1f64..0.9,
            interval in 0.1f64..50.0,
        ) {
            // Length chosen off the sampling grid so the expected count is
            // unambiguous under floating-point accumulation.
            let length = interval * (steps as f64 + frac);
            let samples = sample(&straight_axis(length), interval);
            prop_assert_eq!(samples.len(), steps + 1);
            for sp in &samples {
                prop_assert!(sp.s >= 0.0 && sp.s <= length);
            }
        }

        #[test]
        fn prop_tangents_are_unit_length(
            points in proptest::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..8),
            interval in 0.5f64..20.0,
        ) {
            let axis = LineString::from(points);
            for sp in sample(&axis, interval) {
                let magnitude =
                    (sp.tangent.dx() * sp.tangent.dx() + sp.tangent.dy() * sp.tangent.dy()).sqrt();
                prop_assert!((magnitude - 1.0).abs() < 1e-9);
            }
        }
    }
}
