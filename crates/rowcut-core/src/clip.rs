//! Two-tier clipping of raw probes against the source polygon.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{
    BooleanOps, Coord, Euclidean, Length, LineLocatePoint, LineString, MultiLineString, Point,
    Polygon,
};

/// Crossings closer than this in both coordinates are the same point, e.g. a
/// probe passing exactly through a shared vertex of two boundary edges.
const CROSSING_EPSILON: f64 = 1e-9;

/// Clip a raw probe to the polygon, reducing it to a single representative
/// cross-section.
///
/// Boundary crossings are preferred: with two or more distinct point
/// intersections against the polygon's rings, the outermost pair along the
/// probe spans the transect. With fewer (grazing touches, tangency,
/// collinear overlap) the probe is clipped against the filled area instead
/// and the longest surviving piece wins, earlier pieces taking ties.
///
/// Returns `None` when the probe misses the polygon entirely; a zero-length
/// result is left for the caller to discard.
pub fn clip_probe(probe: &LineString<f64>, polygon: &Polygon<f64>) -> Option<LineString<f64>> {
    let crossings = boundary_crossings(probe, polygon);
    if crossings.len() >= 2 {
        if let Some(span) = outermost_span(probe, &crossings) {
            return Some(span);
        }
    }
    area_clip(probe, polygon)
}

/// Distinct point-like intersections between the probe and every boundary
/// ring (exterior and holes). Collinear overlaps are not point-like and are
/// left to the area fallback.
fn boundary_crossings(probe: &LineString<f64>, polygon: &Polygon<f64>) -> Vec<Coord<f64>> {
    let mut crossings: Vec<Coord<f64>> = Vec::new();
    let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors().iter());
    for ring in rings {
        for edge in ring.lines() {
            for segment in probe.lines() {
                if let Some(LineIntersection::SinglePoint { intersection, .. }) =
                    line_intersection(segment, edge)
                {
                    let duplicate = crossings.iter().any(|c| {
                        (c.x - intersection.x).abs() <= CROSSING_EPSILON
                            && (c.y - intersection.y).abs() <= CROSSING_EPSILON
                    });
                    if !duplicate {
                        crossings.push(intersection);
                    }
                }
            }
        }
    }
    crossings
}

/// Segment spanning the first and last crossing in arc-length order along
/// the probe.
fn outermost_span(probe: &LineString<f64>, crossings: &[Coord<f64>]) -> Option<LineString<f64>> {
    let mut ordered: Vec<(f64, Coord<f64>)> = crossings
        .iter()
        .filter_map(|&c| probe.line_locate_point(&Point::from(c)).map(|t| (t, c)))
        .collect();
    if ordered.len() < 2 {
        return None;
    }
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
    Some(LineString::new(vec![ordered[0].1, ordered[ordered.len() - 1].1]))
}

/// Clip the probe against the filled polygon area, keeping the single longest
/// piece when the intersection is disjoint (concave footprints). Shorter
/// fragments are treated as boundary-irregularity artifacts.
fn area_clip(probe: &LineString<f64>, polygon: &Polygon<f64>) -> Option<LineString<f64>> {
    let clipped = polygon.clip(&MultiLineString::new(vec![probe.clone()]), false);
    let mut longest: Option<(f64, LineString<f64>)> = None;
    for piece in clipped.0 {
        let len = Euclidean.length(&piece);
        if longest.as_ref().map_or(true, |(best, _)| len > *best) {
            longest = Some((len, piece));
        }
    }
    longest.map(|(_, piece)| piece)
}
