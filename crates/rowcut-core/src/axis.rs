//! Axis extraction from a polygon's minimum rotated rectangle.

use geo::{coord, Coord, Distance, Euclidean, LineString, MinimumRotatedRect, Point, Polygon};

use crate::error::{Result, RowcutError};

/// Derive a representative longitudinal axis for an elongated polygon.
///
/// The axis runs along the long dimension of the polygon's minimum rotated
/// rectangle: the longest rectangle edge is located (ties resolved to the
/// first edge in ring order) and the axis connects the midpoints of the two
/// short edges flanking it, so samples land on the rectangle's midline. A
/// near-zero-area polygon yields a near-zero-length axis, which the sampler
/// treats as a terminal case.
pub fn extract_axis(polygon: &Polygon<f64>) -> Result<LineString<f64>> {
    let rect = polygon.minimum_rotated_rect().ok_or_else(|| RowcutError::DegenerateGeometry {
        reason: "minimum rotated rectangle could not be computed".to_string(),
    })?;

    // Closed ring: four corners plus the repeated first vertex.
    let ring: &[Coord<f64>] = &rect.exterior().0;
    if ring.len() < 5 {
        return Err(RowcutError::DegenerateGeometry {
            reason: format!("oriented rectangle ring has {} vertices", ring.len()),
        });
    }
    let quad = &ring[..4];

    let mut longest = 0usize;
    let mut longest_len = f64::NEG_INFINITY;
    for i in 0..4 {
        let len = Euclidean.distance(Point::from(quad[i]), Point::from(quad[(i + 1) % 4]));
        if len > longest_len {
            longest = i;
            longest_len = len;
        }
    }

    let a = quad[longest];
    let b = quad[(longest + 1) % 4];
    let c = quad[(longest + 2) % 4];
    let d = quad[(longest + 3) % 4];

    // Midline along the long direction: the midpoints of the two short edges
    // flanking the longest edge (d-a behind it, b-c ahead of it).
    let start = coord! { x: (a.x + d.x) / 2.0, y: (a.y + d.y) / 2.0 };
    let end = coord! { x: (b.x + c.x) / 2.0, y: (b.y + c.y) / 2.0 };
    Ok(LineString::new(vec![start, end]))
}
