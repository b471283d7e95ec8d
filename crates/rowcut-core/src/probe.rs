//! Perpendicular probe construction.

use geo::{coord, LineString, Point};

use crate::models::Tangent;

/// Build the raw perpendicular probe through `point`, spanning `reach` units
/// on either side along the tangent's normal. The result is unclipped and
/// always has length 2 * reach; `reach > 0` is a driver-checked precondition.
pub fn build_probe(point: Point<f64>, tangent: Tangent, reach: f64) -> LineString<f64> {
    let (nx, ny) = tangent.normal();
    LineString::new(vec![
        coord! { x: point.x() - nx * reach, y: point.y() - ny * reach },
        coord! { x: point.x() + nx * reach, y: point.y() + ny * reach },
    ])
}
