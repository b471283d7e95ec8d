//! CRS normalization of datasets into the pipeline's target system.

use geo::MapCoords;
use proj::Proj;

use rowcut_core::error::{Result, RowcutError};
use rowcut_core::models::Crs;

use crate::formats::VectorDataset;

/// Reproject a dataset into `target`.
///
/// A dataset without a declared CRS is assumed to already be in the target
/// system (set-if-missing); one already in the target passes through
/// untouched. Everything else goes through a proj pipeline coordinate by
/// coordinate.
pub fn normalize_dataset(dataset: VectorDataset, target: &Crs) -> Result<VectorDataset> {
    let source = match &dataset.crs {
        None => {
            tracing::debug!(dataset = %dataset.name, "no declared CRS, assuming target");
            return Ok(VectorDataset { crs: Some(target.clone()), ..dataset });
        }
        Some(crs) if crs.epsg == target.epsg => return Ok(dataset),
        Some(crs) => crs.clone(),
    };

    tracing::info!(
        dataset = %dataset.name,
        from = source.epsg,
        to = target.epsg,
        "reprojecting dataset"
    );

    let proj = projection(&source, target)?;
    let geometries = dataset
        .geometries
        .iter()
        .map(|geometry| reproject(geometry, &proj))
        .collect::<Result<Vec<_>>>()?;

    Ok(VectorDataset { name: dataset.name, crs: Some(target.clone()), geometries })
}

fn projection(from: &Crs, to: &Crs) -> Result<Proj> {
    let from_def = format!("EPSG:{}", from.epsg);
    let to_def = format!("EPSG:{}", to.epsg);
    Proj::new_known_crs(&from_def, &to_def, None).map_err(|e| RowcutError::Projection {
        reason: format!("Failed to create projection from {} to {}: {}", from_def, to_def, e),
    })
}

fn reproject(geometry: &geo::Geometry<f64>, proj: &Proj) -> Result<geo::Geometry<f64>> {
    geometry.try_map_coords(|coord| {
        proj.convert((coord.x, coord.y))
            .map(|(x, y)| geo::Coord { x, y })
            .map_err(|e| RowcutError::Projection { reason: format!("Projection failed: {}", e) })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, Point};

    fn dataset(crs: Option<Crs>) -> VectorDataset {
        VectorDataset {
            name: "test".to_string(),
            crs,
            geometries: vec![Geometry::Point(Point::new(0.0, 0.0))],
        }
    }

    #[test]
    fn test_undeclared_crs_is_assumed_target() {
        let target = Crs::epsg(2263);
        let normalized = normalize_dataset(dataset(None), &target).unwrap();
        assert_eq!(normalized.crs, Some(target));
        // Coordinates untouched.
        assert_eq!(normalized.geometries[0], Geometry::Point(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_matching_crs_passes_through() {
        let target = Crs::wgs84();
        let normalized = normalize_dataset(dataset(Some(Crs::wgs84())), &target).unwrap();
        assert_eq!(normalized.geometries[0], Geometry::Point(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_reprojection_to_web_mercator() {
        let target = Crs::epsg(3857);
        let source = VectorDataset {
            name: "test".to_string(),
            crs: Some(Crs::wgs84()),
            geometries: vec![Geometry::Point(Point::new(180.0, 0.0))],
        };

        let normalized = normalize_dataset(source, &target).unwrap();
        let Geometry::Point(p) = &normalized.geometries[0] else {
            panic!("expected a point");
        };
        // The antimeridian lands at half the Web Mercator circumference.
        assert!((p.x() - 20_037_508.34).abs() < 1.0);
        assert!(p.y().abs() < 1.0);
    }
}
