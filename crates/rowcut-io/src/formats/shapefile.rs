//! ESRI Shapefile format reader implementation
//!
//! Shapefiles consist of multiple component files (.shp, .shx, .dbf, .prj).
//! The CRS comes from the optional .prj sidecar; without one the dataset is
//! treated as undeclared and later assumed to be in the target system.

use std::fs;
use std::path::Path;

use shapefile::{Reader as ShapefileReader, Shape};

use rowcut_core::error::{Result, RowcutError};
use rowcut_core::models::Crs;

use crate::formats::{dataset_name, FormatReader, VectorDataset};

/// Shapefile format reader
pub struct ShapefileFormatReader;

impl FormatReader for ShapefileFormatReader {
    fn read(&self, path: &Path) -> Result<VectorDataset> {
        let mut reader =
            ShapefileReader::from_path(path).map_err(|e| RowcutError::FormatError {
                format: "Shapefile".to_string(),
                message: format!("Failed to open Shapefile: {}", e),
            })?;

        let crs = extract_crs(path)?;

        let mut geometries = Vec::new();
        for (idx, shape_record) in reader.iter_shapes_and_records().enumerate() {
            let (shape, _record) = shape_record.map_err(|e| RowcutError::FormatError {
                format: "Shapefile".to_string(),
                message: format!("record {}: {}", idx, e),
            })?;
            match convert_shape(shape) {
                Some(geometry) => geometries.push(geometry),
                None => tracing::debug!(idx, "null or unsupported shape, skipping"),
            }
        }

        Ok(VectorDataset { name: dataset_name(path), crs, geometries })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["shp"]
    }

    fn format_name(&self) -> &str {
        "Shapefile"
    }
}

/// Convert a shapefile shape to a geo geometry. NullShape and shape kinds the
/// pipeline cannot use yield `None` and are skipped by the caller.
fn convert_shape(shape: Shape) -> Option<geo::Geometry<f64>> {
    match shape {
        Shape::Polygon(polygon) => geo::MultiPolygon::<f64>::try_from(polygon)
            .ok()
            .map(geo::Geometry::MultiPolygon),
        Shape::Polyline(polyline) => geo::MultiLineString::<f64>::try_from(polyline)
            .ok()
            .map(geo::Geometry::MultiLineString),
        Shape::Point(point) => geo::Point::<f64>::try_from(point).ok().map(geo::Geometry::Point),
        _ => None,
    }
}

/// CRS from the sidecar .prj, when present and carrying an EPSG authority.
fn extract_crs(path: &Path) -> Result<Option<Crs>> {
    let prj_path = path.with_extension("prj");
    if !prj_path.exists() {
        return Ok(None);
    }

    let wkt = fs::read_to_string(&prj_path).map_err(|e| RowcutError::FormatError {
        format: "Shapefile".to_string(),
        message: format!("Failed to read .prj file: {}", e),
    })?;

    Ok(parse_epsg_from_wkt(&wkt).map(Crs::epsg))
}

/// Pull the outermost AUTHORITY["EPSG","<code>"] clause out of WKT. The last
/// occurrence belongs to the whole CRS rather than a nested datum or axis.
fn parse_epsg_from_wkt(wkt: &str) -> Option<u32> {
    let marker = "AUTHORITY[\"EPSG\",\"";
    let start = wkt.rfind(marker)? + marker.len();
    let rest = &wkt[start..];
    let end = rest.find('"')?;
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_epsg_from_wkt() {
        let wkt = r#"PROJCS["NAD83 / New York Long Island (ftUS)",GEOGCS["NAD83",DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101],AUTHORITY["EPSG","6269"]],AUTHORITY["EPSG","4269"]],UNIT["US survey foot",0.3048006096012192],AUTHORITY["EPSG","2263"]]"#;
        assert_eq!(parse_epsg_from_wkt(wkt), Some(2263));
    }

    #[test]
    fn test_wkt_without_authority_yields_none() {
        assert_eq!(parse_epsg_from_wkt(r#"PROJCS["Local",UNIT["metre",1]]"#), None);
    }

    #[test]
    fn test_missing_prj_is_undeclared() {
        let temp_dir = tempfile::tempdir().unwrap();
        let crs = extract_crs(&temp_dir.path().join("layer.shp")).unwrap();
        assert_eq!(crs, None);
    }
}
