//! GeoJSON format reader implementation

use std::fs;
use std::path::Path;

use geojson::GeoJson;
use rowcut_core::error::{Result, RowcutError};
use rowcut_core::models::Crs;

use crate::formats::{dataset_name, FormatReader, VectorDataset};

/// GeoJSON format reader
pub struct GeoJsonReader;

impl FormatReader for GeoJsonReader {
    fn read(&self, path: &Path) -> Result<VectorDataset> {
        let content = fs::read_to_string(path)?;

        let geojson: GeoJson = content.parse().map_err(|e| RowcutError::FormatError {
            format: "GeoJSON".to_string(),
            message: format!("Failed to parse GeoJSON: {}", e),
        })?;

        let (geometries, crs) = extract_geometries_and_crs(&geojson)?;

        Ok(VectorDataset { name: dataset_name(path), crs, geometries })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json", "geojson"]
    }

    fn format_name(&self) -> &str {
        "GeoJSON"
    }
}

fn extract_geometries_and_crs(
    geojson: &GeoJson,
) -> Result<(Vec<geo::Geometry<f64>>, Option<Crs>)> {
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            let mut geometries = Vec::with_capacity(fc.features.len());
            for (idx, feature) in fc.features.iter().enumerate() {
                match &feature.geometry {
                    Some(geometry) => geometries.push(convert_geometry(geometry, idx)?),
                    None => tracing::debug!(idx, "feature has no geometry, skipping"),
                }
            }

            let crs = fc
                .foreign_members
                .as_ref()
                .and_then(|fm| fm.get("crs"))
                .and_then(extract_epsg_from_crs)
                .map(Crs::epsg);

            Ok((geometries, crs))
        }
        GeoJson::Feature(feature) => {
            let geometries = match &feature.geometry {
                Some(geometry) => vec![convert_geometry(geometry, 0)?],
                None => Vec::new(),
            };
            Ok((geometries, None))
        }
        GeoJson::Geometry(geometry) => Ok((vec![convert_geometry(geometry, 0)?], None)),
    }
}

fn convert_geometry(geometry: &geojson::Geometry, idx: usize) -> Result<geo::Geometry<f64>> {
    geo::Geometry::<f64>::try_from(geometry.value.clone()).map_err(|e| {
        RowcutError::FormatError {
            format: "GeoJSON".to_string(),
            message: format!("feature {}: {}", idx, e),
        }
    })
}

/// Extract an EPSG code from a `crs` foreign member.
/// Handles "EPSG:2263" and "urn:ogc:def:crs:EPSG::2263" forms.
fn extract_epsg_from_crs(crs: &serde_json::Value) -> Option<u32> {
    let name = crs.get("properties")?.get("name")?.as_str()?;
    name.split(':').next_back()?.parse().ok()
}
