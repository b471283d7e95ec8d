//! Layer writer: GeoJSON layers with optional Shapefile export.

use std::fs;
use std::path::Path;

use geo::LineString;
use geojson::{Feature, FeatureCollection, GeoJson};

use rowcut_core::error::{Result, RowcutError};
use rowcut_core::models::Crs;

/// A named collection of line features sharing one CRS.
#[derive(Debug, Clone)]
pub struct LineLayer {
    pub name: String,
    pub crs: Crs,
    pub lines: Vec<LineString<f64>>,
}

impl LineLayer {
    pub fn new(name: impl Into<String>, crs: Crs, lines: Vec<LineString<f64>>) -> Self {
        Self { name: name.into(), crs, lines }
    }
}

/// Write each layer to `<out_dir>/<name>.geojson`, optionally with an ESRI
/// Shapefile alongside. The directory is created if needed and existing
/// layer files are replaced.
pub fn write_layers(out_dir: &Path, layers: &[LineLayer], export_shp: bool) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    for layer in layers {
        write_geojson_layer(&out_dir.join(format!("{}.geojson", layer.name)), layer)?;
        if export_shp {
            write_shapefile_layer(&out_dir.join(format!("{}.shp", layer.name)), layer)?;
        }
        tracing::info!(layer = %layer.name, features = layer.lines.len(), "wrote layer");
    }
    Ok(())
}

/// Serialize the layer as a GeoJSON FeatureCollection carrying a named `crs`
/// foreign member.
pub fn write_geojson_layer(path: &Path, layer: &LineLayer) -> Result<()> {
    let features = layer
        .lines
        .iter()
        .map(|line| Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(line))),
            id: None,
            properties: None,
            foreign_members: None,
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(crs_member(&layer.crs)),
    };

    fs::write(path, GeoJson::FeatureCollection(collection).to_string())?;
    Ok(())
}

fn crs_member(crs: &Crs) -> serde_json::Map<String, serde_json::Value> {
    let mut members = serde_json::Map::new();
    members.insert(
        "crs".to_string(),
        serde_json::json!({
            "type": "name",
            "properties": { "name": format!("EPSG:{}", crs.epsg) }
        }),
    );
    members
}

/// Write the layer as a Shapefile polyline layer with a single numeric `id`
/// attribute. Lines with fewer than two vertices cannot be represented and
/// are skipped.
pub fn write_shapefile_layer(path: &Path, layer: &LineLayer) -> Result<()> {
    use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};

    let field_name = FieldName::try_from("id").map_err(|e| RowcutError::FormatError {
        format: "Shapefile".to_string(),
        message: format!("invalid field name: {}", e),
    })?;
    let table = TableWriterBuilder::new().add_numeric_field(field_name, 10, 0);

    let mut writer =
        shapefile::Writer::from_path(path, table).map_err(|e| RowcutError::FormatError {
            format: "Shapefile".to_string(),
            message: format!("Failed to create Shapefile: {}", e),
        })?;

    for (idx, line) in layer.lines.iter().enumerate() {
        if line.0.len() < 2 {
            tracing::debug!(idx, "skipping degenerate line");
            continue;
        }
        let points: Vec<shapefile::Point> =
            line.coords().map(|c| shapefile::Point::new(c.x, c.y)).collect();
        let polyline = shapefile::Polyline::new(points);

        let mut record = Record::default();
        record.insert("id".to_string(), FieldValue::Numeric(Some(idx as f64)));

        writer.write_shape_and_record(&polyline, &record).map_err(|e| {
            RowcutError::FormatError {
                format: "Shapefile".to_string(),
                message: format!("record {}: {}", idx, e),
            }
        })?;
    }
    Ok(())
}
