//! Format abstraction layer for multi-format input
//!
//! Each supported vector format implements the `FormatReader` trait, and the
//! `FormatRegistry` dispatches to the right reader from the file extension.

use std::path::Path;

use geo::Geometry;
use rowcut_core::error::{Result, RowcutError};
use rowcut_core::models::Crs;

pub mod geojson;
pub mod shapefile;

/// A parsed vector dataset: geometries plus the CRS they are expressed in.
///
/// `crs` is `None` when the source file declares no reference system; the
/// transform layer then assumes the pipeline's target system.
#[derive(Debug, Clone)]
pub struct VectorDataset {
    pub name: String,
    pub crs: Option<Crs>,
    pub geometries: Vec<Geometry<f64>>,
}

/// Format reader trait that all format implementations must implement
pub trait FormatReader: Send + Sync {
    /// Read a feature collection from the given path.
    fn read(&self, path: &Path) -> Result<VectorDataset>;

    /// Supported file extensions (e.g. ["shp"]).
    fn supported_extensions(&self) -> &[&str];

    /// Human-readable format name (e.g. "Shapefile", "GeoJSON").
    fn format_name(&self) -> &str;
}

/// Central registry for format readers
pub struct FormatRegistry {
    readers: Vec<Box<dyn FormatReader>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self { readers: Vec::new() }
    }

    /// Registry with all built-in readers registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(geojson::GeoJsonReader));
        registry.register(Box::new(shapefile::ShapefileFormatReader));
        registry
    }

    pub fn register(&mut self, reader: Box<dyn FormatReader>) {
        self.readers.push(reader);
    }

    /// Detect format from the file extension and return its reader.
    pub fn detect_format(&self, path: &Path) -> Result<&dyn FormatReader> {
        let extension = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            RowcutError::UnsupportedFormat {
                extension: "none".to_string(),
                supported: self.supported_formats(),
            }
        })?;

        self.readers
            .iter()
            .find(|r| r.supported_extensions().contains(&extension))
            .map(|r| r.as_ref())
            .ok_or_else(|| RowcutError::UnsupportedFormat {
                extension: extension.to_string(),
                supported: self.supported_formats(),
            })
    }

    /// All supported file extensions.
    pub fn supported_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Read a dataset using the reader matching the file extension.
pub fn read_dataset(path: &Path) -> Result<VectorDataset> {
    FormatRegistry::with_defaults().detect_format(path)?.read(path)
}

pub(crate) fn dataset_name(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_format_by_extension() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(
            registry.detect_format(&PathBuf::from("a.geojson")).unwrap().format_name(),
            "GeoJSON"
        );
        assert_eq!(
            registry.detect_format(&PathBuf::from("a.shp")).unwrap().format_name(),
            "Shapefile"
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let registry = FormatRegistry::with_defaults();
        let err = registry.detect_format(&PathBuf::from("a.gpkg")).unwrap_err();
        assert!(matches!(err, RowcutError::UnsupportedFormat { .. }));
    }
}
