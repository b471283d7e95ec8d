//! Rowcut IO - Vector I/O collaborator for the transect pipeline
//!
//! Reads polygon feature collections (GeoJSON, ESRI Shapefile) along with
//! their coordinate reference system, normalizes them into a single planar
//! target system, and writes named line layers back out. The geometric
//! pipeline itself lives in `rowcut-core` and never touches files.

pub mod formats;
pub mod transform;
pub mod writer;

pub use formats::{read_dataset, FormatReader, FormatRegistry, VectorDataset};
pub use transform::normalize_dataset;
pub use writer::{write_layers, LineLayer};
