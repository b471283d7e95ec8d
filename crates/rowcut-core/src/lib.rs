//! Rowcut Core - Transect derivation pipeline
//!
//! Derives perpendicular "transect" cross-sections across elongated polygonal
//! footprints (road beds, sidewalks) for downstream width profiling. The
//! pipeline extracts a longitudinal axis from each polygon's minimum rotated
//! rectangle, samples it at a fixed arc-length interval, builds a perpendicular
//! probe at every sample point, and clips each probe back to the polygon.

pub mod axis;
pub mod clip;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod probe;
pub mod sample;

pub use error::{Result, RowcutError};
pub use models::{Crs, SamplePoint, Tangent};
pub use pipeline::{build_transects, run, PolygonTransects, TransectParams, TransectSet};
