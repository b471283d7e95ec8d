//! Pipeline driver: per-polygon reduction over a geometry collection.

use geo::{Euclidean, Geometry, Length, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::axis::extract_axis;
use crate::clip::clip_probe;
use crate::error::{Result, RowcutError};
use crate::probe::build_probe;
use crate::sample::sample;

/// Sampling interval and probe half-length for one dataset, in CRS units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransectParams {
    /// Arc-length spacing between sample points along the axis.
    pub interval: f64,
    /// Half-length of the raw perpendicular probe before clipping.
    pub reach: f64,
}

impl TransectParams {
    pub fn new(interval: f64, reach: f64) -> Self {
        Self { interval, reach }
    }

    /// Reject non-positive or non-finite parameters before any sampling runs.
    pub fn validate(&self) -> Result<()> {
        if !(self.interval > 0.0) {
            return Err(RowcutError::InvalidParameter {
                name: "interval",
                reason: format!("must be positive, got {}", self.interval),
            });
        }
        if !(self.reach > 0.0) {
            return Err(RowcutError::InvalidParameter {
                name: "reach",
                reason: format!("must be positive, got {}", self.reach),
            });
        }
        Ok(())
    }
}

/// Centerline and transects produced from a single polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonTransects {
    pub centerline: LineString<f64>,
    pub transects: Vec<LineString<f64>>,
}

/// A polygon that could not be processed, identified by its position in the
/// input collection.
#[derive(Debug)]
pub struct PolygonFailure {
    pub index: usize,
    pub error: RowcutError,
}

/// Accumulated output of a pipeline run.
#[derive(Debug, Default)]
pub struct TransectSet {
    pub centerlines: Vec<LineString<f64>>,
    pub transects: Vec<LineString<f64>>,
    pub failures: Vec<PolygonFailure>,
}

impl TransectSet {
    fn absorb(&mut self, output: PolygonTransects) {
        self.centerlines.push(output.centerline);
        self.transects.extend(output.transects);
    }
}

/// Run the full chain for one polygon: axis extraction, arc-length sampling,
/// probe construction, and clipping. Zero-length clips are dropped here.
/// Parameters are validated before any sampling runs.
pub fn build_transects(
    polygon: &Polygon<f64>,
    params: &TransectParams,
) -> Result<PolygonTransects> {
    params.validate()?;
    let centerline = extract_axis(polygon)?;
    let samples = sample(&centerline, params.interval);
    let mut transects = Vec::with_capacity(samples.len());
    for sp in samples {
        let raw = build_probe(sp.point, sp.tangent, params.reach);
        if let Some(clipped) = clip_probe(&raw, polygon) {
            if Euclidean.length(&clipped) > 0.0 {
                transects.push(clipped);
            }
        }
    }
    Ok(PolygonTransects { centerline, transects })
}

/// Process a geometry collection, expanding multipolygons and skipping
/// non-polygon geometries without error.
///
/// Each polygon is reduced to its own [`PolygonTransects`] and merged into
/// the set in input order; a failing polygon is recorded by input index and
/// the batch continues. Only parameter precondition violations abort the run.
pub fn run(geometries: &[Geometry<f64>], params: &TransectParams) -> Result<TransectSet> {
    params.validate()?;
    let mut set = TransectSet::default();
    for (index, geometry) in geometries.iter().enumerate() {
        match geometry {
            Geometry::Polygon(polygon) => process_polygon(polygon, index, params, &mut set),
            Geometry::MultiPolygon(multi) => {
                for polygon in &multi.0 {
                    process_polygon(polygon, index, params, &mut set);
                }
            }
            _ => {
                tracing::debug!(index, "skipping non-polygon geometry");
            }
        }
    }
    Ok(set)
}

fn process_polygon(
    polygon: &Polygon<f64>,
    index: usize,
    params: &TransectParams,
    set: &mut TransectSet,
) {
    match build_transects(polygon, params) {
        Ok(output) => set.absorb(output),
        Err(error) => {
            tracing::warn!(index, %error, "polygon failed, continuing batch");
            set.failures.push(PolygonFailure { index, error });
        }
    }
}
