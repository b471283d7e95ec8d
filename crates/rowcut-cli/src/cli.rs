use clap::Parser;
use std::path::PathBuf;

/// Rowcut - centerlines and perpendicular transects for street polygons
#[derive(Parser, Debug)]
#[command(name = "rowcut")]
#[command(about = "Derive centerlines and perpendicular transects from roadbed and sidewalk polygons", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Roadbed polygon dataset (GeoJSON or Shapefile)
    #[arg(long)]
    pub roadbed: PathBuf,

    /// Sidewalk polygon dataset (GeoJSON or Shapefile)
    #[arg(long)]
    pub sidewalk: PathBuf,

    /// Output directory for the generated layers
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Sampling interval along roadbed axes, in CRS units
    #[arg(long, default_value_t = 20.0)]
    pub road_interval: f64,

    /// Sampling interval along sidewalk axes, in CRS units
    #[arg(long, default_value_t = 20.0)]
    pub side_interval: f64,

    /// Probe half-length for roadbed transects, in CRS units
    #[arg(long, default_value_t = 600.0)]
    pub road_reach: f64,

    /// Probe half-length for sidewalk transects, in CRS units
    #[arg(long, default_value_t = 200.0)]
    pub side_reach: f64,

    /// Process only the first N features of each dataset
    #[arg(long)]
    pub sample_limit: Option<usize>,

    /// Target CRS EPSG code (default: NAD83 / New York Long Island ftUS)
    #[arg(long, default_value_t = 2263)]
    pub target_epsg: u32,

    /// Also export each layer as an ESRI Shapefile
    #[arg(long)]
    pub export_shp: bool,
}
