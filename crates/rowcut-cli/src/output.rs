use std::path::Path;

use console::style;
use rowcut_core::pipeline::PolygonFailure;

/// Per-dataset centerline/transect counts for the final summary.
pub struct DatasetCounts {
    pub centerlines: usize,
    pub transects: usize,
}

pub fn report_failures(dataset: &str, failures: &[PolygonFailure]) {
    for failure in failures {
        eprintln!(
            "{} {}: feature {}: {}",
            style("warning:").yellow().bold(),
            dataset,
            failure.index,
            failure.error
        );
    }
}

pub fn print_summary(
    road: &DatasetCounts,
    side: &DatasetCounts,
    out_dir: &Path,
    export_shp: bool,
) {
    println!("{}", style("✅ Done.").green().bold());
    println!(
        "Roadbed centerlines: {} | transects: {}",
        road.centerlines, road.transects
    );
    println!(
        "Sidewalk centerlines: {} | transects: {}",
        side.centerlines, side.transects
    );
    println!("Wrote: {}", out_dir.display());
    if export_shp {
        println!("Also wrote Shapefiles next to the GeoJSON layers.");
    }
}
