//! Command execution: read, normalize, run the pipeline, write layers.

use std::path::Path;

use anyhow::Result;

use rowcut_core::models::Crs;
use rowcut_core::pipeline::{self, TransectParams, TransectSet};
use rowcut_io::formats::{read_dataset, VectorDataset};
use rowcut_io::transform::normalize_dataset;
use rowcut_io::writer::{write_layers, LineLayer};

use crate::cli::Cli;
use crate::output::{self, DatasetCounts};
use crate::progress;

pub fn execute(cli: Cli) -> Result<()> {
    let target = Crs::epsg(cli.target_epsg);

    let road = load_dataset(&cli.roadbed, &target, cli.sample_limit)?;
    let side = load_dataset(&cli.sidewalk, &target, cli.sample_limit)?;

    let road_set =
        process_dataset(&road, TransectParams::new(cli.road_interval, cli.road_reach))?;
    let side_set =
        process_dataset(&side, TransectParams::new(cli.side_interval, cli.side_reach))?;

    let road_counts = DatasetCounts {
        centerlines: road_set.centerlines.len(),
        transects: road_set.transects.len(),
    };
    let side_counts = DatasetCounts {
        centerlines: side_set.centerlines.len(),
        transects: side_set.transects.len(),
    };

    let layers = vec![
        LineLayer::new("roadbed_centerlines", target.clone(), road_set.centerlines),
        LineLayer::new("roadbed_transects", target.clone(), road_set.transects),
        LineLayer::new("sidewalk_centerlines", target.clone(), side_set.centerlines),
        LineLayer::new("sidewalk_transects", target.clone(), side_set.transects),
    ];
    write_layers(&cli.out_dir, &layers, cli.export_shp)?;

    output::print_summary(&road_counts, &side_counts, &cli.out_dir, cli.export_shp);
    Ok(())
}

fn load_dataset(path: &Path, target: &Crs, limit: Option<usize>) -> Result<VectorDataset> {
    let spinner = progress::create_spinner(&format!("Reading {}...", path.display()));
    let mut dataset = normalize_dataset(read_dataset(path)?, target)?;
    if let Some(limit) = limit {
        dataset.geometries.truncate(limit);
    }
    progress::finish_success(
        &spinner,
        &format!("Loaded {} ({} features)", dataset.name, dataset.geometries.len()),
    );
    Ok(dataset)
}

fn process_dataset(dataset: &VectorDataset, params: TransectParams) -> Result<TransectSet> {
    let spinner =
        progress::create_spinner(&format!("Deriving transects for {}...", dataset.name));
    let set = pipeline::run(&dataset.geometries, &params)?;
    progress::finish_success(
        &spinner,
        &format!(
            "{}: {} centerlines, {} transects",
            dataset.name,
            set.centerlines.len(),
            set.transects.len()
        ),
    );
    output::report_failures(&dataset.name, &set.failures);
    Ok(set)
}
