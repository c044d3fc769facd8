//! Datasets command implementation

use crate::cli::Cli;
use crate::config_loader::{load_catalog, load_config};
use crate::output::OutputWriter;
use crate::output_types::{DatasetInfo, DatasetsOutput};
use anyhow::Result;
use guardcard_core::config::CliConfigOverrides;

pub fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let config = load_config(cli, CliConfigOverrides::default())?;
    let catalog = load_catalog(&config)?;

    let datasets: Vec<DatasetInfo> = catalog
        .datasets()
        .into_iter()
        .map(|d| DatasetInfo {
            name: d.name().to_string(),
            kind: d.kind(),
            facility_count: d.len(),
        })
        .collect();

    if output.is_json() {
        return output.result(DatasetsOutput {
            datasets,
            quiz_categories: catalog.quizzes().len(),
        });
    }

    output.section("Datasets");
    match &config.data_dir.value {
        Some(dir) => output.kv("Source", dir.display()),
        None => output.kv("Source", "bundled"),
    }
    output.table(datasets);
    output.kv("Quiz categories", catalog.quizzes().len());

    Ok(())
}
