//! Search command implementation

use crate::cli::{Cli, SearchArgs};
use crate::config_loader::{load_catalog, load_config};
use crate::output::OutputWriter;
use crate::output_types::{FacilityRow, SearchHit, SearchOutput};
use anyhow::Result;
use guardcard_core::config::CliConfigOverrides;
use guardcard_core::search::filter_by_text;

pub fn execute(cli: &Cli, args: &SearchArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config(cli, CliConfigOverrides::default())?;
    let catalog = load_catalog(&config)?;

    let hits: Vec<SearchHit<'_>> = catalog
        .datasets_of(args.kind.to_kind())
        .into_iter()
        .flat_map(|dataset| {
            filter_by_text(dataset.facilities(), &args.query)
                .into_iter()
                .map(move |facility| SearchHit {
                    dataset: dataset.name(),
                    kind: dataset.kind(),
                    facility,
                })
        })
        .collect();

    if output.is_json() {
        return output.result(SearchOutput { query: args.query.clone(), results: hits });
    }

    output.section(format!("Facilities matching \"{}\"", args.query.trim()));
    if hits.is_empty() {
        output.info("No facilities match your search");
    } else {
        output.table(hits.iter().map(FacilityRow::from).collect());
    }

    Ok(())
}
