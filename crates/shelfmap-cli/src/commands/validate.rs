//! Validate command - compare identifier and descriptive records.

use std::path::PathBuf;

use colored::Colorize;
use shelfmap::{Configuration, RunFiles, Shelfmap};

use super::print_reconciliation;

pub fn run(
    identifiers: PathBuf,
    descriptive: PathBuf,
    config_path: PathBuf,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::load(&config_path)?;
    let files = RunFiles::new(identifiers, descriptive);

    let result = Shelfmap::new().validate(&files, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} / {}",
        "Validating".cyan().bold(),
        result.sources.identifiers.file.white(),
        result.sources.descriptive.file.white()
    );
    println!();

    println!("{}", "Inputs:".yellow().bold());
    println!(
        "  Identifier records:  {} ({} dropped for blank identifier)",
        (result.sources.identifiers.row_count - result.dropped_identifier_rows)
            .to_string()
            .white()
            .bold(),
        result.dropped_identifier_rows
    );
    println!(
        "  Descriptive records: {}",
        result.sources.descriptive.row_count.to_string().white().bold()
    );
    println!();

    print_reconciliation(result.reconciliation.as_ref());

    Ok(())
}
