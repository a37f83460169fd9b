//! Init-config command - write an empty configuration for the operator to fill in.

use std::path::PathBuf;

use colored::Colorize;
use shelfmap::Configuration;

pub fn run(output: PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            output.display()
        )
        .into());
    }

    let config = Configuration::new();
    config.save(&output)?;

    println!(
        "{} {}",
        "Wrote configuration to".green(),
        output.display().to_string().white().bold()
    );
    println!(
        "  {} selections to make; run {} to see which remain",
        config.missing_selections().len(),
        format!("shelfmap check --config {}", output.display()).cyan()
    );

    Ok(())
}
