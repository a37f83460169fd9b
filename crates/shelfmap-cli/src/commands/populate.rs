//! Populate command - run the pipeline and export the template.

use std::path::PathBuf;

use colored::Colorize;
use shelfmap::export::{ensure_exportable, export_to_path};
use shelfmap::{Configuration, ExportFormat, PopulationReport, RunFiles, Severity, Shelfmap};

use super::{print_reconciliation, print_table};

/// Base name of the exported file when no output path is given.
const DEFAULT_OUTPUT_STEM: &str = "populated_template";

/// Arguments for the populate command.
pub struct PopulateArgs {
    pub identifiers: PathBuf,
    pub descriptive: PathBuf,
    pub config: PathBuf,
    pub template: Option<PathBuf>,
    pub credits: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub preview: usize,
    pub dry_run: bool,
}

pub fn run(args: PopulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::load(&args.config)?;

    let mut files = RunFiles::new(&args.identifiers, &args.descriptive);
    if let Some(template) = &args.template {
        files = files.with_template(template);
    }
    if let Some(credits) = &args.credits {
        files = files.with_credits(credits);
    }

    let result = Shelfmap::new().run(&files, &config)?;
    let population = &result.population;

    println!(
        "{} {} rows from {}",
        "Populated".cyan().bold(),
        population.output.row_count().to_string().white().bold(),
        result.validation.sources.identifiers.file.white()
    );
    if result.validation.dropped_identifier_rows > 0 {
        println!(
            "  {} identifier row(s) dropped for blank identifier",
            result.validation.dropped_identifier_rows
        );
    }
    println!();

    print_reconciliation(result.validation.reconciliation.as_ref());
    print_findings(population);

    if args.preview > 0 {
        println!("{}", "Preview:".yellow().bold());
        print_table(&population.preview(args.preview));
        println!();
    }

    if args.dry_run {
        println!("{}", "Dry run: nothing written".dimmed());
        return Ok(());
    }

    ensure_exportable(population)?;

    let (output, format) = resolve_output(args.output, args.format);
    export_to_path(&population.output, format, &output)?;

    println!(
        "{} {} ({})",
        "Wrote".green().bold(),
        output.display().to_string().white(),
        format
    );

    Ok(())
}

fn print_findings(population: &PopulationReport) {
    if !population.warnings.is_empty() {
        println!("{}", "Warnings:".yellow().bold());
        for warning in &population.warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
        println!();
    }

    if population.has_errors() {
        println!("{}", "Errors:".red().bold());
        for err in population.errors() {
            let marker = match err.severity() {
                Severity::Fatal => "✗".red().bold(),
                _ => "✗".red(),
            };
            println!("  {} [{}] {}", marker, err.severity().label(), err);
        }
        println!();
    }

    if !population.missing_selections.is_empty() {
        println!("{}", "Missing selections:".yellow().bold());
        for name in &population.missing_selections {
            println!("  • {}", name);
        }
        println!();
    }
}

/// Pick the output path and format from whichever the operator gave.
fn resolve_output(output: Option<PathBuf>, format: Option<ExportFormat>) -> (PathBuf, ExportFormat) {
    match (output, format) {
        (Some(path), Some(format)) => (path, format),
        (Some(path), None) => {
            let format = ExportFormat::from_path(&path).unwrap_or_default();
            (path, format)
        }
        (None, format) => {
            let format = format.unwrap_or_default();
            (
                PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension())),
                format,
            )
        }
    }
}
