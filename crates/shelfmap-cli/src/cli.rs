//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shelfmap::ExportFormat;

use crate::logging::LogFormat;

/// Shelfmap: populate cataloging templates from identifier and descriptive records
#[derive(Parser)]
#[command(name = "shelfmap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare identifier and descriptive records on their match keys
    Validate {
        /// Identifier records (CSV/TSV/XLSX)
        #[arg(value_name = "IDENTIFIERS")]
        identifiers: PathBuf,

        /// Descriptive metadata records (CSV/TSV/XLSX)
        #[arg(value_name = "DESCRIPTIVE")]
        descriptive: PathBuf,

        /// Run configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Populate the template and export it
    Populate {
        /// Identifier records (CSV/TSV/XLSX)
        #[arg(value_name = "IDENTIFIERS")]
        identifiers: PathBuf,

        /// Descriptive metadata records (CSV/TSV/XLSX)
        #[arg(value_name = "DESCRIPTIVE")]
        descriptive: PathBuf,

        /// Run configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Template whose header row defines the output fields (default: SharedShelf)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Crediting-notes translation table (CSV/TSV/XLSX)
        #[arg(long)]
        credits: Option<PathBuf>,

        /// Output path (default: populated_template.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (xlsx, csv, tsv, json; default: from output extension, else xlsx)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Number of rows to preview
        #[arg(long, default_value = "10")]
        preview: usize,

        /// Populate and report without writing the export
        #[arg(long)]
        dry_run: bool,
    },

    /// List the selections a configuration is still missing
    Check {
        /// Run configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Crediting-notes translation table whose sources should be listed
        #[arg(long)]
        credits: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an empty configuration with the default profile
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "shelfmap.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
