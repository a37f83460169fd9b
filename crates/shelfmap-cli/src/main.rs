//! Shelfmap CLI - populate cataloging templates from registry and catalog exports.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format));

    let result = match cli.command {
        Commands::Validate {
            identifiers,
            descriptive,
            config,
            json,
        } => commands::validate::run(identifiers, descriptive, config, json),

        Commands::Populate {
            identifiers,
            descriptive,
            config,
            template,
            credits,
            output,
            format,
            preview,
            dry_run,
        } => commands::populate::run(commands::populate::PopulateArgs {
            identifiers,
            descriptive,
            config,
            template,
            credits,
            output,
            format,
            preview,
            dry_run,
        }),

        Commands::Check {
            config,
            credits,
            json,
        } => commands::check::run(config, credits, json),

        Commands::InitConfig { output, force } => commands::init_config::run(output, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
