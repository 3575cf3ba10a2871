//! PokéPredict Control - command line client for the rarity prediction service

use clap::Parser;
use owo_colors::OwoColorize;
use pokectl::cli::Cli;
use pokectl::errors::{EXIT_GENERAL_ERROR, EXIT_USAGE};
use pokectl::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version are not errors
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_USAGE);
        }
    };

    logging::init(cli.verbose);

    let code = match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}  {:#}", "[pokepredict]".bright_red(), e);
            EXIT_GENERAL_ERROR
        }
    };

    std::process::exit(code);
}
