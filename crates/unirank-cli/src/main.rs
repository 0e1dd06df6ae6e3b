mod commands;
mod observability;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::scrape::ScrapeArgs;

#[derive(Parser)]
#[command(
    name = "unirank",
    version,
    about = "Scrape university ranking tables into one spreadsheet per rank type"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one rank type for several years and write an xlsx workbook
    Scrape(ScrapeArgs),
    /// Extract and type the ranking table of a saved HTML page
    Parse {
        /// Path to a saved, rendered ranking page
        html_file: PathBuf,

        /// Rank type code (e.g. bcur); inferred from the column count if omitted
        #[arg(short, long)]
        rank_type: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List the known rank types
    RankTypes,
    /// Summarise a workbook written by `unirank scrape`
    Inspect {
        /// Path to the xlsx workbook
        workbook: PathBuf,

        /// Rows to show per sheet
        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape(args) => commands::scrape::run(args),
        Commands::Parse {
            html_file,
            rank_type,
            output,
        } => commands::parse::run(html_file, rank_type.as_deref(), &output),
        Commands::RankTypes => commands::rank_types::list(),
        Commands::Inspect { workbook, rows } => commands::inspect::run(&workbook, rows),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
