use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use texlog::{parse_log, FileMatch, ParseOptions};

#[derive(Parser)]
#[command(name = "texlog")]
#[command(about = "LaTeX build log tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a LaTeX .log file and emit structured diagnostics as JSON
    Parse {
        /// Path to the .log file
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Drop diagnostics whose raw text repeats an earlier one
        #[arg(long)]
        ignore_duplicates: bool,
        /// Accept as file opens only names starting with one of these
        /// patterns (default: any path-shaped token)
        #[arg(long = "base-name", value_name = "PATTERN")]
        base_names: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            path,
            ignore_duplicates,
            base_names,
        } => {
            let content = fs::read_to_string(&path)?;
            let file_match = if base_names.is_empty() {
                FileMatch::PathShaped
            } else {
                FileMatch::BaseNames(base_names)
            };
            let options = ParseOptions {
                file_match,
                ignore_duplicates,
            };
            let report = parse_log(&content, &options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
