mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "doc-diff")]
#[command(about = "Compare workbooks and text documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two documents of the same kind")]
    Diff {
        #[arg(help = "Path to the old/base document")]
        old: String,
        #[arg(help = "Path to the new/changed document")]
        new: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, help = "Pair sheets by position instead of by name")]
        by_position: bool,
        #[arg(long, help = "Remap columns by matching header text")]
        match_columns: bool,
        #[arg(long, short, help = "Quiet mode: only show the summary")]
        quiet: bool,
    },
    #[command(about = "Show information about a document")]
    Info {
        #[arg(help = "Path to the document")]
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff {
            old,
            new,
            format,
            by_position,
            match_columns,
            quiet,
        } => commands::diff::run(&old, &new, format, by_position, match_columns, quiet),
        Commands::Info { path } => commands::info::run(&path),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
