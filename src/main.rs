//! Apex Trace Studio CLI
//!
//! Rebuilds the nested call tree of an Apex execution log and writes it
//! as JSON, an indented text tree, or a summary.

use anyhow::Result;
use apex_trace_studio::commands::{
    display_schema, display_version, execute_parse, validate_args, validate_trace_file, ParseArgs,
};
use apex_trace_studio::utils::config::DEFAULT_TOP_EVENTS;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Apex Trace Studio - execution log tree reconstruction
#[derive(Parser, Debug)]
#[command(name = "apex-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse an execution log into a span tree
    Parse {
        /// Raw execution log file
        #[arg(short, long, env = "APEX_TRACE_INPUT")]
        input: PathBuf,

        /// Output path for the JSON trace
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the span tree to stdout
        #[arg(long)]
        tree: bool,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Only print subtrees rooted at this base event code (e.g. METHOD)
        #[arg(long)]
        filter: Option<String>,

        /// Deepest tree level to print
        #[arg(long)]
        max_depth: Option<usize>,

        /// Number of event codes listed in the summary
        #[arg(long, default_value_t = DEFAULT_TOP_EVENTS)]
        top: usize,
    },

    /// Validate a trace JSON file
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Parse {
            input,
            output,
            tree,
            summary,
            filter,
            max_depth,
            top,
        } => {
            let args = ParseArgs {
                input,
                output_json: output,
                print_tree: tree,
                print_summary: summary,
                filter,
                max_depth,
                top_events: top,
            };

            validate_args(&args)?;
            execute_parse(args)?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
