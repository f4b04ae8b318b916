mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Clean, deduplicate and mask event registration spreadsheets"
)]
struct Cli {
    /// Company name mapping file (alias -> canonical), created with defaults if missing
    #[arg(
        long,
        global = true,
        env = "ROLLCALL_MAPPING",
        default_value = "data/mapping.json",
        value_name = "FILE"
    )]
    mapping: PathBuf,

    /// Log more to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean every sheet: normalize, remove duplicates, flag missing contact info
    Clean {
        /// Path to an xlsx, xlsm, xls, ods or csv file
        input_file: PathBuf,

        /// Write cleaned sheets and trash sheets to this xlsx file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Mask names, phones and emails in the written workbook
        #[arg(long)]
        masked: bool,

        /// Write the full outcome (tables, trash, summary) as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// JSON options file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the minimum length of an email/phone duplicate key
        #[arg(long, value_name = "N")]
        min_key_length: Option<usize>,

        /// Keep sequence-number columns ("No", "순번") in cleaned sheets
        #[arg(long)]
        keep_sequence_columns: bool,
    },
    /// Show which role each column header was classified as
    Roles {
        /// Path to an xlsx, xlsm, xls, ods or csv file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Write a copy of every sheet with names, phones and emails masked
    Mask {
        /// Path to an xlsx, xlsm, xls, ods or csv file
        input_file: PathBuf,

        /// Destination xlsx file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
    /// List near-identical values for manual review (never merges anything)
    Fuzzy {
        /// Path to an xlsx, xlsm, xls, ods or csv file
        input_file: PathBuf,

        /// Only scan this sheet (default: all sheets)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Column header(s) to scan (default: name and company columns)
        #[arg(long = "column", value_name = "HEADER")]
        columns: Vec<String>,

        /// Minimum similarity between 0.0 and 1.0
        #[arg(short, long)]
        threshold: Option<f64>,

        /// JSON options file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Render a message per cleaned row, e.g. "Hello {name} from {company}"
    Template {
        /// Path to an xlsx, xlsm, xls, ods or csv file
        input_file: PathBuf,

        /// Template text
        #[arg(long, conflicts_with = "template_file", required_unless_present = "template_file")]
        template: Option<String>,

        /// Read the template text from a file
        #[arg(long, value_name = "FILE")]
        template_file: Option<PathBuf>,

        /// Only render this sheet (default: all cleaned sheets)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Write the sheets with their message column to this xlsx file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON options file used for the cleaning pass
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect and edit the company name mapping
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },
}

#[derive(Subcommand)]
enum MappingAction {
    /// List all entries
    List,
    /// Add or replace an entry
    Set {
        /// Spelling found in registration sheets (e.g. "samsungelec")
        alias: String,
        /// Name to use instead (e.g. "Samsung")
        canonical: String,
    },
    /// Remove an entry
    Remove { alias: String },
    /// Print the mapping file location
    Path,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("rollcall={level},rollcall_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mapping = cli.mapping;
    let result = match cli.command {
        Commands::Clean {
            input_file,
            out,
            masked,
            json,
            output,
            config,
            min_key_length,
            keep_sequence_columns,
        } => commands::clean::run(commands::clean::CleanArgs {
            input_file,
            mapping,
            config,
            min_key_length,
            keep_sequence_columns,
            out,
            masked,
            json,
            output,
        }),
        Commands::Roles { input_file, output } => commands::roles::run(input_file, &output),
        Commands::Mask { input_file, out } => commands::mask::run(input_file, out),
        Commands::Fuzzy {
            input_file,
            sheet,
            columns,
            threshold,
            config,
            output,
        } => commands::fuzzy::run(input_file, sheet, columns, threshold, config, &output),
        Commands::Template {
            input_file,
            template,
            template_file,
            sheet,
            out,
            config,
        } => commands::template::run(
            input_file,
            mapping,
            config,
            template,
            template_file,
            sheet,
            out,
        ),
        Commands::Mapping { action } => match action {
            MappingAction::List => commands::mapping::list(&mapping),
            MappingAction::Set { alias, canonical } => {
                commands::mapping::set(&mapping, &alias, &canonical)
            }
            MappingAction::Remove { alias } => commands::mapping::remove(&mapping, &alias),
            MappingAction::Path => commands::mapping::path(&mapping),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
