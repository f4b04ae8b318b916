use rollcall_core::config::{load_config, CleanOptions};
use rollcall_core::error::RollcallError;
use rollcall_core::export::{export_outcome, outcome_to_json};
use rollcall_core::mapping::JsonFileStore;
use std::path::PathBuf;

use crate::output;

pub struct CleanArgs {
    pub input_file: PathBuf,
    pub mapping: PathBuf,
    pub config: Option<PathBuf>,
    pub min_key_length: Option<usize>,
    pub keep_sequence_columns: bool,
    pub out: Option<PathBuf>,
    pub masked: bool,
    pub json: Option<PathBuf>,
    pub output: String,
}

pub fn run(args: CleanArgs) -> Result<(), RollcallError> {
    // Flags override the options file
    let mut options = match &args.config {
        Some(path) => load_config(path)?,
        None => CleanOptions::default(),
    };
    if let Some(n) = args.min_key_length {
        options.min_key_length = n;
    }
    if args.keep_sequence_columns {
        options.drop_sequence_columns = false;
    }

    let store = JsonFileStore::new(args.mapping);
    let outcome = rollcall_core::clean_file(&args.input_file, &store, &options)?;

    if let Some(path) = &args.out {
        export_outcome(&outcome, args.masked, path)?;
        eprintln!(
            "Wrote {} cleaned sheet(s) and {} trash sheet(s) to {}{}",
            outcome.cleaned.len(),
            outcome.trash.len(),
            path.display(),
            if args.masked { " (masked)" } else { "" }
        );
    }

    if let Some(path) = &args.json {
        std::fs::write(path, outcome_to_json(&outcome)?)?;
        eprintln!("Outcome written to {}", path.display());
    }

    match args.output.as_str() {
        "json" => output::json::print(&outcome)?,
        _ => output::table::print_summary(&outcome),
    }

    Ok(())
}
