//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{TallyError, TallyResult};
use crate::export::{export_full_json, export_transactions_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Csv {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export everything to JSON
    Json {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> TallyResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let writer = open_output(output.as_deref())?;
            let count = export_transactions_csv(storage, writer)?;
            if let Some(path) = output {
                println!("Exported {} transactions to: {}", count, path.display());
            }
        }

        ExportCommands::Json { output, compact } => {
            let mut writer = open_output(output.as_deref())?;
            export_full_json(storage, &mut writer, !compact)?;
            writeln!(writer).map_err(|e| TallyError::Export(e.to_string()))?;
            writer.flush().map_err(|e| TallyError::Export(e.to_string()))?;
            if let Some(path) = output {
                println!("Exported all data to: {}", path.display());
            }
        }
    }

    Ok(())
}

fn open_output(path: Option<&Path>) -> TallyResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
