//! Receipt and voice capture commands
//!
//! Both commands print what was understood and only store it when `--save`
//! is given.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use super::{parse_category, parse_date};
use crate::config::settings::Settings;
use crate::display::format_candidate;
use crate::error::{TallyError, TallyResult};
use crate::models::ParsedCandidate;
use crate::parse::{ReceiptParser, VoiceParser};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Options shared by `scan` and `voice` for confirming a candidate
#[derive(Args, Debug)]
pub struct SaveOptions {
    /// Store the result as an expense
    #[arg(long)]
    pub save: bool,

    /// Transaction date when saving (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Replace the guessed merchant
    #[arg(short, long)]
    pub merchant: Option<String>,

    /// Replace the guessed category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for `tally scan`
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Text file with one OCR line per line; reads stdin when omitted
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub options: SaveOptions,
}

/// Arguments for `tally voice`
#[derive(Args, Debug)]
pub struct VoiceArgs {
    /// The transcribed phrase, e.g. "I spent 15 dollars at Starbucks"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    #[command(flatten)]
    pub options: SaveOptions,
}

/// Handle `tally scan`
pub fn handle_scan_command(storage: &Storage, settings: &Settings, args: ScanArgs) -> TallyResult<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            TallyError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| TallyError::Io(format!("Failed to read stdin: {}", e)))?;
            buf
        }
    };

    let lines: Vec<&str> = text.lines().collect();
    let candidate = ReceiptParser::new()?.parse(&lines)?;

    confirm(storage, settings, candidate, args.options)
}

/// Handle `tally voice`
pub fn handle_voice_command(storage: &Storage, settings: &Settings, args: VoiceArgs) -> TallyResult<()> {
    let phrase = args.text.join(" ");
    let candidate = VoiceParser::new()?.parse(&phrase)?;

    confirm(storage, settings, candidate, args.options)
}

fn confirm(
    storage: &Storage,
    settings: &Settings,
    mut candidate: ParsedCandidate,
    options: SaveOptions,
) -> TallyResult<()> {
    if let Some(merchant) = options.merchant {
        candidate.merchant = merchant;
    }
    if let Some(category) = options.category {
        candidate.category = parse_category(&category)?;
    }

    print!("{}", format_candidate(&candidate, settings));

    if options.save {
        let date = parse_date(options.date.as_deref())?;
        let txn = TransactionService::new(storage).save_candidate(&candidate, date)?;
        println!("Saved transaction {}", txn.id);
    } else {
        println!("\nRun again with --save to record it.");
    }

    Ok(())
}
