// Sat Oct 17 2026 - Alex

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sigscan")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Find wildcard byte signatures in binary data", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan for a textual signature such as "55 8B EC ?? ?? C3"
    Find(FindArgs),
    /// Scan for raw bytes with an x/? mask
    Masked(MaskedArgs),
    /// Scan for every entry of a PEiD-style signature database
    Db(DbArgs),
    /// Print the normalized form of a signature
    Inspect(InspectArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanTarget {
    /// File to scan, stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report every match instead of the first
    #[arg(short, long)]
    pub all: bool,

    #[arg(long)]
    pub max_matches: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct FindArgs {
    pub signature: String,

    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub offset: isize,

    #[command(flatten)]
    pub target: ScanTarget,
}

#[derive(Parser, Debug)]
pub struct MaskedArgs {
    /// Pattern bytes as hex, e.g. "55 00 C3" or "5500C3"
    #[arg(short, long)]
    pub bytes: String,

    #[arg(short, long)]
    pub mask: String,

    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub offset: isize,

    #[command(flatten)]
    pub target: ScanTarget,
}

#[derive(Parser, Debug)]
pub struct DbArgs {
    #[arg(short, long)]
    pub database: PathBuf,

    #[arg(long)]
    pub lenient: bool,

    #[arg(long)]
    pub sequential: bool,

    #[command(flatten)]
    pub target: ScanTarget,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub signature: String,
}

impl ScanTarget {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_matches == Some(0) {
            return Err("--max-matches must be at least 1".to_string());
        }
        if self.max_matches.is_some() && !self.all {
            return Err("--max-matches only applies together with --all".to_string());
        }
        if let Some(input) = &self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {:?}", input));
            }
        }
        Ok(())
    }

    pub fn source_name(&self) -> String {
        self.input
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".to_string())
    }
}

impl DbArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.database.exists() {
            return Err(format!("Database file does not exist: {:?}", self.database));
        }
        self.target.validate()
    }
}

/// Parses "55 00 C3", "5500C3" or "0x55 0x00 0xC3" into bytes.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = s
        .split_whitespace()
        .map(|part| part.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();

    if cleaned.len() % 2 != 0 || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid hex byte string: '{}'", s));
    }

    (0..cleaned.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&cleaned[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}
