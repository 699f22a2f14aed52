// Sat Oct 17 2026 - Alex

use super::args::{parse_hex_bytes, Args, Command, DbArgs, FindArgs, InspectArgs, MaskedArgs, ScanTarget};
use crate::config::{Config, OutputFormat};
use crate::output::{ReportGenerator, ScanReport, SignatureResult};
use crate::pattern::{find, find_all, Signature, SignatureDatabase, SignatureScanner};
use crate::utils::logging::{self, ScanTimer};
use anyhow::{bail, Context};
use colored::Colorize;
use std::fs;
use std::io::{self, Read};

pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        if let Some(path) = &args.config {
            self.config = Config::load(path).with_context(|| format!("Failed to load config {:?}", path))?;
        }
        self.apply_overrides(&args)?;
        self.setup_logging(&args);

        if !self.config.color {
            colored::control::set_override(false);
        }

        match args.command {
            Command::Find(find_args) => self.handle_find(find_args),
            Command::Masked(masked_args) => self.handle_masked(masked_args),
            Command::Db(db_args) => self.handle_db(db_args),
            Command::Inspect(inspect_args) => self.handle_inspect(inspect_args),
        }
    }

    fn apply_overrides(&mut self, args: &Args) -> anyhow::Result<()> {
        if let Some(level) = &args.log_level {
            self.config.log_level = level.clone();
        }
        if args.no_color {
            self.config.color = false;
        }
        if args.json {
            self.config.output_format = OutputFormat::Json;
        }
        self.config.validate()?;
        Ok(())
    }

    fn setup_logging(&self, args: &Args) {
        let base = logging::level_from_str(&self.config.log_level);
        logging::init_logger(logging::level_from_verbosity(base, args.verbose));
    }

    fn handle_find(&self, args: FindArgs) -> anyhow::Result<()> {
        args.target.validate().map_err(|e| anyhow::anyhow!(e))?;

        let signature = Signature::from_text_with_offset(&args.signature, args.offset)
            .with_context(|| format!("Invalid signature '{}'", args.signature))?;

        self.scan_single("signature", &signature, &args.target)
    }

    fn handle_masked(&self, args: MaskedArgs) -> anyhow::Result<()> {
        args.target.validate().map_err(|e| anyhow::anyhow!(e))?;

        let bytes = parse_hex_bytes(&args.bytes).map_err(|e| anyhow::anyhow!(e))?;
        let signature = Signature::from_bytes_and_mask_with_offset(&bytes, &args.mask, args.offset)
            .context("Invalid pattern/mask pair")?;

        self.scan_single("pattern", &signature, &args.target)
    }

    fn scan_single(&self, name: &str, signature: &Signature, target: &ScanTarget) -> anyhow::Result<()> {
        let region = read_region(target)?;
        let mut report = ScanReport::new(&target.source_name(), region.len());

        let positions: Vec<isize> = {
            let _timer = ScanTimer::new("scan", region.len());
            if target.all {
                let limit = target.max_matches.or(self.config.max_matches).unwrap_or(usize::MAX);
                find_all(&region, signature).take(limit).collect()
            } else {
                find(&region, signature).into_iter().collect()
            }
        };

        report.push(SignatureResult::new(name, signature, positions, &region));
        self.emit(&report)
    }

    fn handle_db(&self, args: DbArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let text = fs::read_to_string(&args.database)
            .with_context(|| format!("Failed to read database {:?}", args.database))?;
        let database = if args.lenient || self.config.lenient_database {
            SignatureDatabase::parse_lenient(&text)?
        } else {
            SignatureDatabase::parse(&text)?
        };
        if database.is_empty() {
            bail!("Database {:?} contains no usable signatures", args.database);
        }
        log::info!("Loaded {} signature(s) from {:?}", database.len(), args.database);

        let region = read_region(&args.target)?;
        let mut config = self.config.clone();
        if args.sequential {
            config.parallel = false;
        }
        if args.target.max_matches.is_some() {
            config.max_matches = args.target.max_matches;
        }
        let scanner = SignatureScanner::from_config(&config);

        let hits = {
            let _timer = ScanTimer::new("database scan", region.len());
            if args.target.all {
                scanner.all_hits(&region, &database)
            } else {
                scanner.first_hits(&region, &database)
            }
        };

        let mut report = ScanReport::new(&args.target.source_name(), region.len());
        for hit in hits {
            let entry = &database.entries()[hit.index];
            report.push(SignatureResult::new(&hit.name, entry.signature(), hit.positions, &region));
        }
        self.emit(&report)
    }

    fn handle_inspect(&self, args: InspectArgs) -> anyhow::Result<()> {
        let signature = Signature::from_text(&args.signature)
            .with_context(|| format!("Invalid signature '{}'", args.signature))?;

        if self.config.output_format == OutputFormat::Json {
            let value = serde_json::json!({
                "signature": signature.to_string(),
                "mask": signature.mask_string(),
                "length": signature.len(),
                "anchor_index": signature.anchor_index(),
                "anchor_byte": format!("{:02X}", signature.anchor_byte()),
                "exact": signature.exact_count(),
                "wildcards": signature.wildcard_count(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("{} {}", "Signature:".cyan(), signature);
        println!("{} {}", "Mask:     ".cyan(), signature.mask_string());
        println!("{} {}", "Length:   ".cyan(), signature.len());
        println!(
            "{} {} (0x{:02X})",
            "Anchor:   ".cyan(),
            signature.anchor_index(),
            signature.anchor_byte()
        );
        println!(
            "{} {} exact, {} wildcard",
            "Bytes:    ".cyan(),
            signature.exact_count(),
            signature.wildcard_count()
        );
        Ok(())
    }

    fn emit(&self, report: &ScanReport) -> anyhow::Result<()> {
        let rendered = ReportGenerator::new(self.config.output_format).render(report)?;
        print!("{}", rendered);
        if self.config.output_format == OutputFormat::Json {
            println!();
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn read_region(target: &ScanTarget) -> anyhow::Result<Vec<u8>> {
    let region = match &target.input {
        Some(path) => fs::read(path).with_context(|| format!("Failed to read {:?}", path))?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };
    log::debug!("Read {} bytes from {}", region.len(), target.source_name());
    Ok(region)
}
