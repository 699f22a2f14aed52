// Sat Oct 17 2026 - Alex

use crate::config::OutputFormat;
use crate::pattern::Signature;
use crate::utils::{format_size, hex_string_spaced, window, Tally};
use colored::Colorize;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct SignatureResult {
    pub name: String,
    pub signature: String,
    pub mask: String,
    pub report_offset: isize,
    pub positions: Vec<isize>,
    /// Matched region bytes for each hit, hex encoded. Taken at the match
    /// start, before `report_offset` is applied.
    pub context: Vec<String>,
}

impl SignatureResult {
    pub fn new(name: &str, signature: &Signature, positions: Vec<isize>, region: &[u8]) -> Self {
        let context = positions
            .iter()
            .map(|&p| {
                let start = p.saturating_sub(signature.report_offset());
                hex_string_spaced(window(region, start, signature.len()))
            })
            .collect();
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
            mask: signature.mask_string(),
            report_offset: signature.report_offset(),
            positions,
            context,
        }
    }

    pub fn is_hit(&self) -> bool {
        !self.positions.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source: String,
    pub region_size: usize,
    pub results: Vec<SignatureResult>,
    pub hit_counts: IndexMap<String, u64>,
}

impl ScanReport {
    pub fn new(source: &str, region_size: usize) -> Self {
        Self {
            source: source.to_string(),
            region_size,
            results: Vec::new(),
            hit_counts: IndexMap::new(),
        }
    }

    pub fn push(&mut self, result: SignatureResult) {
        for _ in &result.positions {
            self.hit_counts.increment(result.name.clone());
        }
        self.results.push(result);
    }

    pub fn total_hits(&self) -> usize {
        self.results.iter().map(|r| r.positions.len()).sum()
    }

    pub fn matched_signatures(&self) -> usize {
        self.results.iter().filter(|r| r.is_hit()).count()
    }
}

pub struct ReportGenerator {
    format: OutputFormat,
    pretty_print: bool,
}

impl ReportGenerator {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty_print: true,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn render(&self, report: &ScanReport) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Json if self.pretty_print => serde_json::to_string_pretty(report),
            OutputFormat::Json => serde_json::to_string(report),
            OutputFormat::Text => Ok(self.render_text(report)),
        }
    }

    fn render_text(&self, report: &ScanReport) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} Scanned {} ({})",
            "[*]".blue(),
            report.source,
            format_size(report.region_size)
        );

        for result in &report.results {
            if result.is_hit() {
                let _ = writeln!(out, "{} {}: {}", "[+]".green(), result.name.bold(), result.signature);
                for (position, context) in result.positions.iter().zip(&result.context) {
                    let _ = writeln!(out, "    {}  {}", format_position(*position).yellow(), context.dimmed());
                }
            } else {
                let _ = writeln!(out, "{} {}: no match", "[-]".red(), result.name);
            }
        }

        let _ = writeln!(
            out,
            "{} {} of {} signature(s) matched, {} hit(s)",
            "[*]".blue(),
            report.matched_signatures(),
            report.results.len(),
            report.total_hits()
        );

        out
    }
}

fn format_position(position: isize) -> String {
    if position < 0 {
        format!("-0x{:08x}", position.unsigned_abs())
    } else {
        format!("0x{:08x}", position)
    }
}
