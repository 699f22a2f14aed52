// Sat Oct 17 2026 - Alex

pub mod report;

pub use report::{ReportGenerator, ScanReport, SignatureResult};
