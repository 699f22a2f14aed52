// Sat Oct 17 2026 - Alex

use crate::pattern::{DatabaseError, Signature};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseEntry {
    name: String,
    signature: Signature,
    ep_only: bool,
    line: usize,
}

impl DatabaseEntry {
    pub fn new(name: &str, signature: Signature) -> Self {
        Self {
            name: name.to_string(),
            signature,
            ep_only: false,
            line: 0,
        }
    }

    pub fn with_ep_only(mut self, ep_only: bool) -> Self {
        self.ep_only = ep_only;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Informational only; entry points are never located here.
    pub fn ep_only(&self) -> bool {
        self.ep_only
    }

    /// Line of the `[section]` header, 0 for entries built in code.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Named signatures in PEiD `userdb.txt` layout:
///
/// ```text
/// ; comment
/// [UPX 0.89.6 - 1.02]
/// signature = 60 E8 00 00 00 00 58 83 E8 3D
/// ep_only = true
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignatureDatabase {
    entries: Vec<DatabaseEntry>,
}

struct PendingEntry {
    name: String,
    line: usize,
    signature: Option<(String, usize)>,
    ep_only: bool,
}

impl SignatureDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: DatabaseEntry) {
        self.entries.push(entry);
    }

    /// Parses the whole text and fails on the first bad entry.
    pub fn parse(text: &str) -> Result<Self, DatabaseError> {
        Self::parse_with(text, false)
    }

    /// Like [`parse`](Self::parse) but skips bad entries with a warning.
    /// Lines that belong to no section are still errors.
    pub fn parse_lenient(text: &str) -> Result<Self, DatabaseError> {
        Self::parse_with(text, true)
    }

    fn parse_with(text: &str, lenient: bool) -> Result<Self, DatabaseError> {
        let mut db = Self::new();
        let mut pending: Option<PendingEntry> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if let Some(name) = trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                if let Some(done) = pending.take() {
                    db.finish(done, lenient)?;
                }
                pending = Some(PendingEntry {
                    name: name.trim().to_string(),
                    line,
                    signature: None,
                    ep_only: false,
                });
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(DatabaseError::UnexpectedLine {
                    line,
                    content: trimmed.to_string(),
                });
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            let Some(entry) = pending.as_mut() else {
                return Err(DatabaseError::OutsideSection { line, key });
            };

            match key.as_str() {
                "signature" => entry.signature = Some((value.to_string(), line)),
                "ep_only" => match value.to_ascii_lowercase().as_str() {
                    "true" => entry.ep_only = true,
                    "false" => entry.ep_only = false,
                    _ => {
                        let err = DatabaseError::InvalidEpOnly {
                            line,
                            value: value.to_string(),
                        };
                        if !lenient {
                            return Err(err);
                        }
                        log::warn!("{}, treating as false", err);
                        entry.ep_only = false;
                    }
                },
                _ => log::debug!("Line {}: ignoring key '{}'", line, key),
            }
        }

        if let Some(done) = pending.take() {
            db.finish(done, lenient)?;
        }

        log::debug!("Parsed signature database with {} entries", db.len());
        Ok(db)
    }

    fn finish(&mut self, pending: PendingEntry, lenient: bool) -> Result<(), DatabaseError> {
        let result = match pending.signature {
            None => Err(DatabaseError::MissingSignature {
                name: pending.name.clone(),
                line: pending.line,
            }),
            Some((text, sig_line)) => Signature::from_text(&text).map_err(|source| DatabaseError::Signature {
                name: pending.name.clone(),
                line: sig_line,
                source,
            }),
        };

        match result {
            Ok(signature) => {
                self.entries.push(DatabaseEntry {
                    name: pending.name,
                    signature,
                    ep_only: pending.ep_only,
                    line: pending.line,
                });
                Ok(())
            }
            Err(e) if lenient => {
                log::warn!("Skipping entry: {}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn entries(&self) -> &[DatabaseEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatabaseEntry> {
        self.entries.iter()
    }

    /// First entry with this name.
    pub fn get(&self, name: &str) -> Option<&DatabaseEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
