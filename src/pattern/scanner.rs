// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::pattern::{Matches, PatternError, Signature, SignatureDatabase};
use rayon::prelude::*;

/// Raw start of the first match, before `report_offset` is applied.
///
/// Anchor-and-verify: jump to the next occurrence of the anchor byte, check
/// the exact positions from the anchor onward, and on failure resume
/// `len - anchor_index` bytes past the candidate. That skip can step over a
/// match that begins inside the window just examined. Only successful hits
/// resume one byte later, in `find_all`.
///
/// The anchor is never looked for before `anchor_index`, where the leading
/// wildcards would fall outside the region.
pub(crate) fn find_start(region: &[u8], signature: &Signature) -> Option<usize> {
    let anchor_index = signature.anchor_index();
    let anchor_byte = signature.anchor_byte();
    let skip = signature.len() - anchor_index;

    let mut cursor = anchor_index;
    while let Some(rest) = region.get(cursor..) {
        let found = cursor + memchr::memchr(anchor_byte, rest)?;

        if signature.verify_from_anchor(region, found) {
            return Some(found - anchor_index);
        }

        cursor = found + skip;
    }

    None
}

pub(crate) fn report(start: usize, signature: &Signature) -> isize {
    (start as isize).saturating_add(signature.report_offset())
}

/// First match of `signature` in `region`, rebased by its report offset.
///
/// ```
/// use sigscan::{find, Signature};
///
/// let sig = Signature::from_bytes_and_mask(&[0x55, 0x00, 0xC3], "x?x").unwrap();
/// assert_eq!(find(&[0x90, 0x55, 0xFF, 0xC3, 0x00], &sig), Some(1));
/// ```
pub fn find(region: &[u8], signature: &Signature) -> Option<isize> {
    find_start(region, signature).map(|start| report(start, signature))
}

/// Every match, overlapping ones included, in ascending order.
pub fn find_all<'a>(region: &'a [u8], signature: &'a Signature) -> Matches<'a> {
    Matches::new(region, signature)
}

pub fn find_masked(region: &[u8], pattern: &[u8], mask: &str) -> Result<Option<isize>, PatternError> {
    let signature = Signature::from_bytes_and_mask(pattern, mask)?;
    Ok(find(region, &signature))
}

pub fn find_text(region: &[u8], text: &str) -> Result<Option<isize>, PatternError> {
    let signature = Signature::from_text(text)?;
    Ok(find(region, &signature))
}

/// Hits of one database entry, in database order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHits {
    pub index: usize,
    pub name: String,
    pub positions: Vec<isize>,
}

/// Runs every signature of a database over one region.
pub struct SignatureScanner {
    parallel: bool,
    max_matches: Option<usize>,
}

impl SignatureScanner {
    pub fn new() -> Self {
        Self {
            parallel: true,
            max_matches: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            parallel: config.parallel,
            max_matches: config.max_matches,
        }
    }

    pub fn use_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_matches(mut self, max: Option<usize>) -> Self {
        self.max_matches = max;
        self
    }

    /// First hit per entry; entries with no hit are left out.
    pub fn first_hits(&self, region: &[u8], database: &SignatureDatabase) -> Vec<EntryHits> {
        self.collect(database, |signature| find(region, signature).into_iter().collect())
    }

    pub fn all_hits(&self, region: &[u8], database: &SignatureDatabase) -> Vec<EntryHits> {
        let limit = self.max_matches.unwrap_or(usize::MAX);
        self.collect(database, |signature| find_all(region, signature).take(limit).collect())
    }

    fn collect<F>(&self, database: &SignatureDatabase, scan: F) -> Vec<EntryHits>
    where
        F: Fn(&Signature) -> Vec<isize> + Sync,
    {
        let run = |(index, entry): (usize, &crate::pattern::DatabaseEntry)| {
            let positions = scan(entry.signature());
            if positions.is_empty() {
                return None;
            }
            log::trace!("'{}' hit {} time(s)", entry.name(), positions.len());
            Some(EntryHits {
                index,
                name: entry.name().to_string(),
                positions,
            })
        };

        // collect keeps database order in both branches
        if self.parallel {
            database.entries().par_iter().enumerate().filter_map(run).collect()
        } else {
            database.entries().iter().enumerate().filter_map(run).collect()
        }
    }
}

impl Default for SignatureScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(text: &str) -> Signature {
        Signature::from_text(text).unwrap()
    }

    #[test]
    fn test_find_wildcard_in_middle() {
        let signature = Signature::from_bytes_and_mask(&[0x55, 0x00, 0xC3], "x?x").unwrap();
        assert_eq!(find(&[0x90, 0x55, 0xFF, 0xC3, 0x00], &signature), Some(1));
    }

    #[test]
    fn test_find_verbatim() {
        let region = b"\x00\x11\x48\x89\x5c\x24\x08\x22";
        assert_eq!(find(region, &sig("48 89 5C 24 08")), Some(2));
    }

    #[test]
    fn test_find_applies_report_offset() {
        let region = [0x00, 0x48, 0x8B, 0x05, 0x10, 0x20, 0x30, 0x40];
        let signature = sig("48 8B 05 ?? ?? ?? ??").with_report_offset(3);
        assert_eq!(find(&region, &signature), Some(4));

        let signature = sig("8B 05").with_report_offset(-5);
        assert_eq!(find(&region, &signature), Some(-3));
    }

    #[test]
    fn test_find_leading_wildcards() {
        let region = [0xAA, 0xBB, 0xE8, 0x01];
        assert_eq!(find(&region, &sig("?? ?? E8 01")), Some(0));
        assert_eq!(find(&region, &sig("?? E8 01")), Some(1));
    }

    #[test]
    fn test_leading_wildcards_cannot_start_before_region() {
        // the anchor sits at 0 but two wildcard bytes would precede it
        assert_eq!(find(&[0xE8, 0x01], &sig("?? ?? E8")), None);
    }

    #[test]
    fn test_anchor_before_leading_wildcards_is_not_a_candidate() {
        // the 'A' at 0 cannot be the anchor, so nothing is skipped over
        let signature = sig("?? 41 42");
        assert_eq!(find(b"AAB", &signature), Some(0));
        assert_eq!(find_all(b"AAB", &signature).collect::<Vec<_>>(), vec![0]);

        assert_eq!(find(b"\xE8\x00\xE8\x01", &sig("?? ?? E8 01")), Some(0));
        assert_eq!(find(b"\xE8\x00\xE8\x01\x02", &sig("?? E8 01")), Some(1));
    }

    #[test]
    fn test_trailing_wildcards_must_fit() {
        assert_eq!(find(&[0x00, 0x55, 0x01], &sig("55 ?? ??")), None);
        assert_eq!(find(&[0x00, 0x55, 0x01, 0x02], &sig("55 ?? ??")), Some(1));
    }

    #[test]
    fn test_region_shorter_than_pattern() {
        assert_eq!(find(&[0x55], &sig("55 8B EC")), None);
        assert_eq!(find(&[], &sig("55")), None);
    }

    #[test]
    fn test_not_found() {
        assert_eq!(find(&[0x01, 0x02, 0x03], &sig("04")), None);
    }

    #[test]
    fn test_failed_candidate_skips_window() {
        // "AAB": the candidate at 0 fails on its second byte and the cursor
        // jumps to 2, past the real match at 1.
        let signature = Signature::from_bytes(b"AB").unwrap();
        assert_eq!(find(b"AAB", &signature), None);
        assert_eq!(find_all(b"AAB", &signature).collect::<Vec<_>>(), Vec::<isize>::new());

        // a match past the skipped window is still found
        assert_eq!(find(b"AAxAB", &signature), Some(3));
    }

    #[test]
    fn test_find_masked_and_text() {
        let region = [0x90, 0x55, 0xFF, 0xC3, 0x00];
        assert_eq!(find_masked(&region, &[0x55, 0x00, 0xC3], "x?x"), Ok(Some(1)));
        assert_eq!(find_text(&region, "55 ?? C3"), Ok(Some(1)));
        assert_eq!(find_text(&region, "C3 C3"), Ok(None));
        assert_eq!(find_masked(&region, &[0x55], "xx"), Err(PatternError::ShapeMismatch { pattern: 1, mask: 2 }));
        assert!(matches!(find_text(&region, "5G"), Err(PatternError::MalformedToken { .. })));
    }

    #[test]
    fn test_find_is_repeatable() {
        let region = b"xxABCxxABC";
        let signature = sig("41 ?? 43");
        let first = find(region, &signature);
        assert_eq!(first, Some(2));
        assert_eq!(find(region, &signature), first);
    }

    #[test]
    fn test_scanner_keeps_database_order() {
        let database = SignatureDatabase::parse(
            "[first]\nsignature = 43\n[missing]\nsignature = FF\n[second]\nsignature = 41 ??\n",
        )
        .unwrap();
        let region = b"ABCABC";

        for parallel in [true, false] {
            let scanner = SignatureScanner::new().use_parallel(parallel);
            let first = scanner.first_hits(region, &database);
            assert_eq!(first.len(), 2);
            assert_eq!(first[0].name, "first");
            assert_eq!(first[0].positions, vec![2]);
            assert_eq!(first[1].index, 2);
            assert_eq!(first[1].positions, vec![0]);

            let all = scanner.all_hits(region, &database);
            assert_eq!(all[0].positions, vec![2, 5]);
            assert_eq!(all[1].positions, vec![0, 3]);
        }
    }

    #[test]
    fn test_scanner_max_matches() {
        let database = SignatureDatabase::parse("[a]\nsignature = 41\n").unwrap();
        let scanner = SignatureScanner::new().with_max_matches(Some(2));
        let hits = scanner.all_hits(b"AAAAA", &database);
        assert_eq!(hits[0].positions, vec![0, 1]);
    }
}
