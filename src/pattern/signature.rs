// Sat Oct 17 2026 - Alex

use crate::pattern::token;
use crate::pattern::{Mask, MaskFlag, PatternError};
use std::fmt;
use std::str::FromStr;

/// A byte pattern with a per-position wildcard mask.
///
/// Construction validates the shape and precomputes the anchor, the first
/// exact position, which the scanner pivots on. A built `Signature` never
/// changes and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pattern: Vec<u8>,
    mask: Mask,
    anchor_index: usize,
    report_offset: isize,
}

impl Signature {
    /// Builds a signature from raw bytes and an `x`/`?` mask string.
    ///
    /// ```
    /// use sigscan::Signature;
    ///
    /// let sig = Signature::from_bytes_and_mask(&[0x55, 0x00, 0xC3], "x?x").unwrap();
    /// assert_eq!(sig.to_string(), "55 ?? C3");
    /// ```
    pub fn from_bytes_and_mask(pattern: &[u8], mask: &str) -> Result<Self, PatternError> {
        let mask_len = mask.chars().count();
        if mask_len != pattern.len() {
            return Err(PatternError::ShapeMismatch {
                pattern: pattern.len(),
                mask: mask_len,
            });
        }

        let mask = Mask::parse(mask)?;
        Self::build(pattern.to_vec(), mask)
    }

    pub fn from_bytes_and_mask_with_offset(
        pattern: &[u8],
        mask: &str,
        report_offset: isize,
    ) -> Result<Self, PatternError> {
        Ok(Self::from_bytes_and_mask(pattern, mask)?.with_report_offset(report_offset))
    }

    /// Parses a PEiD/IDA-style signature such as `"55 8B EC ?? ?? C3"`.
    pub fn from_text(text: &str) -> Result<Self, PatternError> {
        let tokens = token::tokenize(text)?;

        let mut pattern = Vec::with_capacity(tokens.len());
        let mut flags = Vec::with_capacity(tokens.len());
        for tok in tokens {
            match tok.to_byte() {
                Some(b) => {
                    pattern.push(b);
                    flags.push(MaskFlag::Exact);
                }
                None => {
                    pattern.push(0x00);
                    flags.push(MaskFlag::Wildcard);
                }
            }
        }

        Self::build(pattern, Mask::new(flags))
    }

    pub fn from_text_with_offset(text: &str, report_offset: isize) -> Result<Self, PatternError> {
        Ok(Self::from_text(text)?.with_report_offset(report_offset))
    }

    /// Every position exact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        Self::build(bytes.to_vec(), Mask::all_exact(bytes.len()))
    }

    fn build(mut pattern: Vec<u8>, mask: Mask) -> Result<Self, PatternError> {
        debug_assert_eq!(pattern.len(), mask.len());

        let anchor_index = mask.first_exact().ok_or(PatternError::NoAnchorByte)?;

        // wildcard slots are never compared, zero them so equal signatures compare equal
        for (byte, flag) in pattern.iter_mut().zip(mask.flags()) {
            if !flag.is_exact() {
                *byte = 0x00;
            }
        }

        let sig = Self {
            pattern,
            mask,
            anchor_index,
            report_offset: 0,
        };
        log::debug!("Built signature '{}' (anchor at {})", sig, anchor_index);
        Ok(sig)
    }

    pub fn with_report_offset(mut self, report_offset: isize) -> Self {
        self.report_offset = report_offset;
        self
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn mask_string(&self) -> String {
        self.mask.to_string()
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// Always false, construction rejects empty patterns.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn anchor_index(&self) -> usize {
        self.anchor_index
    }

    pub fn anchor_byte(&self) -> u8 {
        self.pattern[self.anchor_index]
    }

    pub fn report_offset(&self) -> isize {
        self.report_offset
    }

    pub fn exact_count(&self) -> usize {
        self.mask.exact_count()
    }

    pub fn wildcard_count(&self) -> usize {
        self.mask.wildcard_count()
    }

    /// Checks every exact position against `region` with the pattern placed
    /// at raw `start`. Out-of-range placements never match.
    pub fn matches_at(&self, region: &[u8], start: usize) -> bool {
        let Some(window) = start
            .checked_add(self.len())
            .and_then(|end| region.get(start..end))
        else {
            return false;
        };

        self.pattern
            .iter()
            .zip(self.mask.flags())
            .zip(window)
            .all(|((&expected, flag), &actual)| !flag.is_exact() || expected == actual)
    }

    /// Verifies the positions from the anchor onward with the anchor sitting
    /// at `found`. Everything before the anchor is wildcard and is not read.
    pub(crate) fn verify_from_anchor(&self, region: &[u8], found: usize) -> bool {
        let tail = self.len() - self.anchor_index;
        let Some(window) = found
            .checked_add(tail)
            .and_then(|end| region.get(found..end))
        else {
            return false;
        };

        let flags = &self.mask.flags()[self.anchor_index..];
        self.pattern[self.anchor_index..]
            .iter()
            .zip(flags)
            .zip(window)
            .all(|((&expected, flag), &actual)| !flag.is_exact() || expected == actual)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (byte, flag)) in self.pattern.iter().zip(self.mask.flags()).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if flag.is_exact() {
                write!(f, "{:02X}", byte)?;
            } else {
                write!(f, "??")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Signature {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl TryFrom<&str> for Signature {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_first_exact() {
        let sig = Signature::from_bytes_and_mask(&[0x00, 0x00, 0x8B, 0xEC], "??xx").unwrap();
        assert_eq!(sig.anchor_index(), 2);
        assert_eq!(sig.anchor_byte(), 0x8B);
        assert_eq!(sig.len(), 4);
        assert!(!sig.is_empty());
    }

    #[test]
    fn test_shape_mismatch() {
        let err = Signature::from_bytes_and_mask(&[0x55, 0xC3], "x?x").unwrap_err();
        assert_eq!(err, PatternError::ShapeMismatch { pattern: 2, mask: 3 });
    }

    #[test]
    fn test_all_wildcard_has_no_anchor() {
        let err = Signature::from_bytes_and_mask(&[0x55, 0xC3], "??").unwrap_err();
        assert_eq!(err, PatternError::NoAnchorByte);

        let err = Signature::from_text("?? ? ??").unwrap_err();
        assert_eq!(err, PatternError::NoAnchorByte);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(Signature::from_bytes_and_mask(&[], "").unwrap_err(), PatternError::NoAnchorByte);
        assert_eq!(Signature::from_text("   ").unwrap_err(), PatternError::NoAnchorByte);
        assert_eq!(Signature::from_bytes(&[]).unwrap_err(), PatternError::NoAnchorByte);
    }

    #[test]
    fn test_invalid_mask_char() {
        let err = Signature::from_bytes_and_mask(&[0x55, 0xC3], "x.").unwrap_err();
        assert_eq!(err, PatternError::InvalidMask { index: 1, found: '.' });
    }

    #[test]
    fn test_text_and_mask_forms_agree() {
        let from_text = Signature::from_text("55 ?? c3").unwrap();
        let from_mask = Signature::from_bytes_and_mask(&[0x55, 0xAB, 0xC3], "x?x").unwrap();
        assert_eq!(from_text, from_mask);
        assert_eq!(from_text.mask_string(), "x?x");
    }

    #[test]
    fn test_display_round_trip() {
        let sig = Signature::from_text("e8 ? ?? 00 ff").unwrap();
        assert_eq!(sig.to_string(), "E8 ?? ?? 00 FF");
        let reparsed: Signature = sig.to_string().parse().unwrap();
        assert_eq!(reparsed, sig);
    }

    #[test]
    fn test_report_offset() {
        let sig = Signature::from_text_with_offset("48 8B 05 ?? ?? ?? ??", 3).unwrap();
        assert_eq!(sig.report_offset(), 3);

        let sig = Signature::from_bytes_and_mask_with_offset(&[0x90], "x", -1).unwrap();
        assert_eq!(sig.report_offset(), -1);
    }

    #[test]
    fn test_matches_at_bounds() {
        let sig = Signature::from_text("55 ?? C3").unwrap();
        let region = [0x90, 0x55, 0xFF, 0xC3, 0x00];
        assert!(sig.matches_at(&region, 1));
        assert!(!sig.matches_at(&region, 0));
        assert!(!sig.matches_at(&region, 3));
        assert!(!sig.matches_at(&region, usize::MAX));
    }

    #[test]
    fn test_verify_from_anchor_stops_at_region_end() {
        let sig = Signature::from_text("?? 55 C3").unwrap();
        assert!(!sig.verify_from_anchor(&[0x00, 0x55], 1));
        assert!(sig.verify_from_anchor(&[0x00, 0x55, 0xC3], 1));
    }

    #[test]
    fn test_counts() {
        let sig = Signature::from_text("60 E8 ?? ?? ?? ?? 5D").unwrap();
        assert_eq!(sig.exact_count(), 3);
        assert_eq!(sig.wildcard_count(), 4);
    }

    #[test]
    fn test_signature_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Signature>();
    }
}
