// Sat Oct 17 2026 - Alex

use crate::pattern::PatternError;
use std::fmt;

/// Whether a pattern position constrains the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskFlag {
    Exact,
    Wildcard,
}

impl MaskFlag {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Self::Exact),
            '?' => Some(Self::Wildcard),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Exact => 'x',
            Self::Wildcard => '?',
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    flags: Vec<MaskFlag>,
}

impl Mask {
    pub fn new(flags: Vec<MaskFlag>) -> Self {
        Self { flags }
    }

    pub fn all_exact(len: usize) -> Self {
        Self {
            flags: vec![MaskFlag::Exact; len],
        }
    }

    /// Parses an `x`/`?` mask string, one flag per character.
    pub fn parse(mask: &str) -> Result<Self, PatternError> {
        let flags = mask
            .chars()
            .enumerate()
            .map(|(index, c)| MaskFlag::from_char(c).ok_or(PatternError::InvalidMask { index, found: c }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { flags })
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self) -> &[MaskFlag] {
        &self.flags
    }

    pub fn is_exact(&self, index: usize) -> bool {
        self.flags.get(index).is_some_and(MaskFlag::is_exact)
    }

    pub fn first_exact(&self) -> Option<usize> {
        self.flags.iter().position(MaskFlag::is_exact)
    }

    pub fn exact_count(&self) -> usize {
        self.flags.iter().filter(|f| f.is_exact()).count()
    }

    pub fn wildcard_count(&self) -> usize {
        self.flags.len() - self.exact_count()
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in &self.flags {
            write!(f, "{}", flag.as_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mask() {
        let mask = Mask::parse("x?x").unwrap();
        assert_eq!(mask.flags(), &[MaskFlag::Exact, MaskFlag::Wildcard, MaskFlag::Exact]);
        assert_eq!(mask.first_exact(), Some(0));
        assert_eq!(mask.exact_count(), 2);
        assert_eq!(mask.wildcard_count(), 1);
        assert_eq!(mask.to_string(), "x?x");
    }

    #[test]
    fn test_parse_mask_rejects_other_chars() {
        let err = Mask::parse("x?X").unwrap_err();
        assert_eq!(err, PatternError::InvalidMask { index: 2, found: 'X' });
    }

    #[test]
    fn test_first_exact_after_wildcards() {
        let mask = Mask::parse("??x?").unwrap();
        assert_eq!(mask.first_exact(), Some(2));
        assert!(!mask.is_exact(0));
        assert!(mask.is_exact(2));
        assert!(!mask.is_exact(10));
    }

    #[test]
    fn test_all_wildcards_has_no_anchor() {
        let mask = Mask::parse("???").unwrap();
        assert_eq!(mask.first_exact(), None);
    }
}
