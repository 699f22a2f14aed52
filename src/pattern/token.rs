// Sat Oct 17 2026 - Alex

use crate::pattern::PatternError;

/// One whitespace-separated token of a textual signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Any,
    Byte(u8),
}

impl Token {
    /// Accepts exactly two hex digits or `?`/`??`. Nibble wildcards such as
    /// `E?` are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [b'?'] | [b'?', b'?'] => Some(Self::Any),
            [hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                u8::from_str_radix(s, 16).ok().map(Self::Byte)
            }
            _ => None,
        }
    }

    pub fn to_byte(&self) -> Option<u8> {
        match self {
            Self::Any => None,
            Self::Byte(b) => Some(*b),
        }
    }
}

/// Splits `text` on whitespace and parses every token, reporting the first
/// bad one by its token index.
pub fn tokenize(text: &str) -> Result<Vec<Token>, PatternError> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, part)| {
            Token::parse(part).ok_or_else(|| PatternError::MalformedToken {
                index,
                token: part.to_string(),
            })
        })
        .collect()
}
