// Sat Oct 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern has {pattern} bytes but mask has {mask} flags")]
    ShapeMismatch { pattern: usize, mask: usize },
    #[error("Pattern has no exact byte to anchor the search on")]
    NoAnchorByte,
    #[error("Malformed token '{token}' at position {index}")]
    MalformedToken { index: usize, token: String },
    #[error("Invalid mask character '{found}' at position {index}, expected 'x' or '?'")]
    InvalidMask { index: usize, found: char },
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Line {line}: '{key}' appears outside of a [section]")]
    OutsideSection { line: usize, key: String },
    #[error("Line {line}: unrecognized line '{content}'")]
    UnexpectedLine { line: usize, content: String },
    #[error("Line {line}: invalid ep_only value '{value}'")]
    InvalidEpOnly { line: usize, value: String },
    #[error("Entry '{name}' (line {line}) has no signature")]
    MissingSignature { name: String, line: usize },
    #[error("Entry '{name}' (line {line}): {source}")]
    Signature {
        name: String,
        line: usize,
        #[source]
        source: PatternError,
    },
}
