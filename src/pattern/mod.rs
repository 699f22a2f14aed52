// Sat Oct 17 2026 - Alex

pub mod database;
pub mod error;
pub mod mask;
pub mod matches;
pub mod scanner;
pub mod signature;
pub mod token;

pub use database::{DatabaseEntry, SignatureDatabase};
pub use error::{DatabaseError, PatternError};
pub use mask::{Mask, MaskFlag};
pub use matches::Matches;
pub use scanner::{find, find_all, find_masked, find_text, EntryHits, SignatureScanner};
pub use signature::Signature;
pub use token::Token;
