// Sat Oct 17 2026 - Alex

//! Wildcard byte-signature scanning over in-memory buffers.
//!
//! A [`Signature`] is built once from bytes plus an `x`/`?` mask or from
//! PEiD-style text, then searched for with [`find`] or [`find_all`].
//!
//! ```
//! use sigscan::{find_all, Signature};
//!
//! let sig = Signature::from_text("41 41").unwrap();
//! assert_eq!(find_all(b"AAAA", &sig).collect::<Vec<_>>(), vec![0, 1, 2]);
//! ```

pub mod config;
pub mod output;
pub mod pattern;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use pattern::{
    find, find_all, find_masked, find_text, Mask, MaskFlag, Matches, PatternError, Signature, SignatureDatabase,
    SignatureScanner,
};
