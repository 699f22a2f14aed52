// Sat Oct 17 2026 - Alex

use crate::pattern::scanner::{find_start, report};
use crate::pattern::Signature;
use std::iter::FusedIterator;

/// Lazy iterator over every match of a signature, see [`find_all`](crate::find_all).
///
/// Each step is one single-match search over the part of the region that
/// follows the previous hit, so nothing is scanned ahead of what the caller
/// consumes.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    region: &'a [u8],
    signature: &'a Signature,
    consumed: usize,
    done: bool,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(region: &'a [u8], signature: &'a Signature) -> Self {
        Self {
            region,
            signature,
            consumed: 0,
            done: false,
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = isize;

    fn next(&mut self) -> Option<isize> {
        if self.done {
            return None;
        }

        let remaining = self.region.get(self.consumed..).unwrap_or_default();
        let Some(relative) = find_start(remaining, self.signature) else {
            self.done = true;
            return None;
        };

        let start = self.consumed + relative;
        self.consumed = start + 1;
        log::trace!("Match for '{}' at {:#x}", self.signature, start);
        Some(report(start, self.signature))
    }
}

impl FusedIterator for Matches<'_> {}
