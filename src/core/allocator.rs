//! Sequential human-readable identifier allocation
//!
//! Identifiers look like `<PREFIX>-<sequence>` where the sequence is
//! zero-padded to at least three digits: `INV-001`, `EXP-014`, `INV-1000`.

use regex::Regex;

/// Minimum width of the numeric suffix
const MIN_SEQUENCE_WIDTH: usize = 3;

/// A freshly allocated identifier together with its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub sequence: u64,
    pub id: String,
}

/// Derives the next sequential identifier for one prefix
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: String,
    pattern: Regex,
}

impl IdAllocator {
    /// Create an allocator for ids of the form `<prefix>-<digits>`
    pub fn new(prefix: &str) -> Self {
        let pattern = Regex::new(&format!("^{}-([0-9]+)$", regex::escape(prefix)))
            .expect("escaped prefix always forms a valid pattern");

        Self {
            prefix: prefix.to_string(),
            pattern,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Numeric suffix of `id`, if it follows this allocator's scheme
    ///
    /// Ids with a foreign scheme, or a suffix that does not fit in `u64`,
    /// yield `None`.
    pub fn sequence_of(&self, id: &str) -> Option<u64> {
        self.pattern
            .captures(id)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Highest matching suffix among `ids`, or 0 when none match
    pub fn max_sequence<'a, I>(&self, ids: I) -> u64
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter_map(|id| self.sequence_of(id))
            .max()
            .unwrap_or(0)
    }

    /// Render a sequence number as an identifier
    pub fn format(&self, sequence: u64) -> String {
        format!(
            "{}-{:0width$}",
            self.prefix,
            sequence,
            width = MIN_SEQUENCE_WIDTH
        )
    }

    /// Next identifier computed from the existing ids alone
    pub fn next<'a, I>(&self, ids: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.next_after(ids, 0).map(|allocation| allocation.id)
    }

    /// Next identifier given the existing ids and the persisted last-used counter
    ///
    /// The sequence continues from whichever is higher, so an id freed by a
    /// delete is never reissued and a stale counter never collides. Returns
    /// `None` once the sequence space is exhausted.
    pub fn next_after<'a, I>(&self, ids: I, last_used: u64) -> Option<Allocation>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sequence = self.max_sequence(ids).max(last_used).checked_add(1)?;
        Some(Allocation {
            sequence,
            id: self.format(sequence),
        })
    }
}
