use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Raised when an accumulated count no longer fits in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOverflow;

/// Aggregate term statistics across merged shards.
///
/// `total_terms` is the sum of the shard headers. `term_totals` maps each
/// term to its collection term frequency (CTF). Iteration order of the
/// term table is unspecified; use [`TermStats::sorted_entries`] when a
/// stable order is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStats {
    total_terms: u64,
    term_totals: FxHashMap<String, u64>,
}

impl TermStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_terms(&self) -> u64 {
        self.total_terms
    }

    /// Add one shard's header total.
    pub fn add_shard_total(&mut self, count: u64) -> Result<u64, CountOverflow> {
        self.total_terms = self.total_terms.checked_add(count).ok_or(CountOverflow)?;
        Ok(self.total_terms)
    }

    /// Get-or-zero, add, store. Returns the new cumulative count.
    pub fn add_term(&mut self, term: &str, count: u64) -> Result<u64, CountOverflow> {
        let current = self.ctf(term);
        let updated = current.checked_add(count).ok_or(CountOverflow)?;
        match self.term_totals.get_mut(term) {
            Some(slot) => *slot = updated,
            None => {
                self.term_totals.insert(term.to_string(), updated);
            }
        }
        Ok(updated)
    }

    /// Cumulative count for `term`; zero if it was never seen.
    pub fn ctf(&self, term: &str) -> u64 {
        self.term_totals.get(term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.term_totals.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.term_totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_totals.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_totals.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Entries ordered by term bytes.
    pub fn sorted_entries(&self) -> Vec<(&str, u64)> {
        self.iter().sorted_unstable_by(|a, b| a.0.cmp(b.0)).collect()
    }

    /// Fold another aggregate into this one.
    pub fn absorb(&mut self, other: &TermStats) -> Result<(), CountOverflow> {
        self.add_shard_total(other.total_terms)?;
        for (term, count) in other.iter() {
            self.add_term(term, count)?;
        }
        Ok(())
    }
}
