//! Parallel string rewriting of a [`Grammar`] over a fixed number of generations.
//!
//! Every generation is built from the previous one only: symbols emitted during the
//! current pass are never rewritten again in that pass. Buffers are sized exactly before
//! they are filled, and an optional ceiling on the symbol count is checked against the
//! projected lengths before any generation is allocated.

use crate::error::{LsysError, Resource, Result};
use crate::grammar::Grammar;
use log::debug;
use std::collections::HashMap;

/// Expands grammars, optionally refusing ones that would grow past a symbol ceiling.
#[derive(Clone, Copy, Debug, Default)]
pub struct Expander {
    max_symbols: Option<usize>,
}

impl Expander {
    /// An expander with no ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or clears) the maximum number of symbols any generation may hold.
    pub fn with_limit(mut self, max_symbols: Option<usize>) -> Self {
        self.max_symbols = max_symbols;
        self
    }

    /// Verifies every generation of `grammar` fits under the ceiling.
    ///
    /// Generations are projected one at a time from symbol counts, so no string and no
    /// per-generation table is built. Projection fails at the first generation over the
    /// ceiling and stops early once the counts no longer change. Returns the projected
    /// symbol count of the final generation.
    pub fn check(&self, grammar: &Grammar) -> Result<u128> {
        let exceeds = |len: u128| match self.max_symbols {
            Some(limit) if len > limit as u128 => Err(LsysError::ResourceLimitExceeded {
                resource: Resource::Symbols,
                limit: limit as u128,
                requested: len,
            }),
            _ => Ok(len),
        };

        let mut counts = initial_counts(grammar);
        let mut len = exceeds(total(&counts))?;
        for _ in 0..grammar.iteration_count {
            let next = next_counts(grammar, &counts);
            if next == counts {
                break;
            }
            counts = next;
            len = exceeds(total(&counts))?;
        }
        Ok(len)
    }

    /// Returns the working string after `grammar.iteration_count` generations.
    ///
    /// Rewriting stops early once no symbol of the working string has a production.
    ///
    /// # Errors
    /// [`LsysError::ResourceLimitExceeded`] when a generation would exceed the ceiling.
    /// Nothing is allocated in that case.
    pub fn expand(&self, grammar: &Grammar) -> Result<String> {
        let projected = self.check(grammar)?;
        debug!(
            "expanding {} generations, projected {} symbols",
            grammar.iteration_count, projected
        );

        let mut current = grammar.initial_string();
        for generation in 1..=grammar.iteration_count {
            if !current.chars().any(|c| grammar.production(c).is_some()) {
                debug!("generation {generation}: no productions left, stopping");
                break;
            }
            current = step(grammar, &current);
            debug!("generation {generation}: {} bytes", current.len());
        }
        Ok(current)
    }
}

/// Rewrites `previous` once.
///
/// Symbols with a production (and not skipped) are replaced by their body; all others
/// pass through unchanged.
pub fn step(grammar: &Grammar, previous: &str) -> String {
    let size: usize = previous
        .chars()
        .map(|c| grammar.production(c).map_or(c.len_utf8(), str::len))
        .sum();

    let mut next = String::with_capacity(size);
    for c in previous.chars() {
        match grammar.production(c) {
            Some(body) => next.push_str(body),
            None => next.push(c),
        }
    }
    next
}

/// Symbol counts of generations `0..=iteration_count`, computed without building strings.
///
/// The list ends early at the first generation whose counts equal the previous one; every
/// later generation has that same length. Counts saturate at `u128::MAX` rather than
/// overflowing.
pub fn projected_lengths(grammar: &Grammar) -> Vec<u128> {
    let mut counts = initial_counts(grammar);
    let mut lengths = vec![total(&counts)];

    for _ in 0..grammar.iteration_count {
        let next = next_counts(grammar, &counts);
        if next == counts {
            break;
        }
        counts = next;
        lengths.push(total(&counts));
    }

    lengths
}

fn initial_counts(grammar: &Grammar) -> HashMap<char, u128> {
    let mut counts: HashMap<char, u128> = HashMap::new();
    for c in grammar.axiom.chars() {
        let n = counts.entry(c).or_default();
        *n = n.saturating_add(grammar.axiom_repeat as u128);
    }
    counts
}

fn next_counts(grammar: &Grammar, counts: &HashMap<char, u128>) -> HashMap<char, u128> {
    let mut next: HashMap<char, u128> = HashMap::with_capacity(counts.len());
    for (&symbol, &n) in counts {
        match grammar.production(symbol) {
            Some(body) => {
                for c in body.chars() {
                    let slot = next.entry(c).or_default();
                    *slot = slot.saturating_add(n);
                }
            }
            None => {
                let slot = next.entry(symbol).or_default();
                *slot = slot.saturating_add(n);
            }
        }
    }
    next
}

fn total(counts: &HashMap<char, u128>) -> u128 {
    counts.values().fold(0u128, |acc, n| acc.saturating_add(*n))
}

/// Iterator over successive generations, starting with generation 0.
pub struct Generations<'a> {
    grammar: &'a Grammar,
    current: Option<String>,
    remaining: usize,
}

impl Iterator for Generations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let out = self.current.take()?;
        if self.remaining > 0 {
            self.remaining -= 1;
            self.current = Some(step(self.grammar, &out));
        }
        Some(out)
    }
}

/// Yields generations `0..=grammar.iteration_count` without a ceiling check.
pub fn generations(grammar: &Grammar) -> Generations<'_> {
    Generations {
        grammar,
        current: Some(grammar.initial_string()),
        remaining: grammar.iteration_count,
    }
}
