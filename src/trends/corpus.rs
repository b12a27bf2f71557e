// Corpus accumulator: the two frequency sets behind independent locks.
//
// Target documents feed raw occurrence counts (term frequency). Control
// documents feed distinct-document counts (document frequency). Workers
// ingest pages concurrently, each call taking one set's write lock just long
// enough to apply its increments. Scoring reads both sets once everything
// has been joined.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use anyhow::Result;

use super::scoring;

/// Occurrence counts within the target corpus.
#[derive(Debug, Default, Clone)]
pub struct TargetFrequencies {
    pub term_freq: HashMap<String, u64>,
    /// Always equals the sum of `term_freq` at rest.
    pub total_terms: u64,
}

impl TargetFrequencies {
    fn add_occurrences(&mut self, terms: &[String]) {
        for term in terms {
            *self.term_freq.entry(term.clone()).or_insert(0) += 1;
            self.total_terms += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term_freq.is_empty()
    }
}

/// Document frequencies within the control corpus.
#[derive(Debug, Default, Clone)]
pub struct ControlFrequencies {
    /// Number of distinct control documents containing each term.
    pub doc_freq: HashMap<String, u64>,
    /// Number of control documents ingested, including term-less ones.
    pub num_docs: u64,
}

impl ControlFrequencies {
    fn add_document(&mut self, terms: &[String]) {
        let distinct: HashSet<&String> = terms.iter().collect();
        for term in distinct {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        self.num_docs += 1;
    }
}

/// Per-run accumulation context. Create one per trend run and share it with
/// the page workers through an `Arc`.
#[derive(Debug, Default)]
pub struct Corpus {
    target: RwLock<TargetFrequencies>,
    control: RwLock<ControlFrequencies>,
}

fn poisoned<T>(err: PoisonError<T>) -> anyhow::Error {
    anyhow::anyhow!("Corpus lock poisoned: {}", err)
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's terms in the set it was classified into.
    ///
    /// Target: every occurrence counts. Control: each distinct term counts
    /// once and the document count always goes up by one.
    pub fn ingest(&self, is_target: bool, terms: &[String]) -> Result<()> {
        if is_target {
            self.target.write().map_err(poisoned)?.add_occurrences(terms);
        } else {
            self.control.write().map_err(poisoned)?.add_document(terms);
        }
        Ok(())
    }

    /// Score every target term against the control baseline.
    ///
    /// Holds read locks on both sets for the whole pass. Call only after all
    /// ingestion has been joined.
    pub fn score(&self) -> Result<HashMap<String, f64>> {
        let target = self.target.read().map_err(poisoned)?;
        let control = self.control.read().map_err(poisoned)?;
        Ok(scoring::score(&target, &control))
    }

    /// Copy of the target set.
    pub fn target_snapshot(&self) -> Result<TargetFrequencies> {
        Ok(self.target.read().map_err(poisoned)?.clone())
    }

    /// Copy of the control set.
    pub fn control_snapshot(&self) -> Result<ControlFrequencies> {
        Ok(self.control.read().map_err(poisoned)?.clone())
    }
}
