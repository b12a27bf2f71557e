// TF-IDF scoring and ranking.
//
//   tf    = count[term] / total target occurrences
//   idf   = ln(num_control_docs / (df + 1))
//   score = tf * idf
//
// The +1 keeps idf finite for terms no control document contains, which
// caps idf at ln(num_docs). When df + 1 exceeds num_docs the score goes
// negative; that is left as is.

use std::collections::HashMap;

use serde::Serialize;

use super::corpus::{ControlFrequencies, TargetFrequencies};

/// A scored term in the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingTerm {
    pub term: String,
    pub score: f64,
}

/// Trend score of a single term.
pub fn tf_idf(normalized_tf: f64, doc_freq: u64, num_docs: u64) -> f64 {
    let idf = (num_docs as f64 / (doc_freq as f64 + 1.0)).ln();
    normalized_tf * idf
}

/// Score every term of the target set. Terms seen only in control are not
/// emitted.
pub fn score(target: &TargetFrequencies, control: &ControlFrequencies) -> HashMap<String, f64> {
    if target.total_terms == 0 {
        return HashMap::new();
    }

    let total = target.total_terms as f64;
    target
        .term_freq
        .iter()
        .map(|(term, &count)| {
            let tf = count as f64 / total;
            let df = control.doc_freq.get(term).copied().unwrap_or(0);
            (term.clone(), tf_idf(tf, df, control.num_docs))
        })
        .collect()
}

/// Sort scores into a ranking, highest first. Equal scores fall back to
/// ascending term order so the output is reproducible.
pub fn rank(scores: HashMap<String, f64>) -> Vec<TrendingTerm> {
    let mut ranked: Vec<TrendingTerm> = scores
        .into_iter()
        .map(|(term, score)| TrendingTerm { term, score })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.term.cmp(&b.term))
    });

    ranked
}
