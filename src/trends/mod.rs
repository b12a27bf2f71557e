// Trend analysis: classification, normalization, accumulation and scoring.

pub mod classifier;
pub mod corpus;
pub mod normalizer;
pub mod scoring;
pub mod stop_words;
pub mod traits;
