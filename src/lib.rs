// muse-trending: trending vocabulary in job postings
//
// This is the library root. Each module corresponds to a stage of the
// trend pipeline.

pub mod config;
pub mod muse;
pub mod output;
pub mod pipeline;
pub mod trends;
