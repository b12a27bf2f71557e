// Pipelines: end-to-end workflows built from the trend analysis pieces.

pub mod trending;
