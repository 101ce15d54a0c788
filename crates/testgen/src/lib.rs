//! Random problem generation for testing and benchmarking `normkit`.

pub mod generator;
