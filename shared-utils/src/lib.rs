mod bench;
pub use bench::BenchResult;
