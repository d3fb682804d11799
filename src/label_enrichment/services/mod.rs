/// Streaming services for label enrichment
///
/// Both passes operate on `io::Read`/`io::Write` so they can run against
/// in-memory buffers in tests; path handling and error classification
/// belong to the use-case layer.
mod extractor;
mod merger;

pub use extractor::{ExtractionStats, Extractor};
pub use merger::{MergeStats, Merger};

/// Row cadence for progress callbacks during streaming passes.
///
/// Multi-million-row reports take minutes to stream; operators need a
/// heartbeat. Tunable, not load-bearing for correctness.
pub const PROGRESS_EVERY_ROWS: u64 = 10_000;
