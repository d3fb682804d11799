use std::path::PathBuf;

use crate::label_enrichment::services::{ExtractionStats, MergeStats};

/// Result of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    /// Per-row counters from the streaming pass
    pub stats: ExtractionStats,
    /// Unique (image id, attribute) combinations with a usable attribute
    pub entries_with_attribute: usize,
    /// Unique entries without one
    pub entries_without_attribute: usize,
    /// Final lookup-table size after last-write-wins collapsing
    pub table_size: usize,
    /// Where the lookup table was written
    pub lookup_path: PathBuf,
}

/// Result of one merge run.
#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub stats: MergeStats,
    /// Where the merged report was written
    pub output_path: PathBuf,
}

/// Result of one report fetch.
#[derive(Debug, Clone)]
pub struct FetchSummary {
    /// Id of the generation job the platform ran
    pub job_id: i64,
    /// Where the compressed download was kept
    pub compressed_path: PathBuf,
    /// Where the decompressed report landed
    pub output_path: PathBuf,
    /// Decompressed size in bytes
    pub report_bytes: u64,
}
