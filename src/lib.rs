//! scan-enrich - label enrichment for container vulnerability-scan reports
//!
//! This library ingests vulnerability-scan reports exported from a
//! security-scanning platform, extracts a per-image attribute embedded in
//! a JSON-encoded label column, deduplicates it into an Image ID →
//! attribute lookup table, and merges that table back onto the original
//! report. A companion use case drives the platform's report-generation
//! API to produce the input report in the first place.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`label_enrichment`): label blobs, dedup entries,
//!   the lookup table, and the two streaming passes
//! - **Application Layer** (`application`): use cases and their
//!   request/summary types
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use scan_enrich::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = ExtractAttributeUseCase::new(
//!     CsvLookupStore::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ExtractRequest::new(
//!     PathBuf::from("v2-report.csv"),
//!     PathBuf::from("output.csv"),
//!     "Image ID",
//!     "Container Labels",
//!     "MAINTAINER",
//!     "Maintainer",
//!     None,
//! );
//! let summary = use_case.execute(request)?;
//! eprintln!("{} images in the lookup table", summary.table_size);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod label_enrichment;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{CsvLookupStore, GzipArtifactWriter};
    pub use crate::adapters::outbound::network::HttpReportingClient;
    pub use crate::application::dto::{
        ExtractRequest, ExtractSummary, FetchRequest, FetchSummary, MergeRequest, MergeSummary,
    };
    pub use crate::application::use_cases::{
        ExtractAttributeUseCase, FetchReportUseCase, MergeReportUseCase,
    };
    pub use crate::config::{ApiConfig, ColumnSettings, ConfigFile};
    pub use crate::label_enrichment::domain::{LabelBlob, LookupTable, UniqueEntrySet};
    pub use crate::label_enrichment::services::{
        ExtractionStats, Extractor, MergeStats, Merger, PROGRESS_EVERY_ROWS,
    };
    pub use crate::ports::outbound::{
        CreatedJob, JobRequest, JobState, JobStatus, ProgressReporter, ReportDefinition,
        ReportingApi, TimeFrame,
    };
    pub use crate::shared::error::{EnrichError, ExitCode};
    pub use crate::shared::Result;
}
