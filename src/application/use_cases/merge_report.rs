use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::time::Instant;

use anyhow::Context;
use indicatif::HumanCount;

use crate::adapters::outbound::filesystem::CsvLookupStore;
use crate::application::dto::{MergeRequest, MergeSummary};
use crate::label_enrichment::services::Merger;
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::EnrichError;
use crate::shared::Result;

/// MergeReportUseCase - streaming pass #2 of the pipeline
///
/// Reloads the lookup table from the intermediate file (never from the
/// extraction run's memory), then streams the original report and
/// appends the looked-up attribute to every row.
///
/// Both inputs are opened before the output file is created, so a
/// missing input never leaves a zero-byte output behind.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct MergeReportUseCase<PR> {
    lookup_store: CsvLookupStore,
    progress_reporter: PR,
}

impl<PR> MergeReportUseCase<PR>
where
    PR: ProgressReporter,
{
    pub fn new(lookup_store: CsvLookupStore, progress_reporter: PR) -> Self {
        Self {
            lookup_store,
            progress_reporter,
        }
    }

    /// Executes the merge stage.
    ///
    /// # Errors
    /// Returns an error if either input file is missing or unreadable,
    /// or if the merged output cannot be written.
    pub fn execute(&self, request: MergeRequest) -> Result<MergeSummary> {
        // Step 1: load the lookup table fully into memory
        let table = self.lookup_store.read(
            &request.lookup_path,
            &request.key_column,
            &request.attribute_column,
        )?;
        self.progress_reporter.report(&format!(
            "Loaded {} lookup entries from {}",
            HumanCount(table.len() as u64),
            request.lookup_path.display()
        ));

        // Step 2: open the source before touching the output path
        let source = File::open(&request.source_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EnrichError::InputNotFound {
                path: request.source_path.clone(),
                suggestion: "The merge stage re-reads the original report; check the path"
                    .to_string(),
            },
            _ => EnrichError::FileRead {
                path: request.source_path.clone(),
                details: e.to_string(),
            },
        })?;

        let output = File::create(&request.output_path).map_err(|e| EnrichError::FileWrite {
            path: request.output_path.clone(),
            details: e.to_string(),
        })?;

        self.progress_reporter.report(&format!(
            "Starting merge: {} -> {}",
            request.source_path.display(),
            request.output_path.display()
        ));

        // Step 3: stream the merge
        let started = Instant::now();
        let merger = Merger::new(&request.key_column, &request.attribute_column);
        let stats = merger
            .run(
                BufReader::new(source),
                &table,
                BufWriter::new(output),
                |stats| {
                    self.progress_reporter.report_rows(
                        stats.rows_total,
                        &format!(
                            "Processed {} rows in {:.2}s - {} matches written",
                            HumanCount(stats.rows_total),
                            started.elapsed().as_secs_f64(),
                            HumanCount(stats.rows_matched)
                        ),
                    );
                },
            )
            .with_context(|| {
                format!(
                    "Failed while merging {} into {}",
                    request.source_path.display(),
                    request.output_path.display()
                )
            })?;

        self.progress_reporter.report_completion(&format!(
            "Completed! Processed {} total rows in {:.2} seconds - {} matched",
            HumanCount(stats.rows_total),
            started.elapsed().as_secs_f64(),
            HumanCount(stats.rows_matched)
        ));

        Ok(MergeSummary {
            stats,
            output_path: request.output_path,
        })
    }
}
