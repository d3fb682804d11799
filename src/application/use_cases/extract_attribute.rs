use std::fs::File;
use std::io::{self, BufReader};
use std::time::Instant;

use indicatif::HumanCount;

use crate::adapters::outbound::filesystem::CsvLookupStore;
use crate::application::dto::{ExtractRequest, ExtractSummary};
use crate::label_enrichment::domain::LookupTable;
use crate::label_enrichment::services::Extractor;
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::EnrichError;
use crate::shared::Result;

/// ExtractAttributeUseCase - streaming pass #1 of the pipeline
///
/// Opens the source report, runs the extraction pass, and persists the
/// deduplicated lookup table as the stage's only output artifact.
/// Progress goes through the injected reporter; counters come back in
/// the summary.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct ExtractAttributeUseCase<PR> {
    lookup_store: CsvLookupStore,
    progress_reporter: PR,
}

impl<PR> ExtractAttributeUseCase<PR>
where
    PR: ProgressReporter,
{
    pub fn new(lookup_store: CsvLookupStore, progress_reporter: PR) -> Self {
        Self {
            lookup_store,
            progress_reporter,
        }
    }

    /// Executes the extraction stage.
    ///
    /// # Errors
    /// Returns an error if the source file is missing or unreadable, or
    /// if the lookup table cannot be written. No partial lookup file is
    /// produced on failure.
    pub fn execute(&self, request: ExtractRequest) -> Result<ExtractSummary> {
        self.progress_reporter.report(&format!(
            "Starting to process the CSV file: {}",
            request.source_path.display()
        ));
        match request.max_rows {
            Some(max) => self
                .progress_reporter
                .report(&format!("Processing first {} rows...", HumanCount(max))),
            None => self.progress_reporter.report("Processing all rows..."),
        }

        // Step 1: open the source report
        let file = File::open(&request.source_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EnrichError::InputNotFound {
                path: request.source_path.clone(),
                suggestion: "Run 'scan-enrich fetch report' to download the report, or check the path".to_string(),
            },
            _ => EnrichError::FileRead {
                path: request.source_path.clone(),
                details: e.to_string(),
            },
        })?;

        // Step 2: run the streaming pass
        let started = Instant::now();
        let extractor = Extractor::new(
            &request.key_column,
            &request.label_column,
            &request.label_key,
            request.max_rows,
        );
        let (entries, stats) = extractor
            .run(BufReader::new(file), |stats| {
                self.progress_reporter.report_rows(
                    stats.rows_total,
                    &format!(
                        "Processed {} rows... ({:.1}s elapsed)",
                        HumanCount(stats.rows_total),
                        started.elapsed().as_secs_f64()
                    ),
                );
            })
            .map_err(|e| EnrichError::ReportParse {
                path: request.source_path.clone(),
                details: e.to_string(),
            })?;

        // Step 3: collapse the dedup set into the final table
        let (entries_with, entries_without) = entries.partition_counts();
        let table = LookupTable::from_unique_entries(&entries);

        self.progress_reporter.report_completion(&format!(
            "Processing completed in {:.1} seconds",
            started.elapsed().as_secs_f64()
        ));
        self.progress_reporter.report(&format!(
            "Total rows processed: {}",
            HumanCount(stats.rows_total)
        ));
        self.progress_reporter.report(&format!(
            "Rows with {}: {}",
            request.label_key,
            HumanCount(stats.rows_with_attribute)
        ));
        self.progress_reporter.report(&format!(
            "Rows without {}: {}",
            request.label_key,
            HumanCount(stats.rows_missing_attribute)
        ));
        if stats.rows_malformed > 0 {
            self.progress_reporter.report(&format!(
                "Rows skipped (malformed label blob): {}",
                HumanCount(stats.rows_malformed)
            ));
        }
        self.progress_reporter.report(&format!(
            "Entries WITH {}: {} unique combinations",
            request.label_key,
            HumanCount(entries_with as u64)
        ));
        self.progress_reporter.report(&format!(
            "Entries WITHOUT {}: {} unique combinations",
            request.label_key,
            HumanCount(entries_without as u64)
        ));
        self.progress_reporter.report(&format!(
            "Final lookup table size: {} entries",
            HumanCount(table.len() as u64)
        ));

        // Step 4: persist the table as the stage's only output
        self.lookup_store.write(
            &request.output_path,
            &request.key_column,
            &request.attribute_column,
            &table,
        )?;
        self.progress_reporter.report(&format!(
            "✅ Lookup table written to: {}",
            request.output_path.display()
        ));

        Ok(ExtractSummary {
            stats,
            entries_with_attribute: entries_with,
            entries_without_attribute: entries_without,
            table_size: table.len(),
            lookup_path: request.output_path,
        })
    }
}
