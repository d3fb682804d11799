use std::io;

use csv::{ReaderBuilder, StringRecord, Writer};

use crate::label_enrichment::domain::LookupTable;
use crate::shared::Result;

use super::PROGRESS_EVERY_ROWS;

/// Counters for one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Data rows streamed from the source report
    pub rows_total: u64,
    /// Rows whose image id resolved to a non-empty attribute value
    pub rows_matched: u64,
}

/// Streaming pass #2: appends the looked-up attribute value onto every
/// source row.
///
/// Every original column is preserved in its original order; the new
/// column goes last. A lookup miss substitutes the empty string and is
/// counted, never an error. One output row per input row, always.
pub struct Merger {
    key_column: String,
    attribute_column: String,
}

impl Merger {
    pub fn new(key_column: impl Into<String>, attribute_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            attribute_column: attribute_column.into(),
        }
    }

    /// Runs the merge pass.
    ///
    /// # Arguments
    /// * `source` - the original report CSV, re-read independently of
    ///   any extraction state
    /// * `table` - the lookup table reloaded from the intermediate file
    /// * `output` - destination for the merged CSV
    /// * `on_progress` - invoked every [`PROGRESS_EVERY_ROWS`] rows
    ///
    /// # Errors
    /// Returns an error on any CSV-level read or write failure.
    pub fn run<R: io::Read, W: io::Write>(
        &self,
        source: R,
        table: &LookupTable,
        output: W,
        mut on_progress: impl FnMut(&MergeStats),
    ) -> Result<MergeStats> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);
        let mut writer = Writer::from_writer(output);

        let headers = reader.headers()?.clone();
        let key_idx = headers.iter().position(|header| header == self.key_column);
        let width = headers.len();

        let mut out_header: Vec<&str> = headers.iter().collect();
        out_header.push(&self.attribute_column);
        writer.write_record(&out_header)?;

        let mut stats = MergeStats::default();

        for result in reader.records() {
            let record = result?;
            stats.rows_total += 1;

            let image_id = resolve_field(&record, key_idx);
            let value = table.get(image_id).unwrap_or("");
            if !value.is_empty() {
                stats.rows_matched += 1;
            }

            // Short rows pad with empty fields; fields past the header
            // width are dropped, keeping every output row aligned to the
            // merged header.
            let mut out_row: Vec<&str> = Vec::with_capacity(width + 1);
            for i in 0..width {
                out_row.push(record.get(i).unwrap_or(""));
            }
            out_row.push(value);
            writer.write_record(&out_row)?;

            if stats.rows_total % PROGRESS_EVERY_ROWS == 0 {
                on_progress(&stats);
            }
        }

        writer.flush()?;
        Ok(stats)
    }
}

fn resolve_field<'r>(record: &'r StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}
