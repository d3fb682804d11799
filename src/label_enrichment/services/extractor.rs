use std::io;

use csv::{ReaderBuilder, StringRecord};

use crate::label_enrichment::domain::{LabelBlob, UniqueEntrySet};
use crate::shared::Result;

use super::PROGRESS_EVERY_ROWS;

/// Diagnostic counters for one extraction pass.
///
/// A malformed row (label blob that fails to parse as JSON) is excluded
/// from both the with-attribute and missing-attribute counts; it only
/// shows up in `rows_malformed`. Keeping it out of the partitions is
/// observed production behavior; the separate counter makes the
/// problem-row rate visible without changing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Data rows consumed from the source (header excluded, capped rows
    /// not counted)
    pub rows_total: u64,
    /// Rows where the label key was found with a string value, even an
    /// empty one
    pub rows_with_attribute: u64,
    /// Rows with a usable image id but no attribute (empty label cell,
    /// or key absent from a well-formed blob)
    pub rows_missing_attribute: u64,
    /// Rows skipped because the label blob failed to parse
    pub rows_malformed: u64,
}

/// Streaming pass #1: reduces a scan report to unique
/// (image id, attribute) entries.
///
/// One full pass over the source, row by row; nothing but the dedup set
/// is held in memory.
pub struct Extractor {
    key_column: String,
    label_column: String,
    label_key: String,
    max_rows: Option<u64>,
}

impl Extractor {
    pub fn new(
        key_column: impl Into<String>,
        label_column: impl Into<String>,
        label_key: impl Into<String>,
        max_rows: Option<u64>,
    ) -> Self {
        Self {
            key_column: key_column.into(),
            label_column: label_column.into(),
            label_key: label_key.into(),
            max_rows,
        }
    }

    /// Runs the extraction pass.
    ///
    /// # Arguments
    /// * `input` - the source report CSV (header row required)
    /// * `on_progress` - invoked every [`PROGRESS_EVERY_ROWS`] rows
    ///
    /// # Returns
    /// The insertion-ordered dedup set and the pass counters.
    ///
    /// # Errors
    /// Returns an error on any CSV-level read failure. A per-row JSON
    /// parse failure is never an error; the row is skipped and counted.
    pub fn run<R: io::Read>(
        &self,
        input: R,
        mut on_progress: impl FnMut(&ExtractionStats),
    ) -> Result<(UniqueEntrySet, ExtractionStats)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let key_idx = column_index(&headers, &self.key_column);
        let label_idx = column_index(&headers, &self.label_column);

        let mut entries = UniqueEntrySet::new();
        let mut stats = ExtractionStats::default();

        for result in reader.records() {
            if self.max_rows.is_some_and(|max| stats.rows_total >= max) {
                break;
            }
            let record = result?;
            stats.rows_total += 1;

            if stats.rows_total % PROGRESS_EVERY_ROWS == 0 {
                on_progress(&stats);
            }

            // Rows without a usable image id never participate.
            let image_id = field(&record, key_idx).trim();
            if image_id.is_empty() {
                continue;
            }

            let raw_labels = field(&record, label_idx).trim();
            let attribute: Option<String> = if raw_labels.is_empty() {
                None
            } else {
                match LabelBlob::parse(raw_labels) {
                    Ok(blob) => blob.attribute(&self.label_key).map(str::to_string),
                    Err(_) => {
                        // Malformed blob: the whole row is dropped from
                        // consideration, not treated as attribute-absent.
                        stats.rows_malformed += 1;
                        continue;
                    }
                }
            };

            match attribute {
                Some(_) => stats.rows_with_attribute += 1,
                None => stats.rows_missing_attribute += 1,
            }

            entries.insert_first_seen(image_id, attribute.as_deref());
        }

        Ok((entries, stats))
    }
}

/// Index of the first header cell matching `name`, if any. A column
/// missing from the header reads as empty for every row.
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

/// Field by resolved index; missing fields in ragged rows read as "".
fn field<'r>(record: &'r StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn extractor() -> Extractor {
        Extractor::new("Image ID", "Container Labels", "MAINTAINER", None)
    }

    fn run(source: &str) -> (UniqueEntrySet, ExtractionStats) {
        extractor().run(Cursor::new(source), |_| {}).unwrap()
    }

    #[test]
    fn test_counts_all_data_rows() {
        let source = "Image ID,Container Labels\n\
                      img1,\n\
                      img2,\n\
                      img3,\n";
        let (_, stats) = run(source);
        assert_eq!(stats.rows_total, 3);
    }

    #[test]
    fn test_extracts_attribute_from_label_blob() {
        let source = "Image ID,Container Labels\n\
                      img1,\"{\"\"MAINTAINER\"\": \"\"alice\"\"}\"\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_with_attribute, 1);
        assert_eq!(stats.rows_missing_attribute, 0);
        assert_eq!(entries.len(), 1);
        let entry = entries.iter().next().unwrap();
        assert_eq!(entry.image_id, "img1");
        assert_eq!(entry.attribute.as_deref(), Some("alice"));
    }

    #[test]
    fn test_empty_label_cell_is_missing_not_malformed() {
        let source = "Image ID,Container Labels\n\
                      img1,\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_missing_attribute, 1);
        assert_eq!(stats.rows_malformed, 0);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.iter().next().unwrap().attribute, None);
    }

    #[test]
    fn test_key_absent_from_blob_is_missing() {
        let source = "Image ID,Container Labels\n\
                      img1,\"{\"\"team\"\": \"\"infra\"\"}\"\n";
        let (_, stats) = run(source);
        assert_eq!(stats.rows_with_attribute, 0);
        assert_eq!(stats.rows_missing_attribute, 1);
    }

    #[test]
    fn test_malformed_blob_skips_row_entirely() {
        let source = "Image ID,Container Labels\n\
                      img1,{bad json\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_total, 1);
        assert_eq!(stats.rows_with_attribute, 0);
        assert_eq!(stats.rows_missing_attribute, 0);
        assert_eq!(stats.rows_malformed, 1);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_blank_image_id_skips_row() {
        let source = "Image ID,Container Labels\n\
                      ,\"{\"\"MAINTAINER\"\": \"\"alice\"\"}\"\n\
                      \"   \",\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_total, 2);
        assert_eq!(stats.rows_with_attribute, 0);
        assert_eq!(stats.rows_missing_attribute, 0);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_max_rows_caps_consumption() {
        let source = "Image ID,Container Labels\n\
                      img1,\n\
                      img2,\n\
                      img3,\n";
        let limited = Extractor::new("Image ID", "Container Labels", "MAINTAINER", Some(2));
        let (entries, stats) = limited.run(Cursor::new(source), |_| {}).unwrap();
        assert_eq!(stats.rows_total, 2);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_duplicate_rows_collapse_to_one_entry() {
        let source = "Image ID,Container Labels\n\
                      img1,\"{\"\"MAINTAINER\"\": \"\"alice\"\"}\"\n\
                      img1,\"{\"\"MAINTAINER\"\": \"\"alice\"\"}\"\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_total, 2);
        assert_eq!(stats.rows_with_attribute, 2);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_label_column_reads_as_empty() {
        let source = "Image ID,Severity\n\
                      img1,HIGH\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_missing_attribute, 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_ragged_row_reads_missing_fields_as_empty() {
        let source = "Image ID,Severity,Container Labels\n\
                      img1,HIGH\n";
        let (entries, stats) = run(source);
        assert_eq!(stats.rows_total, 1);
        assert_eq!(stats.rows_missing_attribute, 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_progress_cadence() {
        let mut source = String::from("Image ID,Container Labels\n");
        for i in 0..25_000 {
            source.push_str(&format!("img{},\n", i));
        }
        let mut calls = Vec::new();
        extractor()
            .run(Cursor::new(source), |stats| calls.push(stats.rows_total))
            .unwrap();
        assert_eq!(calls, vec![10_000, 20_000]);
    }
}
