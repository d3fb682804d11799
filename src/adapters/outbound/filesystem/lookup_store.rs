use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use csv::{ReaderBuilder, Writer};

use crate::label_enrichment::domain::LookupTable;
use crate::shared::error::EnrichError;
use crate::shared::Result;

/// CsvLookupStore adapter for the intermediate lookup file
///
/// The intermediate file is the sole hand-off between the extraction and
/// merge stages: a two-column CSV with header `<key column>,<attribute
/// column>`, one row per distinct image with a known attribute value.
/// Both stages run as independent, restartable operations against this
/// documented format.
pub struct CsvLookupStore;

impl CsvLookupStore {
    pub fn new() -> Self {
        Self
    }

    /// Writes the lookup table, preserving its insertion order so the
    /// file is byte-identical across runs on unchanged input.
    pub fn write(
        &self,
        path: &Path,
        key_column: &str,
        attribute_column: &str,
        table: &LookupTable,
    ) -> Result<()> {
        let file = File::create(path).map_err(|e| EnrichError::FileWrite {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let mut writer = Writer::from_writer(BufWriter::new(file));

        let write_err = |details: String| EnrichError::FileWrite {
            path: path.to_path_buf(),
            details,
        };

        writer
            .write_record([key_column, attribute_column])
            .map_err(|e| write_err(e.to_string()))?;
        for (image_id, value) in table.iter() {
            writer
                .write_record([image_id, value])
                .map_err(|e| write_err(e.to_string()))?;
        }
        writer.flush().map_err(|e| write_err(e.to_string()))?;

        Ok(())
    }

    /// Loads the lookup table fully into memory, keyed by `key_column`
    /// with values from `attribute_column`.
    ///
    /// Rows lacking the key column are ignored; a missing value column
    /// reads as the empty string. This is a small table by construction,
    /// one entry per distinct image.
    pub fn read(&self, path: &Path, key_column: &str, attribute_column: &str) -> Result<LookupTable> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EnrichError::InputNotFound {
                path: path.to_path_buf(),
                suggestion: "Run 'scan-enrich extract' first to produce the lookup table"
                    .to_string(),
            },
            _ => EnrichError::FileRead {
                path: path.to_path_buf(),
                details: e.to_string(),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| EnrichError::ReportParse {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?
            .clone();
        let key_idx = headers.iter().position(|header| header == key_column);
        let value_idx = headers.iter().position(|header| header == attribute_column);

        let mut table = LookupTable::new();
        for result in reader.records() {
            let record = result.map_err(|e| EnrichError::ReportParse {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
            let image_id = match key_idx.and_then(|i| record.get(i)) {
                Some(id) if !id.is_empty() => id,
                _ => continue,
            };
            let value = value_idx.and_then(|i| record.get(i)).unwrap_or("");
            table.insert(image_id, value);
        }

        Ok(table)
    }
}

impl Default for CsvLookupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");

        let mut table = LookupTable::new();
        table.insert("img1", "alice");
        table.insert("img2", "bob");

        let store = CsvLookupStore::new();
        store.write(&path, "Image ID", "Maintainer", &table).unwrap();
        let reloaded = store.read(&path, "Image ID", "Maintainer").unwrap();

        assert_eq!(reloaded.get("img1"), Some("alice"));
        assert_eq!(reloaded.get("img2"), Some("bob"));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_write_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");

        let mut table = LookupTable::new();
        table.insert("img2", "bob");
        table.insert("img1", "alice");

        CsvLookupStore::new()
            .write(&path, "Image ID", "Maintainer", &table)
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Image ID,Maintainer\nimg2,bob\nimg1,alice\n");
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let first_path = dir.path().join("first.csv");
        let second_path = dir.path().join("second.csv");

        let mut table = LookupTable::new();
        table.insert("img3", "carol");
        table.insert("img1", "alice");

        let store = CsvLookupStore::new();
        store
            .write(&first_path, "Image ID", "Maintainer", &table)
            .unwrap();
        store
            .write(&second_path, "Image ID", "Maintainer", &table)
            .unwrap();

        let first = std::fs::read(&first_path).unwrap();
        let second = std::fs::read(&second_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_missing_file_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");

        let result = CsvLookupStore::new().read(&path, "Image ID", "Maintainer");
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Input file not found"));
        assert!(err.contains("scan-enrich extract"));
    }

    #[test]
    fn test_read_skips_rows_without_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");
        std::fs::write(&path, "Image ID,Maintainer\n,orphan\nimg1,alice\n").unwrap();

        let table = CsvLookupStore::new()
            .read(&path, "Image ID", "Maintainer")
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("img1"), Some("alice"));
    }

    #[test]
    fn test_read_missing_value_column_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");
        std::fs::write(&path, "Image ID\nimg1\n").unwrap();

        let table = CsvLookupStore::new()
            .read(&path, "Image ID", "Maintainer")
            .unwrap();
        assert_eq!(table.get("img1"), Some(""));
    }
}
