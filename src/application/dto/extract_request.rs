use std::path::PathBuf;

/// Request for the extraction use case.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    /// Source report CSV
    pub source_path: PathBuf,
    /// Destination for the lookup-table CSV
    pub output_path: PathBuf,
    /// Header name of the image id column
    pub key_column: String,
    /// Header name of the JSON-encoded label column
    pub label_column: String,
    /// Label key to extract, matched exactly and case-sensitively
    pub label_key: String,
    /// Header name for the extracted attribute in the lookup file
    pub attribute_column: String,
    /// Optional row cap for testing; absent means process to end of file
    pub max_rows: Option<u64>,
}

impl ExtractRequest {
    pub fn new(
        source_path: PathBuf,
        output_path: PathBuf,
        key_column: impl Into<String>,
        label_column: impl Into<String>,
        label_key: impl Into<String>,
        attribute_column: impl Into<String>,
        max_rows: Option<u64>,
    ) -> Self {
        Self {
            source_path,
            output_path,
            key_column: key_column.into(),
            label_column: label_column.into(),
            label_key: label_key.into(),
            attribute_column: attribute_column.into(),
            max_rows,
        }
    }
}
