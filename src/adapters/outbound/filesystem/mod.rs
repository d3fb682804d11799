mod artifact_writer;
mod lookup_store;

pub use artifact_writer::GzipArtifactWriter;
pub use lookup_store::CsvLookupStore;
