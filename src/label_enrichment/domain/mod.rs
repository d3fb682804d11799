/// Domain models for label enrichment
mod dedup;
mod label_blob;
mod lookup_table;

pub use dedup::{DedupKey, UniqueEntry, UniqueEntrySet};
pub use label_blob::LabelBlob;
pub use lookup_table::LookupTable;
