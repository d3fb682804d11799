use indexmap::IndexMap;

use super::dedup::UniqueEntrySet;

/// The deduplicated Image ID → attribute-value mapping that is the
/// extraction pass's sole output artifact.
///
/// Only entries whose attribute is present and non-empty make it into
/// the table. Insertion order is preserved so the serialized form is
/// identical across runs on the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: IndexMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from the with-attribute partition of the dedup
    /// set, replayed in insertion order.
    ///
    /// When the source contained the same image id with two different
    /// non-empty attributes, the later entry overwrites the earlier one:
    /// last-write-wins, not first. That matches the observed behavior of
    /// both production deployments of this pipeline and must not be
    /// changed without a product decision.
    pub fn from_unique_entries(entries: &UniqueEntrySet) -> Self {
        let mut table = Self::new();
        for entry in entries.iter().filter(|entry| entry.has_attribute()) {
            if let Some(value) = entry.attribute.as_deref() {
                table.insert(&entry.image_id, value);
            }
        }
        table
    }

    /// Inserts a mapping, overwriting any existing value for the id.
    pub fn insert(&mut self, image_id: &str, value: &str) {
        self.entries
            .insert(image_id.to_string(), value.to_string());
    }

    pub fn get(&self, image_id: &str) -> Option<&str> {
        self.entries.get(image_id).map(String::as_str)
    }

    /// Iterates (image id, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, value)| (id.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
