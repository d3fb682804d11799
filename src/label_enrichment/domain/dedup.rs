use indexmap::IndexMap;

/// Deduplication key for one source row: the (image id, attribute) pair.
///
/// An absent attribute is distinct from every present value, including
/// the empty string, so `(img, None)` and `(img, Some(""))` are two
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    image_id: String,
    attribute: Option<String>,
}

impl DedupKey {
    pub fn new(image_id: impl Into<String>, attribute: Option<String>) -> Self {
        Self {
            image_id: image_id.into(),
            attribute,
        }
    }
}

/// The first-seen record for a DedupKey.
///
/// Created once per distinct key during the extraction pass and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueEntry {
    pub image_id: String,
    pub attribute: Option<String>,
}

impl UniqueEntry {
    /// Whether this entry belongs to the "has attribute" partition:
    /// attribute present and non-empty.
    pub fn has_attribute(&self) -> bool {
        self.attribute.as_deref().is_some_and(|value| !value.is_empty())
    }
}

/// Insertion-ordered set of unique (image id, attribute) entries.
///
/// First-seen wins: inserting an already-present key is a no-op. The
/// insertion order is observable downstream because the lookup table is
/// built by replaying entries in this order.
#[derive(Debug, Default)]
pub struct UniqueEntrySet {
    entries: IndexMap<DedupKey, UniqueEntry>,
}

impl UniqueEntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the entry if its key has not been seen yet.
    ///
    /// # Returns
    /// `true` if the entry was inserted, `false` if the key was already
    /// present (the duplicate is silently dropped).
    pub fn insert_first_seen(&mut self, image_id: &str, attribute: Option<&str>) -> bool {
        let key = DedupKey::new(image_id, attribute.map(str::to_string));
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(
            key,
            UniqueEntry {
                image_id: image_id.to_string(),
                attribute: attribute.map(str::to_string),
            },
        );
        true
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &UniqueEntry> {
        self.entries.values()
    }

    /// Counts of the "has attribute" / "missing attribute" partitions.
    pub fn partition_counts(&self) -> (usize, usize) {
        let with = self.iter().filter(|entry| entry.has_attribute()).count();
        (with, self.len() - with)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
