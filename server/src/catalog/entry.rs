use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// Identifier of a catalog entry. Always positive once assigned.
pub type EntryId = i32;

/// A single anime record.
///
/// `id` is assigned by the catalog. Whatever a request body carries under
/// `id` is discarded on input, and it may be omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "discard_id")]
    pub id: EntryId,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub rating: f64,
}

impl CatalogEntry {
    /// Build an entry that has not been stored yet.
    #[must_use]
    pub fn new(title: impl Into<String>, genre: impl Into<String>, year: i32, rating: f64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            genre: genre.into(),
            year,
            rating,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }
}

fn discard_id<'de, D>(deserializer: D) -> Result<EntryId, D::Error>
where
    D: Deserializer<'de>,
{
    IgnoredAny::deserialize(deserializer)?;
    Ok(0)
}

/// Entries every catalog starts with.
#[must_use]
pub fn seed_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Attack on Titan", "Экшен", 2013, 9.1).with_id(1),
        CatalogEntry::new("Death Note", "Детектив", 2006, 9.0).with_id(2),
        CatalogEntry::new("Naruto", "Сёнен", 2002, 8.5).with_id(3),
    ]
}
