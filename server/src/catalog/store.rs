//! In-memory entry collection.
//!
//! # Thread Safety
//!
//! Entries live behind a `RwLock`: `list` and `get` share the read lock,
//! `add` and `remove` take the write lock. `add` holds the write lock across
//! id assignment and append so concurrent adds can never hand out the same id.
//!
//! # Invariants
//!
//! - Entry ids are unique at all times.
//! - Insertion order is preserved.
//! - New ids are `max(existing ids) + 1`, or `1` when empty. Removing the
//!   highest id therefore lets the next `add` reuse it. Once an entry holds
//!   `EntryId::MAX`, `add` fails instead of wrapping.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::entry::{CatalogEntry, EntryId, seed_entries};

/// Error returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entry has this id.
    NotFound(EntryId),
    /// The highest id in use is `EntryId::MAX`, so `max+1` has no value.
    IdSpaceExhausted,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "anime with id={id} not found"),
            Self::IdSpaceExhausted => write!(f, "no anime id left above {}", EntryId::MAX),
        }
    }
}

impl std::error::Error for StoreError {}

/// The authoritative, process-local collection of catalog entries.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the three seed entries.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_entries(seed_entries())
    }

    /// Create a catalog from existing entries.
    ///
    /// # Panics
    /// Panics if an id is not positive or two entries share an id.
    #[must_use]
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        for (index, entry) in entries.iter().enumerate() {
            assert!(entry.id > 0, "non-positive catalog id {}", entry.id);
            assert!(
                entries[..index].iter().all(|other| other.id != entry.id),
                "duplicate catalog id {}",
                entry.id
            );
        }
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<CatalogEntry> {
        self.read().clone()
    }

    /// The entry with `id`.
    pub fn get(&self, id: EntryId) -> Result<CatalogEntry, StoreError> {
        self.read()
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Store `entry` under a freshly assigned id and return the stored copy.
    ///
    /// Fails with `IdSpaceExhausted` once an entry holds `EntryId::MAX`.
    pub fn add(&self, mut entry: CatalogEntry) -> Result<CatalogEntry, StoreError> {
        let mut entries = self.write();
        entry.id = match entries.iter().map(|existing| existing.id).max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?,
            None => 1,
        };
        entries.push(entry.clone());
        drop(entries);
        Ok(entry)
    }

    /// Delete the entry with `id`.
    pub fn remove(&self, id: EntryId) -> Result<(), StoreError> {
        let mut entries = self.write();
        let position = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(StoreError::NotFound(id))?;
        entries.remove(position);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panicking writer cannot leave the Vec half-updated, so poisoned
    // guards are safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Vec<CatalogEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CatalogEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn sample() -> CatalogEntry {
        CatalogEntry::new("Mushishi", "Мистика", 2005, 8.7)
    }

    fn ids(catalog: &Catalog) -> Vec<EntryId> {
        catalog.list().iter().map(|entry| entry.id).collect()
    }

    #[test]
    fn test_seeded_catalog_lists_three_entries() {
        let catalog = Catalog::seeded();
        let entries = catalog.list();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "Attack on Titan");
        assert_eq!(entries[1].title, "Death Note");
        assert_eq!(entries[2].title, "Naruto");
        assert_eq!(ids(&catalog), vec![1, 2, 3]);
    }

    #[test]
    fn test_get_existing() {
        let catalog = Catalog::seeded();
        let entry = catalog.get(2).expect("entry 2 exists");

        assert_eq!(entry.title, "Death Note");
        assert_eq!(entry.genre, "Детектив");
        assert_eq!(entry.year, 2006);
    }

    #[test]
    fn test_get_missing() {
        let catalog = Catalog::seeded();

        assert_eq!(catalog.get(0), Err(StoreError::NotFound(0)));
        assert_eq!(catalog.get(42), Err(StoreError::NotFound(42)));
    }

    #[test]
    fn test_remove_missing() {
        let catalog = Catalog::seeded();

        assert_eq!(catalog.remove(42), Err(StoreError::NotFound(42)));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let catalog = Catalog::seeded();
        let stored = catalog.add(sample()).expect("id available");

        assert_eq!(stored.id, 4);
        assert_eq!(catalog.get(4), Ok(stored));
    }

    #[test]
    fn test_add_then_get_returns_input_with_assigned_id() {
        let catalog = Catalog::seeded();
        let input = sample();

        let stored = catalog.add(input.clone()).expect("id available");
        let fetched = catalog.get(stored.id).expect("stored entry");

        assert_eq!(fetched, input.with_id(stored.id));
    }

    #[test]
    fn test_add_overwrites_caller_id() {
        let catalog = Catalog::seeded();
        let stored = catalog.add(sample().with_id(2)).expect("id available");

        assert_eq!(stored.id, 4);
        assert_eq!(catalog.get(2).expect("seed entry").title, "Death Note");
    }

    #[test]
    fn test_add_to_empty_catalog_starts_at_one() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());

        let stored = catalog.add(sample()).expect("id available");
        assert_eq!(stored.id, 1);
    }

    #[test]
    fn test_remove_then_add_reuses_highest_id() {
        let catalog = Catalog::seeded();

        catalog.remove(3).expect("entry 3 exists");
        let stored = catalog.add(sample()).expect("id available");

        assert_eq!(stored.id, 3);
        assert_eq!(ids(&catalog), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_middle_does_not_reuse_gap() {
        let catalog = Catalog::seeded();

        catalog.remove(2).expect("entry 2 exists");
        let stored = catalog.add(sample()).expect("id available");

        assert_eq!(stored.id, 4);
        assert_eq!(ids(&catalog), vec![1, 3, 4]);
    }

    #[test]
    fn test_ids_stay_unique_across_mixed_operations() {
        let catalog = Catalog::seeded();

        for round in 0..20u32 {
            catalog.add(sample()).expect("id available");
            if round % 3 == 0 {
                let highest = *ids(&catalog).iter().max().expect("non-empty");
                catalog.remove(highest).expect("highest exists");
            }
            if round % 5 == 0 {
                catalog.remove(ids(&catalog)[0]).expect("first exists");
            }

            let all = ids(&catalog);
            let unique: HashSet<EntryId> = all.iter().copied().collect();
            assert_eq!(unique.len(), all.len(), "duplicate id after round {round}");
        }
    }

    #[test]
    fn test_concurrent_adds_assign_distinct_ids() {
        let catalog = Arc::new(Catalog::seeded());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| catalog.add(sample()).expect("id available").id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut assigned = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("thread completed") {
                assert!(assigned.insert(id), "id {id} assigned twice");
            }
        }

        assert_eq!(assigned.len(), 400);
        assert_eq!(catalog.len(), 403);
    }

    #[test]
    #[should_panic(expected = "duplicate catalog id 1")]
    fn test_with_entries_rejects_duplicate_ids() {
        let _ = Catalog::with_entries(vec![sample().with_id(1), sample().with_id(1)]);
    }

    #[test]
    fn test_add_after_max_id_is_exhausted() {
        let catalog = Catalog::with_entries(vec![sample().with_id(EntryId::MAX)]);

        assert_eq!(catalog.add(sample()), Err(StoreError::IdSpaceExhausted));
        assert_eq!(ids(&catalog), vec![EntryId::MAX]);
    }

    #[test]
    fn test_add_just_below_max_id() {
        let catalog = Catalog::with_entries(vec![sample().with_id(EntryId::MAX - 1)]);

        let stored = catalog.add(sample()).expect("one id left");
        assert_eq!(stored.id, EntryId::MAX);
    }

    #[test]
    #[should_panic(expected = "non-positive catalog id -1")]
    fn test_with_entries_rejects_negative_ids() {
        let _ = Catalog::with_entries(vec![sample().with_id(-1)]);
    }

    #[test]
    fn test_get_negative_id_is_not_found() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.get(-1), Err(StoreError::NotFound(-1)));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            StoreError::NotFound(7).to_string(),
            "anime with id=7 not found"
        );
    }
}
