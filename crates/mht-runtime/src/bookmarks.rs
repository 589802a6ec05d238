// crates/mht-runtime/src/bookmarks.rs
use tracing::{debug, error, warn};

use crate::storage::{KeyValueStore, StorageResult};

/// Which guidelines screen owns a bookmark list. Each keeps its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookmarkScope {
    #[default]
    Combined,
    Professional,
}

impl BookmarkScope {
    pub fn storage_key(&self) -> &'static str {
        match self {
            BookmarkScope::Combined => "mht_combined_guidelines_bookmarks",
            BookmarkScope::Professional => "mht_professional_guidelines_bookmarks",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BookmarkScope::Combined => "combined",
            BookmarkScope::Professional => "professional",
        }
    }
}

/// Bookmarked guideline ids in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    ids: Vec<String>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate ids keep their first position.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Strict parse of the persisted form, a JSON array of strings.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let ids: Vec<String> = serde_json::from_str(raw)?;
        Ok(Self::from_ids(ids))
    }

    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.ids.clone()).to_string()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Add `id` if absent, remove it if present. Returns whether `id` is
    /// bookmarked afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(index) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Loads and saves one screen's [`BookmarkSet`] through a [`KeyValueStore`].
///
/// Nothing here is fatal: unreadable or malformed data loads as an empty
/// set and failed writes are logged while the caller keeps its in-memory
/// set.
pub struct BookmarkRepository<S> {
    store: S,
    scope: BookmarkScope,
}

impl<S: KeyValueStore> BookmarkRepository<S> {
    pub fn new(store: S, scope: BookmarkScope) -> Self {
        Self { store, scope }
    }

    pub fn scope(&self) -> BookmarkScope {
        self.scope
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn load(&self) -> BookmarkSet {
        let key = self.scope.storage_key();
        match self.store.get_item(key).await {
            Ok(None) => BookmarkSet::new(),
            Ok(Some(raw)) => match BookmarkSet::from_json(&raw) {
                Ok(set) => {
                    debug!("Loaded {} bookmarks from {}", set.len(), key);
                    set
                }
                Err(err) => {
                    warn!("Ignoring malformed bookmarks under {}: {}", key, err);
                    BookmarkSet::new()
                }
            },
            Err(err) => {
                error!("Failed to read bookmarks under {}: {}", key, err);
                BookmarkSet::new()
            }
        }
    }

    pub async fn save(&self, set: &BookmarkSet) -> StorageResult<()> {
        self.store.set_item(self.scope.storage_key(), &set.to_json()).await
    }

    /// Toggle `id` in `set` and persist the result. The in-memory change
    /// stands even when the write fails.
    pub async fn toggle(&self, set: &mut BookmarkSet, id: &str) -> bool {
        let bookmarked = set.toggle(id);
        if let Err(err) = self.save(set).await {
            error!(
                "Failed to save bookmarks under {}: {}",
                self.scope.storage_key(),
                err
            );
        }
        bookmarked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use pollster::block_on;

    #[test]
    fn test_toggle_twice_restores() {
        let mut set = BookmarkSet::from_ids(["a"]);
        assert!(set.toggle("b"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!set.toggle("b"));
        assert_eq!(set, BookmarkSet::from_ids(["a"]));
    }

    #[test]
    fn test_from_ids_dedupes() {
        let set = BookmarkSet::from_ids(["a", "b", "a"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_json(), r#"["a","b"]"#);
    }

    #[test]
    fn test_scopes_use_distinct_keys() {
        assert_ne!(
            BookmarkScope::Combined.storage_key(),
            BookmarkScope::Professional.storage_key()
        );
    }

    #[test]
    fn test_toggle_persists_json_array() {
        let store = MemoryStore::new().with_item(BookmarkScope::Combined.storage_key(), r#"["a"]"#);
        let repository = BookmarkRepository::new(&store, BookmarkScope::Combined);

        let mut set = block_on(repository.load());
        assert!(block_on(repository.toggle(&mut set, "b")));
        assert_eq!(
            store.snapshot("mht_combined_guidelines_bookmarks").as_deref(),
            Some(r#"["a","b"]"#)
        );
        assert_eq!(store.snapshot("mht_professional_guidelines_bookmarks"), None);
    }

    #[test]
    fn test_malformed_data_loads_empty() {
        for raw in ["not json", r#"{"a":1}"#, "[1,2]", "\"a\""] {
            let store = MemoryStore::new().with_item(BookmarkScope::Professional.storage_key(), raw);
            let repository = BookmarkRepository::new(store, BookmarkScope::Professional);
            assert!(block_on(repository.load()).is_empty(), "input {raw}");
        }
    }
}
