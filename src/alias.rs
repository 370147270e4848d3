//! Alias management
//!
//! Every mutation is a full read-modify-write of the [`AliasStore`]. A failed
//! precondition leaves the file untouched.

use crate::config::{AliasEntry, AliasStore};
use crate::error::Result;

/// Adds and removes alias bindings in an [`AliasStore`]
pub struct AliasManager<'a> {
    store: &'a AliasStore,
}

impl<'a> AliasManager<'a> {
    /// Create a new alias manager
    pub fn new(store: &'a AliasStore) -> Self {
        Self { store }
    }

    /// Current alias bindings in file order
    pub fn list_aliases(&self) -> Vec<AliasEntry> {
        self.store.load().alias_list
    }

    /// Bind `alias` to `uuid`
    ///
    /// The UUID is not checked against the current inventory.
    pub fn add_alias(&self, alias: &str, uuid: &str) -> Result<()> {
        let mut config = self.store.load();
        config.add_alias(AliasEntry::new(alias, uuid))?;
        self.store.save(&config)?;

        log::info!("Added alias {} -> {}", alias, uuid);
        Ok(())
    }

    /// Delete the binding named `alias`
    pub fn remove_alias(&self, alias: &str) -> Result<AliasEntry> {
        let mut config = self.store.load();
        let removed = config.remove_alias(alias)?;
        self.store.save(&config)?;

        log::info!("Removed alias {} -> {}", removed.alias, removed.uuid);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiskError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::new(dir.path());
        let manager = AliasManager::new(&store);

        manager.add_alias("data", "abc-123").unwrap();
        manager.add_alias("backup", "def-456").unwrap();

        assert_eq!(
            manager.list_aliases(),
            vec![
                AliasEntry::new("data", "abc-123"),
                AliasEntry::new("backup", "def-456"),
            ]
        );
    }

    #[test]
    fn test_add_then_remove_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::new(dir.path());
        let manager = AliasManager::new(&store);
        manager.add_alias("data", "abc-123").unwrap();
        let before = store.load();

        manager.add_alias("backup", "def-456").unwrap();
        manager.remove_alias("backup").unwrap();

        assert_eq!(store.load(), before);
    }

    #[test]
    fn test_duplicate_add_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::new(dir.path());
        let manager = AliasManager::new(&store);
        manager.add_alias("data", "abc-123").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = manager.add_alias("data", "def-456").unwrap_err();

        assert!(matches!(err, DiskError::AliasExists { .. }));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_remove_unknown_alias() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::new(dir.path());
        let manager = AliasManager::new(&store);

        let err = manager.remove_alias("nope").unwrap_err();

        assert!(matches!(err, DiskError::AliasNotFound(ref a) if a == "nope"));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_stale_uuid_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::new(dir.path());
        let manager = AliasManager::new(&store);

        manager.add_alias("old", "no-such-uuid").unwrap();
        assert_eq!(manager.list_aliases().len(), 1);
    }
}
