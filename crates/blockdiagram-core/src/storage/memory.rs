//! In-memory storage implementation.

use super::{DiagramFormat, Storage, StorageError, StorageResult, decode, encode};
use crate::canvas::CanvasDocument;
use crate::config::CanvasConfig;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory storage for testing and scratch use.
///
/// Documents are kept encoded, so loading goes through the same codec as
/// files do.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded text stored under `name`.
    pub fn raw(&self, name: &str) -> StorageResult<Option<String>> {
        let docs = self.read()?;
        Ok(docs.get(name).cloned())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.documents
            .read()
            .map_err(|e| StorageError::Io(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.documents
            .write()
            .map_err(|e| StorageError::Io(format!("Lock error: {}", e)))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, document: &CanvasDocument) -> StorageResult<()> {
        let text = encode(document, DiagramFormat::from_name(name))?;
        self.write()?.insert(name.to_string(), text);
        Ok(())
    }

    fn load(&self, name: &str, config: &CanvasConfig) -> StorageResult<CanvasDocument> {
        let text = self
            .raw(name)?
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        let mut document = decode(&text, DiagramFormat::from_name(name), config)?;
        document.name = name.to_string();
        Ok(document)
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        self.write()?.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.read()?.contains_key(name))
    }
}
