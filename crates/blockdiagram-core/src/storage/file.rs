//! File-based storage.

use super::{DiagramFormat, Storage, StorageError, StorageResult, decode, encode};
use crate::canvas::CanvasDocument;
use crate::config::CanvasConfig;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Stores diagrams as files in a base directory.
pub struct FileStorage {
    /// Base directory for diagram files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Storage rooted at the directory holding `path`, plus the file name to
    /// use with it.
    pub fn for_path(path: &Path) -> StorageResult<(Self, String)> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StorageError::Io(format!("Not a file path: {}", path.display())))?
            .to_string();
        let base = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(base)?, name))
    }

    /// Get the file path for a document name.
    ///
    /// The name must be a single plain file name; other characters are kept.
    fn document_path(&self, name: &str) -> StorageResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_path.join(name)),
            _ => Err(StorageError::Io(format!("Not a file name: {name}"))),
        }
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, name: &str, document: &CanvasDocument) -> StorageResult<()> {
        let path = self.document_path(name)?;
        let text = encode(document, DiagramFormat::from_name(name))?;
        fs::write(&path, text)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    fn load(&self, name: &str, config: &CanvasConfig) -> StorageResult<CanvasDocument> {
        let path = self.document_path(name)?;
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut document = decode(&text, DiagramFormat::from_name(name), config)?;
        document.name = name.to_string();
        log::info!("Loaded {}", path.display());
        Ok(document)
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.document_path(name)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.document_path(name)?.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellTag, WriteMode};
    use tempfile::tempdir;

    fn document() -> CanvasDocument {
        let mut doc = CanvasDocument::with_config(&CanvasConfig::default());
        doc.grid.set(1, 0, '─', Some(CellTag::ArrowHorizontal), WriteMode::Commit);
        doc.grid.set(2, 0, '►', Some(CellTag::HeadRight), WriteMode::Commit);
        doc
    }

    #[test]
    fn test_file_storage_save_load_structured() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let config = CanvasConfig::default();

        storage.save("diagram.json", &document()).unwrap();
        let text = fs::read_to_string(dir.path().join("diagram.json")).unwrap();
        assert!(text.starts_with("// ─►\n\n{"));

        let loaded = storage.load("diagram.json", &config).unwrap();
        assert_eq!(loaded.name, "diagram.json");
        assert_eq!(loaded.grid.tag(2, 0), Some(CellTag::HeadRight));
    }

    #[test]
    fn test_file_storage_plain_text() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.save("diagram.txt", &document()).unwrap();
        let text = fs::read_to_string(dir.path().join("diagram.txt")).unwrap();
        assert_eq!(text, " ─►");

        let loaded = storage.load("diagram.txt", &CanvasConfig::default()).unwrap();
        assert_eq!(loaded.grid.get(2, 0).glyph, '►');
        assert_eq!(loaded.grid.tag(2, 0), None);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let result = storage.load("missing.json", &CanvasConfig::default());
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_list_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.save("b.txt", &document()).unwrap();
        storage.save("a.json", &document()).unwrap();
        assert_eq!(storage.list().unwrap(), vec!["a.json", "b.txt"]);

        storage.delete("a.json").unwrap();
        assert!(!storage.exists("a.json").unwrap());
        storage.delete("a.json").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_paths() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        for name in ["../escape.txt", "sub/d.txt", "..", ""] {
            assert!(matches!(storage.save(name, &document()), Err(StorageError::Io(_))), "{name}");
        }
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn test_file_name_kept_as_given() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("my diagram #1.json");
        let (storage, name) = FileStorage::for_path(&path).unwrap();

        storage.save(&name, &document()).unwrap();
        assert!(path.is_file());
        assert_eq!(storage.list().unwrap(), vec!["my diagram #1.json"]);

        let loaded = storage.load(&name, &CanvasConfig::default()).unwrap();
        assert_eq!(loaded.name, "my diagram #1.json");
        assert_eq!(loaded.grid.tag(2, 0), Some(CellTag::HeadRight));
    }

    #[test]
    fn test_for_path_splits_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("d.json");
        let (storage, name) = FileStorage::for_path(&nested).unwrap();

        assert_eq!(name, "d.json");
        assert_eq!(storage.base_path(), dir.path().join("out"));
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn test_bad_file_does_not_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "// x\n\n{\"drawing\": ").unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let result = storage.load("bad.json", &CanvasConfig::default());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
