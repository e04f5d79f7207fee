use std::cell::RefCell;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::recipe::Recipe;

/// File name of the persisted recipe list inside the data directory
pub const RECIPES_FILE: &str = "recipes.json";

/// Error type for recipe persistence
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize recipes: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where the recipe list lives between sessions.
///
/// `load` runs once when a store opens; `save` runs after every change and
/// overwrites whatever was there.
pub trait RecipeStorage {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<Vec<Recipe>>, StorageError>;
    fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError>;
}

/// `recipes.json` in a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStorage { path }
    }

    /// Storage at `<data_dir>/recipes.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        JsonFileStorage::new(data_dir.join(RECIPES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy an unreadable file aside as `recipes.json.bak`
    fn back_up_corrupt(&self, err: &serde_json::Error) {
        let bak = self.path.with_extension("json.bak");
        let _ = fs::copy(&self.path, &bak);
        tracing::warn!(
            path = %self.path.display(),
            backup = %bak.display(),
            "could not parse stored recipes, starting empty: {err}"
        );
    }
}

impl RecipeStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Recipe>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        match serde_json::from_str::<Vec<Recipe>>(&content) {
            Ok(recipes) => Ok(Some(recipes)),
            Err(e) => {
                self.back_up_corrupt(&e);
                Ok(None)
            }
        }
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        let write_err = |source: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        let encoded = serde_json::to_string_pretty(recipes)?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(encoded.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// Storage that lives only as long as the value; used by tests and by
/// callers that want a throwaway store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: RefCell<Option<Vec<Recipe>>>,
    saves: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Start with an already-persisted list
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        MemoryStorage {
            saved: RefCell::new(Some(recipes)),
            saves: RefCell::new(0),
        }
    }

    /// What the last save wrote
    pub fn saved(&self) -> Option<Vec<Recipe>> {
        self.saved.borrow().clone()
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl RecipeStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Recipe>>, StorageError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        *self.saved.borrow_mut() = Some(recipes.to_vec());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

impl<S: RecipeStorage + ?Sized> RecipeStorage for &S {
    fn load(&self) -> Result<Option<Vec<Recipe>>, StorageError> {
        (**self).load()
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        (**self).save(recipes)
    }
}

impl<S: RecipeStorage + ?Sized> RecipeStorage for Box<S> {
    fn load(&self) -> Result<Option<Vec<Recipe>>, StorageError> {
        (**self).load()
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        (**self).save(recipes)
    }
}
