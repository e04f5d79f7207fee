use crate::api::{ApiError, MealRecord, RecipeSource};
use crate::io::storage::{RecipeStorage, StorageError};
use crate::model::recipe::{Recipe, RecipeId};

/// Shown when the seed fetch fails
pub const BOOTSTRAP_ERROR: &str = "Failed to load recipes";

/// The canonical recipe list for one session.
///
/// Opening the store reads storage once. If nothing (or an empty list) was
/// stored, the store is marked bootstrap-pending: the first call to
/// [`begin_bootstrap`](Self::begin_bootstrap) consumes that mark, so the seed
/// fetch runs at most once per session no matter how often the list is empty
/// afterwards. Every change is written back through the storage hook.
pub struct RecipeStore<S: RecipeStorage> {
    recipes: Vec<Recipe>,
    loading: bool,
    error: Option<String>,
    bootstrap_pending: bool,
    storage: S,
}

impl<S: RecipeStorage> RecipeStore<S> {
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let recipes = storage.load()?.unwrap_or_default();
        let bootstrap_pending = recipes.is_empty();
        tracing::debug!(count = recipes.len(), bootstrap_pending, "opened recipe store");
        Ok(RecipeStore {
            recipes,
            loading: false,
            error: None,
            bootstrap_pending,
            storage,
        })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// First recipe with this id
    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// True while the seed fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Seed fetch failure message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True until the one-shot seed fetch has been started
    pub fn bootstrap_pending(&self) -> bool {
        self.bootstrap_pending
    }

    /// Start the seed fetch if it is still pending. Returns false if it has
    /// already run this session (the caller should not fetch).
    pub fn begin_bootstrap(&mut self) -> bool {
        if !self.bootstrap_pending {
            return false;
        }
        self.bootstrap_pending = false;
        self.loading = true;
        true
    }

    /// Apply the seed fetch result. Success replaces the whole list; failure
    /// sets [`BOOTSTRAP_ERROR`] and leaves the list alone.
    pub fn finish_bootstrap(
        &mut self,
        result: Result<Vec<MealRecord>, ApiError>,
    ) -> Result<(), StorageError> {
        self.loading = false;
        match result {
            Ok(meals) => {
                let total = meals.len();
                let recipes: Vec<Recipe> =
                    meals.into_iter().filter_map(MealRecord::into_recipe).collect();
                if recipes.len() < total {
                    tracing::warn!(
                        skipped = total - recipes.len(),
                        "skipped seed meals without a numeric id"
                    );
                }
                tracing::info!(count = recipes.len(), "seeded recipe store");
                self.recipes = recipes;
                self.persist()
            }
            Err(e) => {
                tracing::warn!("seed fetch failed: {e}");
                self.error = Some(BOOTSTRAP_ERROR.to_string());
                Ok(())
            }
        }
    }

    /// Run the seed fetch synchronously if it is still pending
    pub fn bootstrap(
        &mut self,
        source: &dyn RecipeSource,
        keyword: &str,
    ) -> Result<(), StorageError> {
        if !self.begin_bootstrap() {
            return Ok(());
        }
        let result = source.search(keyword);
        self.finish_bootstrap(result)
    }

    /// Append a hand-entered or suggested recipe. No validation here;
    /// callers check their fields first.
    pub fn add_recipe(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<RecipeId, StorageError> {
        let id = RecipeId::now();
        self.recipes.push(Recipe::local(
            id,
            title.into(),
            description.into(),
            image.into(),
        ));
        tracing::info!(%id, "added recipe");
        self.persist()?;
        Ok(id)
    }

    /// Remove every recipe with this id. Returns how many were removed.
    pub fn delete_recipe(&mut self, id: RecipeId) -> Result<usize, StorageError> {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        let removed = before - self.recipes.len();
        tracing::info!(%id, removed, "deleted recipe");
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.save(&self.recipes).inspect_err(|e| {
            tracing::warn!("could not persist recipes: {e}");
        })
    }
}
