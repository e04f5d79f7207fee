use crate::api::{ApiError, MealRecord, RecipeSource};
use crate::model::detail::RecipeDetail;
use crate::model::recipe::{Recipe, RecipeId};

/// Shown when a detail lookup fails
pub const DETAIL_ALERT: &str = "Failed to load recipe details";

/// How to get the detail for a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPlan {
    /// No remote record: build it from the recipe's own fields
    Local(RecipeDetail),
    /// Look it up by id
    Remote(RecipeId),
}

impl DetailPlan {
    pub fn for_recipe(recipe: &Recipe) -> Self {
        if recipe.from_api {
            DetailPlan::Remote(recipe.id)
        } else {
            DetailPlan::Local(RecipeDetail::from_local(recipe))
        }
    }
}

/// Look up a meal and convert it for display
pub fn fetch_detail(source: &dyn RecipeSource, id: RecipeId) -> Result<RecipeDetail, ApiError> {
    tracing::debug!(%id, "looking up recipe detail");
    source.lookup(id).map(MealRecord::into_detail)
}

/// Resolve a recipe's detail in one blocking call
pub fn resolve_detail(
    source: &dyn RecipeSource,
    recipe: &Recipe,
) -> Result<RecipeDetail, ApiError> {
    match DetailPlan::for_recipe(recipe) {
        DetailPlan::Local(detail) => Ok(detail),
        DetailPlan::Remote(id) => fetch_detail(source, id),
    }
}

/// Transient state behind the detail modal. Never written to the store.
#[derive(Debug, Clone, Default)]
pub struct DetailModal {
    loading: Option<RecipeId>,
    detail: Option<RecipeDetail>,
}

impl DetailModal {
    /// Open the modal for a recipe. Local recipes show immediately; for
    /// remote ones the id to look up is returned and the modal stays closed
    /// until [`finish`](Self::finish).
    pub fn open(&mut self, recipe: &Recipe) -> Option<RecipeId> {
        match DetailPlan::for_recipe(recipe) {
            DetailPlan::Local(detail) => {
                self.detail = Some(detail);
                None
            }
            DetailPlan::Remote(id) => {
                self.loading = Some(id);
                Some(id)
            }
        }
    }

    /// Apply a lookup result. On failure nothing is shown and the error is
    /// handed back for the caller to alert.
    pub fn finish(&mut self, result: Result<RecipeDetail, ApiError>) -> Result<(), ApiError> {
        self.loading = None;
        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("detail lookup failed: {e}");
                Err(e)
            }
        }
    }

    pub fn close(&mut self) {
        self.detail = None;
    }

    /// Recipe whose lookup is in flight
    pub fn loading(&self) -> Option<RecipeId> {
        self.loading
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.detail.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.detail.is_some()
    }
}
