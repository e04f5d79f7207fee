use serde::Serialize;

use super::recipe::Recipe;

/// Category shown for recipes that have no remote record
pub const LOCAL_CATEGORY: &str = "Custom";
/// Area shown for recipes that have no remote record
pub const LOCAL_AREA: &str = "Manual Entry";

/// Everything the detail view shows for one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub title: String,
    pub image: String,
    pub instructions: String,
    pub category: String,
    pub area: String,
    /// YouTube link, if the service has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl RecipeDetail {
    /// Detail synthesized from a recipe's own fields
    pub fn from_local(recipe: &Recipe) -> Self {
        RecipeDetail {
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            instructions: recipe.description.clone(),
            category: LOCAL_CATEGORY.to_string(),
            area: LOCAL_AREA.to_string(),
            video: None,
        }
    }
}
