//! TheMealDB: keyword search (seeds an empty store) and lookup by id
//! (detail view).

use serde::Deserialize;

use super::{ApiError, HttpClient, RecipeSource, endpoint};
use crate::model::config::MealDbConfig;
use crate::model::detail::RecipeDetail;
use crate::model::recipe::{Recipe, RecipeId};

/// One meal as returned by `search.php` and `lookup.php`.
///
/// Every field is optional; the service omits or nulls them freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<MealRecord>>,
}

impl MealRecord {
    /// Numeric id, if the record has one
    pub fn recipe_id(&self) -> Option<RecipeId> {
        self.id.as_deref()?.parse().ok()
    }

    /// Convert a search hit into a seeded recipe.
    /// Returns `None` when the id is missing or not numeric.
    pub fn into_recipe(self) -> Option<Recipe> {
        let id = self.recipe_id()?;
        Some(Recipe::remote(
            id,
            self.name.unwrap_or_default(),
            self.instructions.unwrap_or_default(),
            self.thumbnail.unwrap_or_default(),
        ))
    }

    pub fn into_detail(self) -> RecipeDetail {
        RecipeDetail {
            title: self.name.unwrap_or_default(),
            image: self.thumbnail.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            video: self.youtube.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// Parse a `{"meals": [...]}` body. `"meals": null` means no matches.
pub fn parse_meals(body: &str) -> Result<Vec<MealRecord>, ApiError> {
    let envelope: MealsEnvelope = serde_json::from_str(body)?;
    Ok(envelope.meals.unwrap_or_default())
}

pub struct MealDbClient {
    http: HttpClient,
    base_url: String,
}

impl MealDbClient {
    pub fn new(http: HttpClient, config: &MealDbConfig) -> Self {
        MealDbClient {
            http,
            base_url: config.base_url.clone(),
        }
    }
}

impl RecipeSource for MealDbClient {
    fn search(&self, keyword: &str) -> Result<Vec<MealRecord>, ApiError> {
        let url = endpoint(&self.base_url, "search.php");
        let body = self.http.get_text(&url, &[("s", keyword)])?;
        parse_meals(&body)
    }

    fn lookup(&self, id: RecipeId) -> Result<MealRecord, ApiError> {
        let url = endpoint(&self.base_url, "lookup.php");
        let id_param = id.to_string();
        let body = self.http.get_text(&url, &[("i", id_param.as_str())])?;
        parse_meals(&body)?
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(id))
    }
}
