use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recipe identifier.
///
/// Seeded recipes carry TheMealDB's numeric `idMeal`; recipes added locally
/// use the wall clock in milliseconds. Uniqueness is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub i64);

impl RecipeId {
    /// A fresh id from the current time in milliseconds
    pub fn now() -> Self {
        RecipeId(chrono::Utc::now().timestamp_millis())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(RecipeId)
    }
}

/// A recipe as stored in `recipes.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    /// Image URL
    pub image: String,
    /// True when the recipe has a remote detail record fetchable by `id`
    #[serde(rename = "fromAPI", default)]
    pub from_api: bool,
}

/// Descriptions longer than this are cut here in list previews
const LONG_PREVIEW_CHARS: usize = 100;
/// Shorter descriptions are cut here instead
const SHORT_PREVIEW_CHARS: usize = 50;

impl Recipe {
    /// A recipe entered by hand or suggested by the AI
    pub fn local(id: RecipeId, title: String, description: String, image: String) -> Self {
        Recipe {
            id,
            title,
            description,
            image,
            from_api: false,
        }
    }

    /// A recipe seeded from the lookup service
    pub fn remote(id: RecipeId, title: String, description: String, image: String) -> Self {
        Recipe {
            id,
            title,
            description,
            image,
            from_api: true,
        }
    }

    /// Description as shown in the recipe list.
    ///
    /// Long descriptions keep their first 100 characters, everything else its
    /// first 50; both get a trailing `...`.
    pub fn preview(&self) -> String {
        let len = self.description.chars().count();
        let keep = if len > LONG_PREVIEW_CHARS {
            LONG_PREVIEW_CHARS
        } else {
            SHORT_PREVIEW_CHARS
        };
        let mut preview: String = self.description.chars().take(keep).collect();
        preview.push_str("...");
        preview
    }
}
