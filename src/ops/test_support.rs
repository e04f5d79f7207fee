//! Fakes for the external services, shared by ops and tui tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::{ApiError, MealRecord, RecipeSource, TextGenerator};
use crate::model::recipe::RecipeId;

/// A search hit with the given id and name
pub fn meal(id: &str, name: &str) -> MealRecord {
    MealRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        instructions: Some(format!("{name} instructions")),
        thumbnail: Some(format!("https://img.example/{id}.jpg")),
        category: Some("Chicken".to_string()),
        area: Some("Indian".to_string()),
        youtube: Some(String::new()),
    }
}

/// In-memory TheMealDB
#[derive(Default)]
pub struct FakeSource {
    meals: Vec<MealRecord>,
    fail: bool,
    searches: AtomicUsize,
    lookups: AtomicUsize,
    last_keyword: Mutex<Option<String>>,
}

impl FakeSource {
    pub fn with_meals(meals: Vec<MealRecord>) -> Self {
        FakeSource {
            meals,
            ..Default::default()
        }
    }

    /// Every call fails as if the service returned 500
    pub fn failing() -> Self {
        FakeSource {
            fail: true,
            ..Default::default()
        }
    }

    pub fn search_calls(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn last_keyword(&self) -> Option<String> {
        self.last_keyword.lock().unwrap().clone()
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: "https://www.themealdb.com/api/json/v1/1/".to_string(),
        }
    }
}

impl RecipeSource for FakeSource {
    fn search(&self, keyword: &str) -> Result<Vec<MealRecord>, ApiError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_keyword.lock().unwrap() = Some(keyword.to_string());
        if self.fail {
            return Err(Self::server_error());
        }
        Ok(self.meals.clone())
    }

    fn lookup(&self, id: RecipeId) -> Result<MealRecord, ApiError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::server_error());
        }
        self.meals
            .iter()
            .find(|m| m.recipe_id() == Some(id))
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }
}

/// Canned generative-text service
pub struct FakeGenerator {
    reply: Result<String, ()>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        FakeGenerator {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails the way a missing API key does
    pub fn failing() -> Self {
        FakeGenerator {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for FakeGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(|()| ApiError::MissingApiKey("GEMINI_API_KEY".to_string()))
    }
}
