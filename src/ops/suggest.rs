//! AI recipe suggestions: prompt construction, best-effort parsing of the
//! model's reply, and the one-field form that drives it.
//!
//! The model is asked for a JSON object but often wraps it in prose or code
//! fences, or ignores the request entirely. Parsing therefore tries the outer
//! `{...}` span first and falls back to reading the reply as plain text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiError, TextGenerator};
use crate::io::storage::{RecipeStorage, StorageError};
use crate::model::recipe::RecipeId;
use crate::ops::store::RecipeStore;

pub const DEFAULT_TITLE: &str = "AI Recipe";
pub const DEFAULT_DESCRIPTION: &str = "No instructions found.";

/// First `{` through last `}`, across lines
static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex"));

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("AI suggestion failed. Check API key. ({0})")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Title and description derived from one model reply, plus the image URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// The prompt sent for an ingredient
pub fn prompt_for(ingredient: &str) -> String {
    format!(
        "Give me a detailed South Indian recipe using {ingredient}.\n\
         Return only JSON:\n\
         {{\n  \"title\": \"Recipe Name\",\n  \"instructions\": \"Step 1... Step 2... Step 3...\"\n}}"
    )
}

/// Stock-photo search URL for an ingredient. Not a stable image: the URL is
/// a search query.
pub fn image_url(template: &str, ingredient: &str) -> String {
    let query = ingredient.split_whitespace().collect::<Vec<_>>().join("+");
    template.replace("{ingredient}", &query)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestionPayload {
    title: Option<Value>,
    instructions: Option<Value>,
}

/// Non-empty string value, or `None`
fn text_field(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Turn a model reply into `(title, description)`.
pub fn parse_suggestion(text: &str) -> (String, String) {
    if let Some(span) = JSON_SPAN.find(text)
        && let Ok(payload) = serde_json::from_str::<SuggestionPayload>(span.as_str())
    {
        let title = text_field(payload.title.as_ref()).unwrap_or(DEFAULT_TITLE);
        let description = text_field(payload.instructions.as_ref()).unwrap_or(DEFAULT_DESCRIPTION);
        return (title.to_string(), description.to_string());
    }
    parse_free_text(text)
}

/// First line is the title, the rest is the description
fn parse_free_text(text: &str) -> (String, String) {
    let mut lines = text.lines();
    let title = lines
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    let rest = lines.collect::<Vec<_>>().join("\n");
    let description = if rest.trim().is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        rest
    };
    (title, description)
}

/// Ask the generator for a recipe using `ingredient`
pub fn fetch_suggestion(
    generator: &dyn TextGenerator,
    ingredient: &str,
    image_template: &str,
) -> Result<Suggestion, ApiError> {
    tracing::debug!(ingredient, "requesting suggestion");
    let reply = generator.generate(&prompt_for(ingredient))?;
    let (title, description) = parse_suggestion(&reply);
    Ok(Suggestion {
        title,
        description,
        image: image_url(image_template, ingredient),
    })
}

/// The suggestion form: one ingredient input and a loading flag
#[derive(Debug, Clone, Default)]
pub struct SuggestionForm {
    pub ingredient: String,
    loading: bool,
}

impl SuggestionForm {
    /// An idle form holding `ingredient`
    pub fn new(ingredient: impl Into<String>) -> Self {
        SuggestionForm {
            ingredient: ingredient.into(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark the form busy and return the ingredient to send. `None` when the
    /// input is empty or a request is already running.
    pub fn begin(&mut self) -> Option<String> {
        if self.loading || self.ingredient.is_empty() {
            return None;
        }
        self.loading = true;
        Some(self.ingredient.clone())
    }

    /// Clear the busy flag and add the suggested recipe on success.
    /// A failed request adds nothing.
    pub fn finish<S: RecipeStorage>(
        &mut self,
        result: Result<Suggestion, ApiError>,
        store: &mut RecipeStore<S>,
    ) -> Result<RecipeId, SuggestError> {
        self.loading = false;
        let suggestion = result.inspect_err(|e| tracing::warn!("suggestion failed: {e}"))?;
        let id = store.add_recipe(suggestion.title, suggestion.description, suggestion.image)?;
        Ok(id)
    }

    /// `begin`, fetch and `finish` in one blocking call
    pub fn submit<S: RecipeStorage>(
        &mut self,
        generator: &dyn TextGenerator,
        image_template: &str,
        store: &mut RecipeStore<S>,
    ) -> Result<Option<RecipeId>, SuggestError> {
        let Some(ingredient) = self.begin() else {
            return Ok(None);
        };
        let result = fetch_suggestion(generator, &ingredient, image_template);
        self.finish(result, store).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::config::AiConfig;
    use crate::ops::test_support::FakeGenerator;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn template() -> String {
        AiConfig::default().image_url_template
    }

    #[test]
    fn json_reply_uses_title_and_instructions() {
        let (title, description) =
            parse_suggestion(r#"{"title":"Tomato Rice","instructions":"Cook rice. Add tomato."}"#);
        assert_eq!(title, "Tomato Rice");
        assert_eq!(description, "Cook rice. Add tomato.");
    }

    #[test]
    fn json_inside_code_fence_is_found() {
        let reply = "Here you go!\n```json\n{\n  \"title\": \"Lemon Rice\",\n  \"instructions\": \"Step 1... Step 2...\"\n}\n```\nEnjoy.";
        let (title, description) = parse_suggestion(reply);
        assert_eq!(title, "Lemon Rice");
        assert_eq!(description, "Step 1... Step 2...");
    }

    #[test]
    fn json_missing_fields_fall_back_to_defaults() {
        assert_eq!(
            parse_suggestion(r#"{"title":"Only Title"}"#),
            ("Only Title".to_string(), DEFAULT_DESCRIPTION.to_string())
        );
        assert_eq!(
            parse_suggestion(r#"{"instructions":"Only steps"}"#),
            (DEFAULT_TITLE.to_string(), "Only steps".to_string())
        );
        assert_eq!(
            parse_suggestion(r#"{"title":"","instructions":42}"#),
            (DEFAULT_TITLE.to_string(), DEFAULT_DESCRIPTION.to_string())
        );
    }

    #[test]
    fn plain_text_reply_splits_first_line() {
        let (title, description) = parse_suggestion("Tomato Rice\nCook rice.\nAdd tomato.");
        assert_eq!(title, "Tomato Rice");
        assert_eq!(description, "Cook rice.\nAdd tomato.");
    }

    #[test]
    fn broken_json_falls_back_to_plain_text() {
        let (title, description) = parse_suggestion("{\"title\": \"Rasam\",\nSimmer tamarind.");
        assert_eq!(title, "{\"title\": \"Rasam\",");
        assert_eq!(description, "Simmer tamarind.");
    }

    #[test]
    fn empty_reply_gives_defaults() {
        for reply in ["", "   ", "\n\n"] {
            assert_eq!(
                parse_suggestion(reply),
                (DEFAULT_TITLE.to_string(), DEFAULT_DESCRIPTION.to_string()),
                "reply {reply:?}"
            );
        }
    }

    #[test]
    fn single_line_reply_gets_default_description() {
        assert_eq!(
            parse_suggestion("Coconut Chutney"),
            ("Coconut Chutney".to_string(), DEFAULT_DESCRIPTION.to_string())
        );
    }

    #[test]
    fn prompt_embeds_ingredient() {
        assert_snapshot!(prompt_for("okra"), @r#"
        Give me a detailed South Indian recipe using okra.
        Return only JSON:
        {
          "title": "Recipe Name",
          "instructions": "Step 1... Step 2... Step 3..."
        }
        "#);
    }

    #[test]
    fn image_url_interpolates_ingredient() {
        assert_eq!(
            image_url(&template(), "paneer"),
            "https://source.unsplash.com/400x300/?paneer,indian-food"
        );
        assert_eq!(
            image_url(&template(), "  curry   leaves "),
            "https://source.unsplash.com/400x300/?curry+leaves,indian-food"
        );
    }

    #[test]
    fn submit_adds_parsed_recipe() {
        let storage = MemoryStorage::new();
        let mut store = RecipeStore::open(&storage).unwrap();
        let generator =
            FakeGenerator::replying(r#"{"title":"Tomato Rice","instructions":"Cook rice. Add tomato."}"#);
        let mut form = SuggestionForm::new("tomato");

        let id = form.submit(&generator, &template(), &mut store).unwrap().unwrap();

        assert!(!form.is_loading());
        let recipe = store.get(id).unwrap();
        assert_eq!(recipe.title, "Tomato Rice");
        assert_eq!(recipe.description, "Cook rice. Add tomato.");
        assert_eq!(
            recipe.image,
            "https://source.unsplash.com/400x300/?tomato,indian-food"
        );
        assert!(!recipe.from_api);
        assert_eq!(generator.prompts(), vec![prompt_for("tomato")]);
    }

    #[test]
    fn submit_with_empty_ingredient_does_nothing() {
        let mut store = RecipeStore::open(MemoryStorage::new()).unwrap();
        let generator = FakeGenerator::replying("unused");
        let mut form = SuggestionForm::default();

        assert!(form.submit(&generator, &template(), &mut store).unwrap().is_none());
        assert!(generator.prompts().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn failed_request_adds_nothing_and_clears_loading() {
        let storage = MemoryStorage::new();
        let mut store = RecipeStore::open(&storage).unwrap();
        let generator = FakeGenerator::failing();
        let mut form = SuggestionForm::new("tomato");

        let err = form.submit(&generator, &template(), &mut store).unwrap_err();

        assert!(matches!(err, SuggestError::Api(ApiError::MissingApiKey(_))));
        assert!(err.to_string().starts_with("AI suggestion failed. Check API key."));
        assert!(!form.is_loading());
        assert!(store.is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn new_form_is_idle() {
        let form = SuggestionForm::new(String::from("okra"));
        assert_eq!(form.ingredient, "okra");
        assert!(!form.is_loading());
    }

    #[test]
    fn begin_refuses_while_loading() {
        let mut form = SuggestionForm::new("rice");
        assert_eq!(form.begin().as_deref(), Some("rice"));
        assert!(form.is_loading());
        assert!(form.begin().is_none());
    }
}
