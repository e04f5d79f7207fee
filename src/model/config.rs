use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mealdb: MealDbConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDbConfig {
    /// Default: see src/cli/handlers/init.rs template
    #[serde(default = "default_mealdb_url")]
    pub base_url: String,
    /// Keyword searched to seed an empty store
    #[serde(default = "default_seed_keyword")]
    pub seed_keyword: String,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        MealDbConfig {
            base_url: default_mealdb_url(),
            seed_keyword: default_seed_keyword(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Stock-photo search URL; `{ingredient}` is replaced
    #[serde(default = "default_image_url_template")]
    pub image_url_template: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            base_url: default_ai_url(),
            model: default_ai_model(),
            api_key_env: default_api_key_env(),
            image_url_template: default_image_url_template(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout. Absent = wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides, hex strings keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

fn default_mealdb_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_seed_keyword() -> String {
    "chicken".to_string()
}

fn default_ai_url() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_image_url_template() -> String {
    "https://source.unsplash.com/400x300/?{ingredient},indian-food".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.mealdb.base_url, "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(config.mealdb.seed_keyword, "chicken");
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.ai.api_key_env, "GEMINI_API_KEY");
        assert!(config.http.timeout_secs.is_none());
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: Config = toml::from_str(
            r##"
[mealdb]
seed_keyword = "beef"

[http]
timeout_secs = 10

[ui.colors]
highlight = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.mealdb.seed_keyword, "beef");
        assert_eq!(config.mealdb.base_url, default_mealdb_url());
        assert_eq!(config.http.timeout_secs, Some(10));
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
        assert!(config.ai.image_url_template.contains("{ingredient}"));
    }
}
