use serde::Serialize;

use crate::model::detail::RecipeDetail;
use crate::model::recipe::Recipe;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RecipeJson {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub from_api: bool,
}

#[derive(Serialize)]
pub struct RecipeListJson {
    pub recipes: Vec<RecipeJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: i64,
}

#[derive(Serialize)]
pub struct DeletedJson {
    pub id: i64,
    pub removed: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn recipe_to_json(recipe: &Recipe) -> RecipeJson {
    RecipeJson {
        id: recipe.id.0,
        title: recipe.title.clone(),
        description: recipe.description.clone(),
        image: recipe.image.clone(),
        from_api: recipe.from_api,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One entry per recipe: `<id>  <title>` with the preview indented below
pub fn format_recipe_listing(recipes: &[Recipe]) -> Vec<String> {
    if recipes.is_empty() {
        return vec!["no recipes".to_string()];
    }
    let mut lines = Vec::with_capacity(recipes.len() * 2);
    for recipe in recipes {
        let source = if recipe.from_api { "  [TheMealDB]" } else { "" };
        lines.push(format!("{}  {}{}", recipe.id, recipe.title, source));
        lines.push(format!("    {}", recipe.preview().replace(['\r', '\n'], " ")));
    }
    lines
}

pub fn format_recipe_detail(detail: &RecipeDetail) -> Vec<String> {
    let mut lines = vec![
        detail.title.clone(),
        format!("Category: {} | Area: {}", detail.category, detail.area),
        format!("Image: {}", detail.image),
        String::new(),
        "Instructions:".to_string(),
    ];
    lines.extend(detail.instructions.lines().map(|l| format!("  {}", l)));
    if let Some(video) = &detail.video {
        lines.push(String::new());
        lines.push(format!("Video: {}", video));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::recipe::RecipeId;
    use insta::assert_snapshot;

    #[test]
    fn listing_marks_seeded_recipes() {
        let recipes = vec![
            Recipe::remote(
                RecipeId(52795),
                "Chicken Handi".into(),
                "Take a large pot or wok, big enough to cook all the chicken, and heat the oil in it.".into(),
                "https://img.example/52795.jpg".into(),
            ),
            Recipe::local(
                RecipeId(1717000000000),
                "Masala Chai".into(),
                "Boil milk.".into(),
                "https://img.example/chai.jpg".into(),
            ),
        ];
        assert_snapshot!(format_recipe_listing(&recipes).join("\n"), @r"
        52795  Chicken Handi  [TheMealDB]
            Take a large pot or wok, big enough to cook all th...
        1717000000000  Masala Chai
            Boil milk....
        ");
    }

    #[test]
    fn empty_listing() {
        assert_eq!(format_recipe_listing(&[]), vec!["no recipes"]);
    }

    #[test]
    fn detail_with_video() {
        let detail = RecipeDetail {
            title: "Chicken Handi".into(),
            image: "https://img.example/52795.jpg".into(),
            instructions: "Heat oil.\nAdd chicken.".into(),
            category: "Chicken".into(),
            area: "Indian".into(),
            video: Some("https://www.youtube.com/watch?v=IO0issT0Rmc".into()),
        };
        assert_snapshot!(format_recipe_detail(&detail).join("\n"), @r"
        Chicken Handi
        Category: Chicken | Area: Indian
        Image: https://img.example/52795.jpg

        Instructions:
          Heat oil.
          Add chicken.

        Video: https://www.youtube.com/watch?v=IO0issT0Rmc
        ");
    }

    #[test]
    fn recipe_json_uses_snake_case() {
        let recipe = Recipe::local(RecipeId(7), "T".into(), "D".into(), "I".into());
        let value = serde_json::to_value(recipe_to_json(&recipe)).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["from_api"], false);
    }
}
