use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{MemoryStorage, RecipeStorage};
use crate::model::recipe::{Recipe, RecipeId};
use crate::ops::store::RecipeStore;
use crate::ops::test_support::{FakeGenerator, FakeSource, meal};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::tui::worker::Worker;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the standard test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// The two meals the fake lookup service knows about
fn fake_meals() -> Vec<crate::api::MealRecord> {
    vec![
        meal("52795", "Chicken Handi"),
        meal("52796", "Chicken Alfredo Primavera"),
    ]
}

/// The fake meals as they look once seeded into the store
pub fn seeded_recipes() -> Vec<Recipe> {
    fake_meals()
        .into_iter()
        .filter_map(|m| m.into_recipe())
        .collect()
}

pub fn manual_recipe(id: i64, title: &str, description: &str) -> Recipe {
    Recipe::local(
        RecipeId(id),
        title.into(),
        description.into(),
        format!("https://img.example/{id}.jpg"),
    )
}

fn build_app(recipes: Vec<Recipe>, source: FakeSource, generator: FakeGenerator) -> App {
    let storage: Box<dyn RecipeStorage> = if recipes.is_empty() {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(MemoryStorage::with_recipes(recipes))
    };
    let store = RecipeStore::open(storage).unwrap();
    let worker = Worker::new(
        Arc::new(source),
        Arc::new(generator),
        "https://img.example/?{ingredient}".into(),
    );
    App::new(store, worker, Theme::default(), "chicken".into())
}

/// An App over the given stored recipes, with working fake services
pub fn app_with(recipes: Vec<Recipe>) -> App {
    build_app(
        recipes,
        FakeSource::with_meals(fake_meals()),
        FakeGenerator::replying(
            r#"{"title":"Tomato Rice","instructions":"Cook rice. Add tomato."}"#,
        ),
    )
}

/// An App whose store already holds the seeded recipes
pub fn seeded_app() -> App {
    app_with(seeded_recipes())
}

/// An App whose services fail every call
pub fn failing_app(recipes: Vec<Recipe>) -> App {
    build_app(recipes, FakeSource::failing(), FakeGenerator::failing())
}
