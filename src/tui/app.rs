use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api;
use crate::io::config_io::load_config;
use crate::io::storage::{JsonFileStorage, RecipeStorage};
use crate::model::recipe::Recipe;
use crate::ops::compose::{Composer, ComposerField};
use crate::ops::detail::{DETAIL_ALERT, DetailModal};
use crate::ops::store::RecipeStore;
use crate::ops::suggest::SuggestionForm;

use super::input;
use super::render;
use super::theme::Theme;
use super::worker::{Completion, Worker};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Suggest,
    Composer(ComposerField),
}

impl Focus {
    /// Tab order
    const ORDER: [Focus; 5] = [
        Focus::List,
        Focus::Suggest,
        Focus::Composer(ComposerField::Title),
        Focus::Composer(ComposerField::Description),
        Focus::Composer(ComposerField::Image),
    ];

    fn index(self) -> usize {
        Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        Focus::ORDER[(self.index() + 1) % Focus::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        let len = Focus::ORDER.len();
        Focus::ORDER[(self.index() + len - 1) % len]
    }
}

/// One-line message in the status row, cleared by the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Alert(String),
}

/// Main application state
pub struct App {
    pub store: RecipeStore<Box<dyn RecipeStorage>>,
    pub composer: Composer,
    pub suggestion: SuggestionForm,
    pub detail: DetailModal,
    pub focus: Focus,
    /// Selected recipe index
    pub cursor: usize,
    /// First visible recipe
    pub scroll_offset: usize,
    /// Byte offset of the text cursor in the focused input
    pub edit_cursor: usize,
    /// Lines scrolled in the detail modal
    pub detail_scroll: u16,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
    seed_keyword: String,
    worker: Worker,
}

impl App {
    pub fn new(
        store: RecipeStore<Box<dyn RecipeStorage>>,
        worker: Worker,
        theme: Theme,
        seed_keyword: String,
    ) -> Self {
        App {
            store,
            composer: Composer::default(),
            suggestion: SuggestionForm::default(),
            detail: DetailModal::default(),
            focus: Focus::List,
            cursor: 0,
            scroll_offset: 0,
            edit_cursor: 0,
            detail_scroll: 0,
            status: None,
            show_help: false,
            should_quit: false,
            theme,
            seed_keyword,
            worker,
        }
    }

    /// Kick off the seed fetch if the store opened empty
    pub fn start(&mut self) {
        if self.store.begin_bootstrap() {
            self.worker.spawn_bootstrap(&self.seed_keyword);
        }
    }

    pub fn selected(&self) -> Option<&Recipe> {
        self.store.recipes().get(self.cursor)
    }

    /// Text of the focused input, if the focus is on one
    pub fn focused_input(&self) -> Option<&str> {
        match self.focus {
            Focus::List => None,
            Focus::Suggest => Some(&self.suggestion.ingredient),
            Focus::Composer(field) => Some(self.composer.field(field)),
        }
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::List => None,
            Focus::Suggest => Some(&mut self.suggestion.ingredient),
            Focus::Composer(field) => Some(self.composer.field_mut(field)),
        }
    }

    /// Move focus, placing the text cursor at the end of the new input
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.edit_cursor = self.focused_input().map_or(0, str::len);
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.store.len().saturating_sub(1));
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMessage::Info(msg.into()));
    }

    pub fn alert(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMessage::Alert(msg.into()));
    }

    /// Open the detail modal for the selected recipe. Local recipes show at
    /// once; seeded ones are looked up in the background.
    pub fn open_selected_detail(&mut self) {
        let Some(recipe) = self.store.recipes().get(self.cursor) else {
            return;
        };
        self.detail_scroll = 0;
        if let Some(id) = self.detail.open(recipe) {
            self.worker.spawn_detail(id);
        }
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
        self.detail_scroll = 0;
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected().map(|r| r.id) else {
            return;
        };
        match self.store.delete_recipe(id) {
            Ok(_) => self.info("Recipe deleted"),
            Err(e) => self.alert(format!("Could not save recipes: {e}")),
        }
        self.clamp_cursor();
    }

    pub fn submit_suggestion(&mut self) {
        if let Some(ingredient) = self.suggestion.begin() {
            self.worker.spawn_suggestion(ingredient);
        }
    }

    pub fn submit_composer(&mut self) {
        match self.composer.submit(&mut self.store) {
            Ok(Some(_)) => {
                self.info("Recipe added");
                self.edit_cursor = 0;
            }
            Ok(None) => {
                let missing: Vec<&str> =
                    self.composer.missing().iter().map(|f| f.label()).collect();
                self.info(format!("Fill in {}", missing.join(", ")));
            }
            Err(e) => self.alert(format!("Could not save recipes: {e}")),
        }
    }

    /// Apply a finished network call
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Bootstrap(result) => {
                if let Err(e) = self.store.finish_bootstrap(result) {
                    self.alert(format!("Could not save recipes: {e}"));
                }
                self.clamp_cursor();
            }
            Completion::Suggestion(result) => {
                match self.suggestion.finish(result, &mut self.store) {
                    Ok(id) => {
                        let title = self.store.get(id).map(|r| r.title.clone()).unwrap_or_default();
                        self.info(format!("Added \u{201c}{title}\u{201d}"));
                    }
                    Err(e) => self.alert(e.to_string()),
                }
            }
            Completion::Detail(id, result) => {
                // Only the most recent lookup may open the modal
                if self.detail.loading() != Some(id) {
                    tracing::debug!(%id, "dropping stale detail lookup");
                    return;
                }
                if self.detail.finish(result).is_err() {
                    self.alert(DETAIL_ALERT);
                }
            }
        }
    }

    /// Drain and apply every finished call
    pub fn poll_worker(&mut self) {
        for completion in self.worker.poll() {
            self.apply(completion);
        }
    }

    #[cfg(test)]
    pub(crate) fn worker(&self) -> &Worker {
        &self.worker
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let (source, generator) = api::connect(&config)?;
    let storage: Box<dyn RecipeStorage> = Box::new(JsonFileStorage::in_dir(data_dir));
    let store = RecipeStore::open(storage)?;
    let worker = Worker::new(
        Arc::new(source),
        Arc::new(generator),
        config.ai.image_url_template.clone(),
    );

    let mut app = App::new(
        store,
        worker,
        Theme::from_config(&config.ui),
        config.mealdb.seed_keyword.clone(),
    );
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.poll_worker();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
