use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use crate::api::{ApiError, MealRecord, RecipeSource, TextGenerator};
use crate::model::detail::RecipeDetail;
use crate::model::recipe::RecipeId;
use crate::ops::detail::fetch_detail;
use crate::ops::suggest::{Suggestion, fetch_suggestion};

/// Results sent from network threads back to the TUI event loop
#[derive(Debug)]
pub enum Completion {
    Bootstrap(Result<Vec<MealRecord>, ApiError>),
    Suggestion(Result<Suggestion, ApiError>),
    Detail(RecipeId, Result<RecipeDetail, ApiError>),
}

/// Runs each network call on its own short-lived thread.
///
/// Requests are never cancelled or de-duplicated; every spawned call posts
/// exactly one [`Completion`], which [`poll`](Self::poll) hands to the event
/// loop on its next tick.
pub struct Worker {
    source: Arc<dyn RecipeSource>,
    generator: Arc<dyn TextGenerator>,
    image_template: String,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
}

impl Worker {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        generator: Arc<dyn TextGenerator>,
        image_template: String,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Worker {
            source,
            generator,
            image_template,
            tx,
            rx,
        }
    }

    pub fn spawn_bootstrap(&self, keyword: &str) {
        let source = Arc::clone(&self.source);
        let keyword = keyword.to_string();
        self.spawn(move || Completion::Bootstrap(source.search(&keyword)));
    }

    pub fn spawn_suggestion(&self, ingredient: String) {
        let generator = Arc::clone(&self.generator);
        let template = self.image_template.clone();
        self.spawn(move || {
            Completion::Suggestion(fetch_suggestion(generator.as_ref(), &ingredient, &template))
        });
    }

    pub fn spawn_detail(&self, id: RecipeId) {
        let source = Arc::clone(&self.source);
        self.spawn(move || Completion::Detail(id, fetch_detail(source.as_ref(), id)));
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> Completion + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            // The receiver is gone only when the TUI has exited
            let _ = tx.send(job());
        });
    }

    /// Non-blocking poll for finished calls.
    /// Returns all queued completions (may be empty).
    pub fn poll(&self) -> Vec<Completion> {
        let mut done = Vec::new();
        while let Ok(c) = self.rx.try_recv() {
            done.push(c);
        }
        done
    }

    /// Block until the next completion arrives
    #[cfg(test)]
    pub(crate) fn wait(&self) -> Completion {
        self.rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("worker completion")
    }
}
