//! Document surface the session drives: location, `dir`/`lang` attributes
//! and full navigations.

use crate::i18n::Direction;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Host document the locale session keeps consistent with the active locale.
pub trait DocumentHost: Send + Sync {
    /// Current location as path plus optional `?query` and `#fragment`.
    fn location(&self) -> String;

    fn set_direction(&self, direction: Direction);

    fn set_language(&self, code: &str);

    /// Perform a full navigation (document reload) to `target`.
    fn navigate(&self, target: &str);
}

#[derive(Debug, Clone)]
struct DocumentState {
    location: String,
    direction: Direction,
    language: String,
    navigations: Vec<String>,
}

/// Document without a renderer. Records attribute changes and navigations.
#[derive(Debug)]
pub struct HeadlessDocument {
    state: Mutex<DocumentState>,
}

impl HeadlessDocument {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(DocumentState {
                location: location.into(),
                direction: Direction::Ltr,
                language: String::new(),
                navigations: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn direction(&self) -> Direction {
        self.state().direction
    }

    pub fn language(&self) -> String {
        self.state().language.clone()
    }

    /// Every navigation target, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.state().navigations.clone()
    }
}

impl DocumentHost for HeadlessDocument {
    fn location(&self) -> String {
        self.state().location.clone()
    }

    fn set_direction(&self, direction: Direction) {
        self.state().direction = direction;
    }

    fn set_language(&self, code: &str) {
        self.state().language = code.to_string();
    }

    fn navigate(&self, target: &str) {
        info!("Navigating to {}", target);
        let mut state = self.state();
        state.location = target.to_string();
        state.navigations.push(target.to_string());
    }
}
