use tracing::debug;

use crate::matcher::FuzzyMatcher;

/// Input the picker reacts to, after key decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Insert(char),
    Backspace,
    Up,
    Down,
    Select,
    Quit,
}

/// Whether the session continues after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Selected(String),
    Cancelled,
}

/// Picker state: the full path list, the query, and what is on screen.
///
/// Values are never mutated in place; [`update`] takes a model and returns the
/// next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerModel {
    all: Vec<String>,
    visible: Vec<String>,
    total_matches: usize,
    query: String,
    cursor: usize,
    list_height: usize,
}

impl PickerModel {
    /// Starts with an empty query showing the first `list_height` paths
    pub fn new(all: Vec<String>, list_height: usize) -> Self {
        let visible = first_rows(&all, list_height);
        let total_matches = all.len();
        Self {
            all,
            visible,
            total_matches,
            query: String::new(),
            cursor: 0,
            list_height,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Rows currently shown, best match first
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    /// Number of paths matching the query, including those off screen
    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn list_height(&self) -> usize {
        self.list_height
    }

    /// The row under the cursor
    pub fn current(&self) -> Option<&str> {
        self.visible.get(self.cursor).map(String::as_str)
    }

    fn with_query(self, query: String, matcher: &mut dyn FuzzyMatcher) -> Self {
        if query.is_empty() {
            let visible = first_rows(&self.all, self.list_height);
            let total_matches = self.all.len();
            return Self {
                visible,
                total_matches,
                query,
                cursor: 0,
                ..self
            };
        }

        let ranked = matcher.rank(&query, &self.all);
        let total_matches = ranked.len();
        let visible = first_rows(&ranked, self.list_height);
        let cursor = self.cursor.min(visible.len().saturating_sub(1));
        debug!(
            "Filter updated: query={:?} matches={} displayed={} cursor={}",
            query,
            total_matches,
            visible.len(),
            cursor
        );
        Self {
            visible,
            total_matches,
            query,
            cursor,
            ..self
        }
    }
}

fn first_rows(paths: &[String], height: usize) -> Vec<String> {
    paths.iter().take(height).cloned().collect()
}

/// Applies one action to the model, returning the next model and whether the
/// session is over.
pub fn update(
    model: PickerModel,
    action: PickerAction,
    matcher: &mut dyn FuzzyMatcher,
) -> (PickerModel, Outcome) {
    match action {
        PickerAction::Quit => (model, Outcome::Cancelled),
        PickerAction::Select => {
            let outcome = match model.current() {
                Some(path) => Outcome::Selected(path.to_string()),
                None => Outcome::Cancelled,
            };
            (model, outcome)
        }
        PickerAction::Up => {
            let cursor = model.cursor.saturating_sub(1);
            (PickerModel { cursor, ..model }, Outcome::Pending)
        }
        PickerAction::Down => {
            let cursor = if model.cursor + 1 < model.visible.len() {
                model.cursor + 1
            } else {
                model.cursor
            };
            (PickerModel { cursor, ..model }, Outcome::Pending)
        }
        PickerAction::Insert(c) => {
            let mut query = model.query.clone();
            query.push(c);
            (model.with_query(query, matcher), Outcome::Pending)
        }
        PickerAction::Backspace => {
            let mut query = model.query.clone();
            if query.pop().is_none() {
                return (model, Outcome::Pending);
            }
            (model.with_query(query, matcher), Outcome::Pending)
        }
    }
}
