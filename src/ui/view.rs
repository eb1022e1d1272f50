//! View model
//!
//! `View::build` maps the controller state to everything the screen shows.
//! It is pure data, so presentation can be tested without a terminal.

use crate::app::{App, CatalogStatus, InputMode, Pane};
use crate::models::{Movie, MovieId};
use crate::selection::MAX_SELECTION;

/// One row of the suggestion dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub id: MovieId,
    /// `"<name> (<year>)"`
    pub label: String,
    /// Movie is part of the selection
    pub selected: bool,
    /// Keyboard highlight
    pub highlighted: bool,
}

/// Which view a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Selected,
    Recommended,
}

/// Poster card: image address plus caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterCard {
    pub id: MovieId,
    pub kind: CardKind,
    pub poster_url: Option<String>,
    /// Shown when there is no poster address
    pub alt: String,
    pub caption: String,
    pub highlighted: bool,
}

impl PosterCard {
    fn new(movie: &Movie, kind: CardKind, highlighted: bool) -> Self {
        Self {
            id: movie.id.clone(),
            kind,
            poster_url: movie.backdrop_url.clone().filter(|u| !u.trim().is_empty()),
            alt: movie.poster_alt(),
            caption: movie.caption(),
            highlighted,
        }
    }

    /// Text for the poster line
    pub fn poster_text(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(&self.alt)
    }
}

/// Everything drawn for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub query: String,
    /// Query split at the cursor while editing
    pub cursor_split: Option<(String, String)>,
    pub editing: bool,
    pub suggestions: Vec<SuggestionRow>,
    pub selection: Vec<PosterCard>,
    pub recommendations: Vec<PosterCard>,
    pub focused_pane: Option<Pane>,
    /// e.g. "3/5 selected"
    pub selection_count: String,
    pub catalog_line: String,
    pub loading: Option<String>,
    pub notice: Option<String>,
    pub alert: Option<String>,
}

impl View {
    pub fn build(app: &App) -> Self {
        let editing = app.input_mode == InputMode::Editing;

        let suggestions = app
            .suggestions()
            .into_iter()
            .enumerate()
            .map(|(i, movie)| SuggestionRow {
                id: movie.id.clone(),
                label: movie.caption(),
                selected: app.selection.contains(&movie.id),
                highlighted: i == app.search.list.selected,
            })
            .collect();

        let selection_focus = !editing && app.pane == Pane::Selection;
        let selection = app
            .selected_movies()
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let highlighted = selection_focus && i == app.selection_list.selected;
                PosterCard::new(m, CardKind::Selected, highlighted)
            })
            .collect();

        let recs_focus = !editing && app.pane == Pane::Recommendations;
        let recommendations = app
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, m)| {
                PosterCard::new(
                    m,
                    CardKind::Recommended,
                    recs_focus && i == app.recommendations_list.selected,
                )
            })
            .collect();

        let catalog_line = match &app.catalog_status {
            CatalogStatus::Loading => "Loading catalog...".to_string(),
            CatalogStatus::Ready => format!("{} movies", app.catalog.len()),
            CatalogStatus::Failed(_) => "Catalog unavailable".to_string(),
        };

        let cursor_split = editing.then(|| {
            let (before, after) = app.search.split_at_cursor();
            (before.to_string(), after.to_string())
        });

        Self {
            query: app.search.query.clone(),
            cursor_split,
            editing,
            suggestions,
            selection,
            recommendations,
            focused_pane: (!editing).then_some(app.pane),
            selection_count: format!("{}/{} selected", app.selection.len(), MAX_SELECTION),
            catalog_line,
            loading: app.recommend_status.message().map(str::to_string),
            notice: app.notice.clone(),
            alert: app.alert.clone(),
        }
    }
}
