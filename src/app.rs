//! App state and core application logic
//!
//! `App` is the selection controller: it owns the catalog, the search box,
//! the bounded selection and the latest recommendations. Key handlers mutate
//! it and may hand back an [`Effect`] for the event loop to perform; network
//! results come back in as [`AppEvent`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info, warn};

use crate::api::ApiError;
use crate::catalog::{normalize_query, Catalog, SUGGESTION_LIMIT};
use crate::models::{Movie, MovieId};
use crate::selection::{Selection, Toggle, MAX_SELECTION};

/// Alert raised when recommendations are requested without a full selection
pub const INCOMPLETE_SELECTION_ALERT: &str = "Please select exactly 5 movies.";

/// Warning logged when a sixth movie is picked
pub const SELECTION_FULL_WARNING: &str = "You can only select up to 5 movies.";

// =============================================================================
// Input Mode / Focus
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Pane receiving navigation keys in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Selection,
    Recommendations,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Selection => Pane::Recommendations,
            Pane::Recommendations => Pane::Selection,
        }
    }
}

// =============================================================================
// Loading States
// =============================================================================

/// Catalog readiness
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// Load requested, no answer yet
    #[default]
    Loading,
    /// Catalog available for search
    Ready,
    /// Load failed; search stays empty until restart
    Failed(String),
}

impl CatalogStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogStatus::Ready)
    }
}

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// List State
// =============================================================================

/// Highlight position for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently highlighted index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move highlight up
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move highlight down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Reset highlight
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        // Clamp selected to valid range
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Search Box
// =============================================================================

/// Search box state; `cursor` counts characters, not bytes
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Raw query text
    pub query: String,
    /// Cursor position in query
    pub cursor: usize,
    /// Rendered suggestions (ids into the catalog)
    pub suggestions: Vec<MovieId>,
    /// Suggestion highlight
    pub list: ListState,
}

impl SearchState {
    fn byte_offset(&self, chars: usize) -> usize {
        self.query
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Query split around the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_offset(self.cursor))
    }

    /// Replace rendered suggestions
    pub fn set_suggestions(&mut self, ids: Vec<MovieId>) {
        self.list.set_len(ids.len());
        self.suggestions = ids;
    }

    /// Drop rendered suggestions, keep the query
    pub fn dismiss(&mut self) {
        self.set_suggestions(Vec::new());
        self.list.reset();
    }

    pub fn highlighted(&self) -> Option<&MovieId> {
        self.suggestions.get(self.list.selected)
    }
}

// =============================================================================
// Effects and Events
// =============================================================================

/// Side effect requested by a state transition, performed by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the given (complete) selection to the recommendation endpoint
    Recommend(Vec<MovieId>),
}

/// Completed background work delivered to the app
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(Result<Vec<Movie>, ApiError>),
    RecommendationsLoaded(Result<Vec<Movie>, ApiError>),
}

// =============================================================================
// Main Application State
// =============================================================================

/// Selection controller state
#[derive(Debug, Default)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Pane with navigation focus in normal mode
    pub pane: Pane,
    /// Blocking alert; any key dismisses it
    pub alert: Option<String>,
    /// Transient status line message
    pub notice: Option<String>,

    pub catalog: Catalog,
    pub catalog_status: CatalogStatus,
    pub search: SearchState,

    pub selection: Selection,
    pub selection_list: ListState,

    pub recommendations: Vec<Movie>,
    pub recommendations_list: ListState,
    pub recommend_status: LoadingState,
}

impl App {
    /// Create a new App waiting for its catalog
    pub fn new() -> Self {
        Self {
            running: true,
            ..Self::default()
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Raise a blocking alert
    pub fn set_alert(&mut self, msg: impl Into<String>) {
        self.alert = Some(msg.into());
    }

    pub fn set_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some(msg.into());
    }

    // -------------------------------------------------------------------------
    // Catalog Loader
    // -------------------------------------------------------------------------

    /// Install the catalog fetch result
    pub fn apply_catalog(&mut self, result: Result<Vec<Movie>, ApiError>) {
        match result {
            Ok(movies) => {
                self.catalog = Catalog::new(movies);
                self.catalog_status = CatalogStatus::Ready;
                info!(count = self.catalog.len(), "movies loaded and sorted by popularity");
                // Anything typed while loading gets its suggestions now
                if self.input_mode == InputMode::Editing {
                    self.refresh_suggestions();
                }
            }
            Err(e) => {
                error!("Error loading movies: {}", e);
                self.catalog = Catalog::default();
                self.catalog_status = CatalogStatus::Failed(e.to_string());
            }
        }
    }

    // -------------------------------------------------------------------------
    // Suggestion Filter
    // -------------------------------------------------------------------------

    /// Recompute suggestions from the catalog and the current query
    pub fn refresh_suggestions(&mut self) {
        if !self.catalog_status.is_ready() || normalize_query(&self.search.query).is_empty() {
            self.search.dismiss();
            return;
        }

        let ids: Vec<MovieId> = self
            .catalog
            .search(&self.search.query, SUGGESTION_LIMIT)
            .into_iter()
            .map(|m| m.id.clone())
            .collect();

        if ids.is_empty() {
            debug!(query = %self.search.query, "no matches found");
        }
        // New result list, highlight starts at the top match
        self.search.list.reset();
        self.search.set_suggestions(ids);
    }

    /// Suggested movies in display order
    pub fn suggestions(&self) -> Vec<&Movie> {
        self.search
            .suggestions
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    /// Hide suggestions (focus left the search box)
    pub fn dismiss_suggestions(&mut self) {
        self.search.dismiss();
    }

    // -------------------------------------------------------------------------
    // Selection Toggle
    // -------------------------------------------------------------------------

    /// Add or remove a catalog movie from the selection
    ///
    /// Returns `None` when the id is neither in the catalog nor selected.
    pub fn toggle_movie(&mut self, id: &MovieId) -> Option<Toggle> {
        let title = match self.catalog.get(id) {
            Some(movie) => movie.caption(),
            None if self.selection.contains(id) => id.to_string(),
            None => {
                error!(%id, "movie not found in catalog");
                return None;
            }
        };

        let outcome = self.selection.toggle(id);
        match outcome {
            Toggle::Added => info!("Adding movie: {}", title),
            Toggle::Removed => info!("Movie with ID {} removed", id),
            Toggle::Full => {
                warn!("{}", SELECTION_FULL_WARNING);
                self.set_notice(SELECTION_FULL_WARNING);
            }
        }

        self.selection_list.set_len(self.selection.len());
        debug!(selected = ?self.selection.ids(), "selection changed");
        Some(outcome)
    }

    /// Toggle the highlighted suggestion
    pub fn toggle_highlighted_suggestion(&mut self) -> Option<Toggle> {
        let id = self.search.highlighted()?.clone();
        self.toggle_movie(&id)
    }

    /// Deselect the highlighted selection card
    pub fn toggle_highlighted_selection(&mut self) -> Option<Toggle> {
        let id = self.selection.ids().get(self.selection_list.selected)?.clone();
        self.toggle_movie(&id)
    }

    /// Selected movies in pick order (cards are keyed by id)
    pub fn selected_movies(&self) -> Vec<&Movie> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Recommendation Requester
    // -------------------------------------------------------------------------

    /// Validate the selection and request recommendations
    ///
    /// Returns the effect to perform, or `None` when the request is refused.
    pub fn request_recommendations(&mut self) -> Option<Effect> {
        if self.recommend_status.is_loading() {
            self.set_notice("Recommendations already on the way");
            return None;
        }

        if self.selection.len() != MAX_SELECTION {
            debug!(selected = self.selection.len(), "incomplete selection");
            self.set_alert(INCOMPLETE_SELECTION_ALERT);
            return None;
        }

        let ids = self.selection.ids().to_vec();
        info!(?ids, "requesting recommendations");
        self.recommend_status = LoadingState::Loading(Some("Fetching recommendations...".into()));
        Some(Effect::Recommend(ids))
    }

    /// Install the recommendation result
    pub fn apply_recommendations(&mut self, result: Result<Vec<Movie>, ApiError>) {
        self.recommend_status = LoadingState::Idle;

        match result {
            Ok(movies) => {
                self.recommendations_list = ListState::new(movies.len());
                self.recommendations = movies;
            }
            Err(ApiError::Rejected { message, .. }) => {
                self.set_alert(message);
            }
            Err(e) => {
                error!("Error fetching recommendations: {}", e);
                self.set_notice(format!("Recommendation request failed: {}", e));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection Clearer
    // -------------------------------------------------------------------------

    /// Empty the selection and both card views
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_list = ListState::default();
        self.recommendations.clear();
        self.recommendations_list = ListState::default();
        info!("selection cleared");
    }

    // -------------------------------------------------------------------------
    // Event Handling
    // -------------------------------------------------------------------------

    /// Apply a completed background task
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(result) => self.apply_catalog(result),
            AppEvent::RecommendationsLoaded(result) => self.apply_recommendations(result),
        }
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Leave the search box, clearing rendered suggestions
    pub fn blur_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.dismiss_suggestions();
    }

    /// Handle keyboard event, returning an effect for the event loop if any
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        // An alert swallows the next key
        if self.alert.take().is_some() {
            return None;
        }
        self.notice = None;

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.blur_search(),
            KeyCode::Enter => {
                self.toggle_highlighted_suggestion();
            }
            KeyCode::Up => self.search.list.up(),
            KeyCode::Down => self.search.list.down(),
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.refresh_suggestions();
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.refresh_suggestions();
            }
            KeyCode::Delete => {
                self.search.delete();
                self.refresh_suggestions();
            }
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Home => self.search.cursor_home(),
            KeyCode::End => self.search.cursor_end(),
            _ => {}
        }
        None
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('s') => self.focus_search(),
            KeyCode::Char('r') => return self.request_recommendations(),
            KeyCode::Char('c') => self.clear_selection(),
            KeyCode::Tab => self.pane = self.pane.next(),
            KeyCode::Up | KeyCode::Char('k') => self.focused_list().up(),
            KeyCode::Down | KeyCode::Char('j') => self.focused_list().down(),
            KeyCode::Enter | KeyCode::Delete | KeyCode::Char('x') => {
                if self.pane == Pane::Selection {
                    self.toggle_highlighted_selection();
                }
            }
            _ => {}
        }
        None
    }

    fn focused_list(&mut self) -> &mut ListState {
        match self.pane {
            Pane::Selection => &mut self.selection_list,
            Pane::Recommendations => &mut self.recommendations_list,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
