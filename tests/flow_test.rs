//! End-to-end flow tests for movierec
//!
//! Drives the selection controller with key events and real (mocked)
//! service calls, then checks the rendered view and terminal buffer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::{Matcher, Server};
use movierec::api::MovieServiceClient;
use movierec::app::{App, AppEvent, Effect, InputMode, INCOMPLETE_SELECTION_ALERT};
use movierec::models::{Movie, MovieId};
use movierec::ui::{self, View};
use movierec::{MAX_SELECTION, SUGGESTION_LIMIT};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::json;

// =============================================================================
// Helpers
// =============================================================================

fn press(app: &mut App, code: KeyCode) -> Option<Effect> {
    app.handle_key(KeyEvent::new(code, KeyModifiers::empty()))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Replace the search text the way a user would
fn search_for(app: &mut App, text: &str) {
    if app.input_mode != InputMode::Editing {
        press(app, KeyCode::Char('/'));
    }
    press(app, KeyCode::End);
    while !app.search.query.is_empty() {
        press(app, KeyCode::Backspace);
    }
    type_text(app, text);
}

fn numbered_catalog(count: u64) -> Vec<Movie> {
    (1..=count)
        .map(|n| {
            Movie::new(n, format!("Film {}", n), 1990 + n as u16)
                .with_popularity(n as f64)
                .with_backdrop(format!("https://img/{}.jpg", n))
        })
        .collect()
}

fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    let view = View::build(app);
    terminal.draw(|frame| ui::draw(frame, &view)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// =============================================================================
// Catalog + Search Scenarios
// =============================================================================

#[tokio::test]
async fn test_catalog_sorted_and_searchable() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/movies")
        .with_status(200)
        .with_body(
            r#"[
                {"movieId": 1, "name": "Alpha", "year": 2000, "popularity": 5},
                {"movieId": 2, "name": "Beta", "year": 2001, "popularity": 9}
            ]"#,
        )
        .create_async()
        .await;

    let client = MovieServiceClient::new(server.url());
    let mut app = App::new();
    app.handle_event(AppEvent::CatalogLoaded(client.fetch_catalog().await));

    let order: Vec<&str> = app.catalog.movies().iter().map(|m| m.title()).collect();
    assert_eq!(order, vec!["Beta", "Alpha"]);

    search_for(&mut app, "a");
    let suggested: Vec<&str> = app.suggestions().iter().map(|m| m.title()).collect();
    assert_eq!(suggested, vec!["Beta", "Alpha"]);
}

#[test]
fn test_suggestions_bounded_and_matching() {
    let mut app = App::new();
    let mut movies = numbered_catalog(40);
    movies.push(Movie::new(100u64, "The FILM Critic", 2010));
    movies.push(Movie::new(101u64, "Unrelated", 2011));
    app.apply_catalog(Ok(movies));

    for query in ["film", "FILM", " fil ", "1", "critic", "zzz", "", "e"] {
        search_for(&mut app, query);
        let needle = query.trim().to_lowercase();
        let suggestions = app.suggestions();
        assert!(suggestions.len() <= SUGGESTION_LIMIT, "query {:?}", query);
        assert!(
            suggestions.iter().all(|m| m.title().to_lowercase().contains(&needle)),
            "query {:?}",
            query
        );
        if needle.is_empty() {
            assert!(suggestions.is_empty());
        }
    }
}

// =============================================================================
// Selection Scenarios
// =============================================================================

#[test]
fn test_pick_via_search_and_cap_at_five() {
    let mut app = App::new();
    app.apply_catalog(Ok(numbered_catalog(8)));

    for n in 1..=6 {
        search_for(&mut app, &format!("film {}", n));
        press(&mut app, KeyCode::Enter);
    }

    assert_eq!(app.selection.len(), MAX_SELECTION);
    assert!(!app.selection.contains(&MovieId::from(6u64)));

    let view = View::build(&app);
    assert_eq!(view.selection.len(), MAX_SELECTION);
}

#[test]
fn test_toggle_twice_removes_card() {
    let mut app = App::new();
    app.apply_catalog(Ok(numbered_catalog(3)));

    search_for(&mut app, "film 2");
    press(&mut app, KeyCode::Enter);
    let view = View::build(&app);
    assert_eq!(view.selection.len(), 1);
    assert!(view.suggestions[0].selected);

    press(&mut app, KeyCode::Enter);
    let view = View::build(&app);
    assert!(app.selection.is_empty());
    assert!(view.selection.is_empty());
    assert!(!view.suggestions[0].selected);
}

#[test]
fn test_clear_empties_everything() {
    let mut app = App::new();
    app.apply_catalog(Ok(numbered_catalog(5)));
    for n in 1..=5u64 {
        app.toggle_movie(&MovieId::from(n));
    }
    app.apply_recommendations(Ok(vec![Movie::new(9u64, "X", 1999)]));

    press(&mut app, KeyCode::Char('c'));

    let view = View::build(&app);
    assert_eq!(app.selection.len(), 0);
    assert!(view.selection.is_empty());
    assert!(view.recommendations.is_empty());
}

// =============================================================================
// Recommendation Scenarios
// =============================================================================

#[test]
fn test_incomplete_selection_makes_no_request() {
    for picks in [0u64, 1, 4] {
        let mut app = App::new();
        app.apply_catalog(Ok(numbered_catalog(5)));
        for n in 1..=picks {
            app.toggle_movie(&MovieId::from(n));
        }

        assert_eq!(press(&mut app, KeyCode::Char('r')), None);
        assert_eq!(app.alert.as_deref(), Some(INCOMPLETE_SELECTION_ALERT));
    }
}

#[tokio::test]
async fn test_full_flow_renders_recommendation_card() {
    let mut server = Server::new_async().await;
    let recommend = server
        .mock("POST", "/recommend")
        .match_body(Matcher::Json(json!({"movies": ["1", "2", "3", "4", "5"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"recommendations": [
                {"movieId": 9, "name": "X", "year": 1999, "backdrop_url": "u"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = MovieServiceClient::new(server.url());
    let mut app = App::new();
    app.apply_catalog(Ok(numbered_catalog(5)));
    for n in 1..=5u64 {
        app.toggle_movie(&MovieId::from(n));
    }

    let effect = press(&mut app, KeyCode::Char('r')).expect("complete selection should request");
    let Effect::Recommend(ids) = effect;
    app.handle_event(AppEvent::RecommendationsLoaded(client.recommend(&ids).await));

    recommend.assert_async().await;

    let view = View::build(&app);
    assert_eq!(view.recommendations.len(), 1);
    assert_eq!(view.recommendations[0].caption, "X (1999)");
    assert_eq!(view.recommendations[0].poster_text(), "u");

    let screen = render_to_string(&app, 120, 30);
    assert!(screen.contains("X (1999)"));
    assert_eq!(screen.matches("X (1999)").count(), 1);
}

#[tokio::test]
async fn test_service_error_shown_as_alert() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/recommend")
        .with_status(400)
        .with_body(r#"{"error": "Please select exactly 5 movies"}"#)
        .create_async()
        .await;

    let client = MovieServiceClient::new(server.url());
    let mut app = App::new();
    app.apply_catalog(Ok(numbered_catalog(5)));
    for n in 1..=5u64 {
        app.toggle_movie(&MovieId::from(n));
    }

    let Some(Effect::Recommend(ids)) = press(&mut app, KeyCode::Char('r')) else {
        panic!("Expected a recommend effect");
    };
    app.handle_event(AppEvent::RecommendationsLoaded(client.recommend(&ids).await));

    assert_eq!(app.alert.as_deref(), Some("Please select exactly 5 movies"));
    assert!(app.recommendations.is_empty());

    let screen = render_to_string(&app, 100, 30);
    assert!(screen.contains("Please select exactly 5 movies"));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_small_and_large_terminals() {
    let mut app = App::new();
    app.apply_catalog(Ok(numbered_catalog(12)));
    for n in 1..=3u64 {
        app.toggle_movie(&MovieId::from(n));
    }
    search_for(&mut app, "film");

    for (w, h) in [(80, 24), (200, 50), (20, 6)] {
        let screen = render_to_string(&app, w, h);
        assert!(!screen.is_empty());
    }

    // Dropdown lists the most popular match first
    let screen = render_to_string(&app, 120, 40);
    assert!(screen.contains("Film 12 (2002)"));

    press(&mut app, KeyCode::Esc);
    let screen = render_to_string(&app, 120, 40);
    assert!(screen.contains("3/5 selected"));
    assert!(!screen.contains("Film 12 (2002)"));
    assert!(screen.contains("Film 1 (1991)"));
}
