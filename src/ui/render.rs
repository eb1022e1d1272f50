//! Frame rendering
//!
//! Draws a [`View`]: header with search box, selection cards,
//! recommendation cards, status bar, then the suggestion dropdown and any
//! alert on top.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::Pane;
use crate::ui::view::{CardKind, PosterCard, SuggestionRow, View};
use crate::ui::Theme;

/// Cards drawn side by side before wrapping to a new row
const CARDS_PER_ROW: usize = 5;

/// Border (2) + poster line + caption
const CARD_HEIGHT: u16 = 4;

/// Main render function
pub fn draw(frame: &mut Frame, view: &View) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let search_area = render_header(frame, chunks[0], view);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_cards(
        frame,
        panes[0],
        format!(" YOUR PICKS ({}) ", view.selection_count),
        &view.selection,
        view.focused_pane == Some(Pane::Selection),
        "Press / and search to pick five movies",
        None,
    );
    render_cards(
        frame,
        panes[1],
        " RECOMMENDATIONS ".to_string(),
        &view.recommendations,
        view.focused_pane == Some(Pane::Recommendations),
        "Pick five movies, then press r",
        view.loading.as_deref(),
    );

    render_status_bar(frame, chunks[2], view);

    if !view.suggestions.is_empty() {
        render_suggestions(frame, search_area, area, &view.suggestions);
    }

    if let Some(ref alert) = view.alert {
        render_alert(frame, area, alert);
    }
}

/// Render logo and search box, returning the search box area
fn render_header(frame: &mut Frame, area: Rect, view: &View) -> Rect {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("MOVIE", Theme::title()),
        Span::styled(
            "REC",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let search_text = match &view.cursor_split {
        Some((before, after)) => format!("⌕ {}│{}", before, after),
        None if view.query.is_empty() => "⌕ Type / to search...".to_string(),
        None => format!("⌕ {}", view.query),
    };

    let search_box = Paragraph::new(search_text)
        .style(if view.editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if view.editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(search_box, header_chunks[1]);

    header_chunks[1]
}

/// Render a titled pane of poster cards, wrapping every CARDS_PER_ROW
fn render_cards(
    frame: &mut Frame,
    area: Rect,
    title: String,
    cards: &[PosterCard],
    focused: bool,
    empty_msg: &str,
    loading: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(msg) = loading {
        let loading = Paragraph::new(format!("⟳ {}", msg))
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if cards.is_empty() {
        let empty = Paragraph::new(empty_msg)
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    for (row_idx, row) in cards.chunks(CARDS_PER_ROW).enumerate() {
        let y = inner.y + row_idx as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }

        let row_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: CARD_HEIGHT,
        };
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW])
            .split(row_area);

        for (card, slot) in row.iter().zip(slots.iter()) {
            render_card(frame, *slot, card);
        }
    }
}

/// Render a single poster card
fn render_card(frame: &mut Frame, area: Rect, card: &PosterCard) {
    let border_style = if card.highlighted {
        Theme::border_focused()
    } else {
        match card.kind {
            CardKind::Selected => Theme::selected_movie(),
            CardKind::Recommended => Theme::recommended_movie(),
        }
    };

    let caption_style = if card.highlighted {
        Theme::highlighted()
    } else {
        Theme::movie_title()
    };

    let body = Paragraph::new(vec![
        Line::from(Span::styled(format!("▣ {}", card.poster_text()), Theme::movie_poster())),
        Line::from(Span::styled(card.caption.as_str(), caption_style)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );

    frame.render_widget(body, area);
}

/// Render the suggestion dropdown below the search box
fn render_suggestions(frame: &mut Frame, anchor: Rect, screen: Rect, rows: &[SuggestionRow]) {
    let room_below = screen.height.saturating_sub(anchor.y + anchor.height);
    let height = (rows.len() as u16 + 2).min(room_below);
    if height < 3 {
        return;
    }

    let dropdown = Rect {
        x: anchor.x,
        y: anchor.y + anchor.height,
        width: anchor.width,
        height,
    };
    frame.render_widget(Clear, dropdown);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let style = if row.highlighted {
                Theme::highlighted()
            } else if row.selected {
                Theme::suggestion_selected()
            } else {
                Theme::suggestion_item()
            };
            let marker = if row.selected { "✓ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(row.label.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused())
            .style(Style::default().bg(Theme::BACKGROUND_LIGHT)),
    );
    frame.render_widget(list, dropdown);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, view: &View) {
    let mode_indicator = if view.editing {
        Span::styled(" SEARCH ", Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT))
    } else {
        Span::styled(" NORMAL ", Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY))
    };

    let message = match &view.notice {
        Some(notice) => Span::styled(format!(" {} ", notice), Theme::warning()),
        None => Span::styled(format!(" {} ", view.catalog_line), Theme::dimmed()),
    };

    let help = if view.editing {
        " ↑↓:move  ↵:pick  ESC:done "
    } else {
        " /:search  r:recommend  c:clear  TAB:pane  x:unpick  q:quit "
    };

    let status_line = Line::from(vec![
        mode_indicator,
        message,
        Span::raw("│"),
        Span::styled(help, Theme::keybind()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(Theme::status_bar()), area);
}

/// Render blocking alert overlay
fn render_alert(frame: &mut Frame, area: Rect, alert: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 6.min(area.height);

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let alert_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(alert, Theme::error())),
        Line::from(Span::styled("press any key", Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ! ALERT ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(alert_block, popup_area);
}
