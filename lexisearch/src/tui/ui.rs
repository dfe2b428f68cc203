use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::controller::SearchState;
use crate::recent::RecentStore;
use crate::render;
use crate::tui::app::{App, Focus};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn draw<S, D>(frame: &mut Frame, app: &App<S, D>)
where
    S: RecentStore,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(chunks[1]);
    draw_recent(frame, app, body[0]);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(body[1]);
    draw_search_bar(frame, app, content[0]);
    draw_results(frame, app, content[1]);

    draw_footer(frame, chunks[2]);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " LexiSearch",
            Style::default()
                .fg(render::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Find precise definitions with a clean, modern interface.",
            Style::default().fg(render::MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn focused_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(render::PRIMARY)
    } else {
        Style::default().fg(render::MUTED)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn draw_recent<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect)
where
    S: RecentStore,
{
    let focused = app.focus == Focus::Recent;
    let block = focused_block(" Recent searches ".to_string(), focused);
    let recent = app.controller.recent();
    let items: Vec<ListItem> = render::recent(recent).into_iter().map(ListItem::new).collect();
    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(render::PRIMARY)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    if focused && !recent.is_empty() {
        state.select(Some(app.recent_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_search_bar<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect)
where
    S: RecentStore,
{
    let focused = app.focus == Focus::Search;
    let title = if app.input.is_typing() {
        " Search · Searching… ".to_string()
    } else {
        " Search ".to_string()
    };
    let value = app.input.value();
    let text = if value.is_empty() && !focused {
        Line::from(Span::styled(
            "Search an English word (e.g., \"ocean\", \"professional\")",
            Style::default().fg(render::MUTED),
        ))
    } else {
        Line::from(value.to_owned())
    };
    frame.render_widget(
        Paragraph::new(text).block(focused_block(title, focused)),
        area,
    );

    if focused {
        let before: String = value.chars().take(app.input.cursor()).collect();
        let offset = Span::raw(before).width() as u16;
        let cursor_x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_results<S, D>(frame: &mut Frame, app: &App<S, D>, area: Rect)
where
    S: RecentStore,
{
    let focused = app.focus == Focus::Suggestions;
    let border = if focused { render::PRIMARY } else { render::MUTED };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let (text, block) = match app.controller.state() {
        SearchState::Idle => (
            Text::from(vec![
                render::idle_hint(),
                Line::default(),
                render::suggestions(focused.then_some(app.suggestion_selected)),
            ]),
            block,
        ),
        SearchState::Loading => {
            let frame_symbol = SPINNER[app.spinner_frame % SPINNER.len()];
            (
                Text::from(Line::from(format!("{frame_symbol} Loading definitions…"))),
                block,
            )
        }
        SearchState::Failed(message) => (
            Text::from(render::error(message)),
            block.border_style(Style::default().fg(render::ERROR)),
        ),
        SearchState::Found(words) => (
            render::definitions(app.controller.query(), words),
            block.title(format!(" Definitions for {} ", app.controller.query())),
        ),
    };
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " Powered by Public Dictionary API",
            Style::default().fg(render::MUTED),
        ),
        Span::raw("  Enter search · Tab switch panel · PgUp/PgDn scroll · Esc quit"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
