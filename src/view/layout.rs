//! Layout rendering (header with stats, key hints footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::SongsState;

pub fn render_header(frame: &mut Frame, area: Rect, songs: &SongsState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title
            Constraint::Length(44), // Stats
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("♫ songshelf", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled("  manage your song collection", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let stat = |label: &'static str, value: String| {
        [
            Span::styled(value, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {label}  "), Style::default().fg(Color::Gray)),
        ]
    };
    let spans: Vec<Span> = [
        stat("songs", songs.songs.len().to_string()),
        stat("page", songs.current_page.to_string()),
        stat("pages", songs.total_pages.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let stats = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Stats ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(stats, chunks[1]);
}

pub fn render_footer(frame: &mut Frame, area: Rect, songs: &SongsState, confirming_delete: bool) {
    let hints: &[(&str, &str)] = if songs.is_modal_open() {
        &[
            ("Tab", "next field"),
            ("←/→", "genre"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ]
    } else if confirming_delete {
        &[("y", "delete"), ("n", "keep")]
    } else {
        &[
            ("↑/↓", "select"),
            ("←/→", "page"),
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("r", "reload"),
            ("x/X", "dismiss"),
            ("1-4", "demo toasts"),
            ("q", "quit"),
        ]
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {action}   "), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
