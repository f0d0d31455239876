//! Overlay rendering (song form, delete confirmation, toasts)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{FormField, ModalMode, Notification, Severity, Song, SongForm, SongsState};
use super::utils::centered_rect;

const FORM_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 20;
const TOAST_WIDTH: u16 = 44;

pub fn render_song_form(frame: &mut Frame, songs: &SongsState, form: &SongForm) {
    let mut lines: Vec<Line> = Vec::new();

    // Failed save from the server
    if let Some(ref error) = songs.error {
        lines.push(Line::from(Span::styled(
            format!("✗ {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    for field in FormField::ALL {
        let focused = form.focused == field;
        let label_style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = form.value(field);
        let value_text = match field {
            FormField::Genre if value.is_empty() => "‹ choose with ←/→ ›".to_string(),
            FormField::Genre => format!("‹ {value} ›"),
            _ if focused => format!("{value}▏"),
            _ => value.to_string(),
        };
        let value_style = if field == FormField::Genre && value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(if focused { "› " } else { "  " }, label_style),
            Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
            Span::styled(value_text, value_style),
        ]));

        if let Some(message) = form.errors.get(&field) {
            lines.push(Line::from(Span::styled(
                format!("{:<width$}{message}", "", width = LABEL_WIDTH + 2),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    let hint = if songs.loading { "Saving..." } else { "Enter save · Esc cancel · Tab next field" };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    let title = match songs.modal_mode() {
        ModalMode::Create => " Add New Song ".to_string(),
        ModalMode::Edit => match songs.selected_song() {
            Some(song) => format!(" Edit \"{}\" ", song.title),
            None => " Edit Song ".to_string(),
        },
    };

    let popup_area = centered_rect(FORM_WIDTH, lines.len() as u16 + 2, frame.area());

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(popup, popup_area);
}

pub fn render_delete_confirmation(frame: &mut Frame, song: &Song) {
    let text = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(format!("\"{}\"", song.title), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" by {}?", song.artist)),
        ]),
        Line::from(""),
        Line::from(Span::styled("y delete · n keep", Style::default().fg(Color::DarkGray))),
    ];

    let popup_area = centered_rect(52, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Delete Song ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(popup, popup_area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✗",
        Severity::Warning => "!",
        Severity::Info => "i",
    }
}

/// Stack toasts in the top-right corner, newest on top, until the screen
/// runs out of rows.
pub fn render_notifications(frame: &mut Frame, notifications: &[Notification]) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let mut y = area.y + 1;

    for notification in notifications {
        let message_lines = notification.message.chars().count().div_ceil(inner_width).max(1) as u16;
        let height = message_lines + 2;
        if y + height > area.y + area.height {
            break;
        }

        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height,
        };
        let color = severity_color(notification.severity);

        frame.render_widget(Clear, toast_area);
        let toast = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} {} ", severity_icon(notification.severity), notification.title))
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );
        frame.render_widget(toast, toast_area);

        y += height;
    }
}
