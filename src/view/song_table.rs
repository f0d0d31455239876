//! Song listing for the current page

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::SongsState;
use super::utils::{format_duration, render_scrollable_list, truncate_string};

const YEAR_WIDTH: usize = 4;
const GENRE_WIDTH: usize = 11;
const DURATION_WIDTH: usize = 6;

/// Returns (title_width, artist_width, album_width)
fn text_column_widths(content_width: usize) -> (usize, usize, usize) {
    // " {title}  {artist}  {album}  {year}  {genre}  {duration}"
    let fixed = 1 + 2 * 5 + YEAR_WIDTH + GENRE_WIDTH + DURATION_WIDTH;
    let remaining = content_width.saturating_sub(fixed);
    let title = remaining * 40 / 100;
    let artist = remaining * 30 / 100;
    let album = remaining.saturating_sub(title + artist);
    (title, artist, album)
}

pub fn render_song_table(frame: &mut Frame, area: Rect, songs: &SongsState, selected_row: usize) {
    let title = format!(" Songs ({} total) ", songs.total_songs);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    if songs.songs.is_empty() {
        let (text, color) = if songs.loading {
            ("Loading songs...", Color::Yellow)
        } else {
            ("No songs yet. Press n to add your first song.", Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)).block(block), area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let (title_w, artist_w, album_w) = text_column_widths(content_width);
    let selected_row = selected_row.min(songs.songs.len() - 1);

    let header = ListItem::new(format!(
        " {}  {}  {}  {}  {}  {}",
        truncate_string("Title", title_w),
        truncate_string("Artist", artist_w),
        truncate_string("Album", album_w),
        truncate_string("Year", YEAR_WIDTH),
        truncate_string("Genre", GENRE_WIDTH),
        truncate_string("Length", DURATION_WIDTH),
    ))
    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows = songs.songs.iter().enumerate().map(|(i, song)| {
        let style = if i == selected_row {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        ListItem::new(format!(
            " {}  {}  {}  {:>year$}  {}  {:>dur$}",
            truncate_string(&song.title, title_w),
            truncate_string(&song.artist, artist_w),
            truncate_string(&song.album, album_w),
            song.year,
            truncate_string(&song.genre, GENRE_WIDTH),
            format_duration(song.duration),
            year = YEAR_WIDTH,
            dur = DURATION_WIDTH,
        ))
        .style(style)
    });

    let items: Vec<ListItem> = std::iter::once(header).chain(rows).collect();
    // Row 0 is the column header.
    render_scrollable_list(frame, area, items, selected_row + 1, block);
}

/// Shown in place of the table when the last operation failed
pub fn render_error_panel(frame: &mut Frame, area: Rect, message: &str) {
    let text = format!("{message}\n\nPress r to try again.");
    let panel = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Something went wrong ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_columns_share_remaining_width() {
        let (title, artist, album) = text_column_widths(132);
        assert_eq!(title + artist + album, 132 - 32);
        assert!(title >= artist);
    }

    #[test]
    fn narrow_terminals_do_not_underflow() {
        assert_eq!(text_column_widths(10), (0, 0, 0));
    }
}
