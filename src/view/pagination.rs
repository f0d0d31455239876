//! Pagination bar

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::SongsState;

/// Pages shown on each side of the current one
const WINDOW: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// First page, current page +/- `WINDOW`, last page, with gaps between
/// runs that are not adjacent.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(WINDOW).max(1);
    let end = (current + WINDOW).min(total);

    let mut pages: Vec<u32> = Vec::with_capacity((end - start + 3) as usize);
    pages.push(1);
    pages.extend(start..=end);
    pages.push(total);
    pages.dedup();

    let mut items = Vec::with_capacity(pages.len() + 2);
    let mut previous = None;
    for page in pages {
        if let Some(prev) = previous {
            if page <= prev {
                continue;
            }
            if page - prev > 1 {
                items.push(PageItem::Gap);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

pub fn render_pagination(frame: &mut Frame, area: Rect, songs: &SongsState) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "‹ Prev ",
        if songs.has_previous_page() { enabled } else { disabled },
    )];

    for item in visible_pages(songs.current_page, songs.total_pages) {
        match item {
            PageItem::Page(page) if page == songs.current_page => spans.push(Span::styled(
                format!(" {page} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            PageItem::Page(page) => spans.push(Span::styled(format!(" {page} "), enabled)),
            PageItem::Gap => spans.push(Span::styled(" … ", disabled)),
        }
    }

    spans.push(Span::styled(
        " Next ›",
        if songs.has_next_page() { enabled } else { disabled },
    ));

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Pages ([ / ]) "));
    frame.render_widget(bar, area);
}
