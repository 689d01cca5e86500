use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use pagedeck_core::{Orientation, Panel};

use crate::session::DeckSession;
use crate::theme::Theme;

/// Draws the strip of panels as seen through the viewport.
///
/// At most two panels are visible at once: the one the offset falls in and,
/// mid-transition, its successor.
pub struct DeckViewWidget;

impl DeckViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, session: &DeckSession, theme: &Theme) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg0)),
            area,
        );

        let vertical = session.layout().orientation().is_vertical();
        let length = if vertical { area.height } else { area.width } as u32;
        if length == 0 || area.width == 0 {
            return;
        }

        let offset = session.offset();
        let deck = session.deck();
        let markers = session.pagination().map(|p| p.orientation());
        let first = (offset / length) as usize;
        let last = if offset % length == 0 { first } else { first + 1 };

        for index in first..=last.min(deck.len().saturating_sub(1)) {
            let Some(panel) = deck.get(index) else {
                continue;
            };
            let scratch = Self::render_panel(panel, index, deck.len(), area, markers, theme);
            // Position of the panel's leading edge relative to the viewport
            let shift = index as i64 * i64::from(length) - i64::from(offset);
            Self::blit(&scratch, frame.buffer_mut(), area, shift, vertical);
        }
    }

    fn render_panel(
        panel: &Panel,
        index: usize,
        count: usize,
        area: Rect,
        markers: Option<Orientation>,
        theme: &Theme,
    ) -> Buffer {
        let rect = Rect::new(0, 0, area.width, area.height);
        let mut buf = Buffer::empty(rect);

        let title = panel.title.as_deref().unwrap_or(&panel.id);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {}/{} ", index + 1, count),
                    Style::default().fg(theme.grey1),
                ))
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey1))
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(rect);
        block.render(rect, &mut buf);

        Paragraph::new(panel.body.as_str())
            .style(Style::default().fg(theme.fg0))
            .wrap(Wrap { trim: false })
            .render(Self::body_area(inner, markers), &mut buf);

        buf
    }

    /// Panel interior minus a one-cell margin and the cells the pagination
    /// markers draw over: a right-hand column for vertical decks, the marker
    /// and label rows for horizontal ones
    fn body_area(inner: Rect, markers: Option<Orientation>) -> Rect {
        let padded = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        match markers {
            Some(Orientation::Vertical) => Rect {
                width: inner.width.saturating_sub(6),
                ..padded
            },
            Some(Orientation::Horizontal) => Rect {
                height: inner.height.saturating_sub(2),
                ..padded
            },
            None => padded,
        }
    }

    /// Copy `scratch` into `dest` at `area`, displaced by `shift` cells along
    /// the scroll axis. Cells falling outside `area` are dropped.
    fn blit(scratch: &Buffer, dest: &mut Buffer, area: Rect, shift: i64, vertical: bool) {
        for y in 0..area.height {
            for x in 0..area.width {
                let (dx, dy) = if vertical {
                    (x as i64, y as i64 + shift)
                } else {
                    (x as i64 + shift, y as i64)
                };
                if dx < 0 || dy < 0 || dx >= area.width as i64 || dy >= area.height as i64 {
                    continue;
                }
                let Some(cell) = scratch.cell((x, y)) else {
                    continue;
                };
                let target = (area.x + dx as u16, area.y + dy as u16);
                if let Some(slot) = dest.cell_mut(target) {
                    *slot = cell.clone();
                }
            }
        }
    }
}
