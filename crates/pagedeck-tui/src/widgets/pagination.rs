use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use pagedeck_core::config::MarkersConfig;

use crate::pagination::Pagination;
use crate::theme::Theme;

pub struct PaginationWidget;

impl PaginationWidget {
    /// Arrange markers against `area` and draw them. The active panel's
    /// label sits left of a vertical column or above a horizontal row.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        pagination: &mut Pagination,
        markers: &MarkersConfig,
        theme: &Theme,
    ) {
        let widest = if markers.active.width() >= markers.page.width() {
            markers.active.as_str()
        } else {
            markers.page.as_str()
        };
        pagination.arrange(area, widest);

        let vertical = pagination.orientation().is_vertical();
        for (_, marker, cell) in pagination.arranged() {
            let (glyph, style) = if marker.active {
                (
                    markers.active.as_str(),
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (markers.page.as_str(), Style::default().fg(theme.marker))
            };
            frame.render_widget(Paragraph::new(Span::styled(glyph, style)), cell);

            if marker.label.is_empty() {
                continue;
            }
            if let Some(label_area) = Self::label_area(area, cell, marker.label.width() as u16, vertical) {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        marker.label.as_str(),
                        Style::default().fg(theme.active).bg(theme.bg1),
                    )),
                    label_area,
                );
            }
        }
    }

    fn label_area(area: Rect, cell: Rect, width: u16, vertical: bool) -> Option<Rect> {
        if width == 0 {
            return None;
        }
        if vertical {
            let room = cell.x.saturating_sub(area.x + 1);
            let width = width.min(room);
            (width > 0).then(|| Rect::new(cell.x - 1 - width, cell.y, width, 1))
        } else {
            if cell.y <= area.y {
                return None;
            }
            let width = width.min(area.width);
            let centred = (cell.x + cell.width / 2).saturating_sub(width / 2);
            let x = centred.clamp(area.x, area.right().saturating_sub(width));
            Some(Rect::new(x, cell.y - 1, width, 1))
        }
    }
}
