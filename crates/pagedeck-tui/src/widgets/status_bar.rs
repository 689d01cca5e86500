use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let base = Style::default().bg(theme.bg2);

        let (status_text, busy) = match app.active_session() {
            Some(session) => {
                let position = format!(
                    " {} | {}/{}",
                    session.deck().title,
                    session.navigator().current_index() + 1,
                    session.deck().len()
                );
                let deck_count = app.sessions.len();
                let position = if deck_count > 1 {
                    format!("{} | deck {}/{}", position, app.active + 1, deck_count)
                } else {
                    position
                };
                (position, session.is_busy())
            }
            None => (" no deck".to_string(), false),
        };
        let status_text = match &app.status_message {
            Some(msg) => format!("{} | {}", status_text, msg),
            None => status_text,
        };

        let busy_text = if busy { " ~ " } else { "   " };
        let help_hint = if app.config.deck.keyboard {
            " q:quit j/k:panels tab:deck wheel:scroll "
        } else {
            " q:quit tab:deck wheel:scroll "
        };
        let padding_len = area.width.saturating_sub(
            (status_text.width() + busy_text.width() + help_hint.width()) as u16,
        ) as usize;

        let line = Line::from(vec![
            Span::styled(status_text, base.fg(theme.fg0)),
            Span::styled(busy_text, base.fg(theme.busy)),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, base.fg(theme.grey2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
