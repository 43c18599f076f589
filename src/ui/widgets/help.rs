use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::{AppState, Focus},
    ui::theme::Theme,
};

/// One-line key hint for the focused area.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let hints: &[(&str, &str)] = match state.focus {
        Focus::Search => &[
            ("type", "search"),
            ("↑/↓", "choose"),
            ("Enter", "load"),
            ("Esc", "back"),
        ],
        Focus::Dashboard => &[
            ("/", "search"),
            ("←/→", "hour"),
            ("1-9", "day"),
            ("u", "°C/°F"),
            ("g", "locate"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (idx, (key, action)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(theme.muted_text),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.top)),
        area,
    );
}
