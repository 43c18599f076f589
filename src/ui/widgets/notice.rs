use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{app::state::AppState, ui::theme::Theme};

use super::shared::{popup_block, popup_panel_style};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(message) = state.notice.as_deref() else {
        return;
    };
    frame.render_widget(Clear, area);

    let panel_style = popup_panel_style(theme);
    let block = popup_block("Notice", theme, panel_style);
    let lines = vec![
        Line::styled(
            message,
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::styled("Press any key to continue", Style::default().fg(theme.muted_text)),
    ];
    let text = Paragraph::new(lines)
        .block(block)
        .style(panel_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}
