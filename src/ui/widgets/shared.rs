use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

pub(super) fn popup_panel_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.popup_text)
        .bg(theme.popup_surface)
}

pub(super) fn popup_block<'a>(title: &'a str, theme: &Theme, panel_style: Style) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(panel_style)
        .border_style(
            Style::default()
                .fg(theme.popup_border)
                .bg(theme.popup_surface),
        )
}

pub(super) fn panel_block<'a>(
    title: impl Into<ratatui::text::Line<'a>>,
    theme: &Theme,
) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .border_style(Style::default().fg(theme.border).bg(theme.surface))
}
