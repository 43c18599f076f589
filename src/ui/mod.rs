pub mod layout;
pub mod sparkline;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::{AppState, Focus},
    ui::theme::{Theme, detect_color_capability, theme_for},
};

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let theme = theme_for(
        state.headline().map(|c| c.category),
        detect_color_capability(),
    );
    render_with_theme(frame, state, &theme);
}

/// Draws the dashboard with an explicit theme.
pub fn render_with_theme(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();

    if area.width < layout::MIN_WIDTH || area.height < layout::MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {}x{}.",
            layout::MIN_WIDTH,
            layout::MIN_HEIGHT
        ))
        .block(Block::default().borders(Borders::ALL).title("weather-spark"));
        frame.render_widget(warning, area);
        return;
    }

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.top).fg(theme.text)),
        area,
    );

    let regions = layout::DashboardLayout::for_area(area);
    widgets::search::render(frame, regions.search, state, theme);
    widgets::hero::render(frame, regions.hero, state, theme);
    widgets::hourly::render(frame, regions.hourly, state, theme);
    widgets::daily::render(frame, regions.daily, state, theme);
    widgets::help::render(frame, regions.footer, state, theme);

    if state.focus == Focus::Search && state.suggestions.is_visible() {
        widgets::search::render_suggestions(frame, regions.suggestions, state, theme);
    }
    if state.notice.is_some() {
        widgets::notice::render(frame, layout::centered_rect(60, 30, area), state, theme);
    }
}
