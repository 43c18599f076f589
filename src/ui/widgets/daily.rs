use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::weather::{DailyForecast, Units, classify, display_temp},
    ui::{
        layout::{TILE_WIDTH, visible_tiles},
        theme::{Theme, icon_color},
    },
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(bundle) = &state.weather else {
        return;
    };
    let count = visible_tiles(area.width, bundle.daily.len());
    if count == 0 {
        return;
    }

    let tiles = Layout::horizontal(vec![Constraint::Length(TILE_WIDTH); count]).split(area);
    for (idx, (day, tile)) in bundle.daily.iter().zip(tiles.iter()).enumerate() {
        let selected = state.selected_day == Some(idx);
        render_tile(frame, *tile, idx, day, selected, state, theme);
    }
}

fn render_tile(
    frame: &mut Frame,
    area: Rect,
    index: usize,
    day: &DailyForecast,
    selected: bool,
    state: &AppState,
    theme: &Theme,
) {
    let border = if selected { theme.accent } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{}", index + 1))
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .border_style(Style::default().fg(border).bg(theme.surface));

    let mut label_style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        label_style = label_style.fg(theme.accent);
    }
    let (icon, icon_style) = tile_icon(day, state.settings.icon_mode, theme);
    let lines = vec![
        Line::styled(tile_label(day), label_style).centered(),
        Line::styled(icon, icon_style).centered(),
        Line::from(tile_range(day, state.units)).centered(),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Short date label, for example `Thu, Feb 12`.
pub(crate) fn tile_label(day: &DailyForecast) -> String {
    day.date.format("%a, %b %-d").to_string()
}

fn tile_icon(day: &DailyForecast, mode: IconMode, theme: &Theme) -> (&'static str, Style) {
    day.weather_code.map_or(("--", Style::default().fg(theme.muted_text)), |code| {
        let classification = classify(code);
        (
            classification.icon.glyph(mode),
            Style::default().fg(icon_color(theme, classification.category)),
        )
    })
}

/// `max°/min°` in the active units.
pub(crate) fn tile_range(day: &DailyForecast, units: Units) -> String {
    let fmt = |value: Option<f32>| {
        value.map_or_else(|| "--".to_string(), |v| format!("{}°", display_temp(v, units)))
    };
    format!("{}/{}", fmt(day.temperature_max_c), fmt(day.temperature_min_c))
}
