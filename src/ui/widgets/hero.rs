use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::{ForecastBundle, Units, convert_wind_speed, format_temp},
    ui::theme::{Theme, icon_color},
};

use super::shared::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut block = panel_block("Now", theme);
    if state.detecting {
        block = block.title_top(
            Line::styled("Detecting...", Style::default().fg(theme.warning)).right_aligned(),
        );
    }

    let lines = match &state.weather {
        Some(bundle) => weather_lines(bundle, state, theme),
        None => vec![Line::styled(
            state.loading_message.clone(),
            Style::default().fg(theme.muted_text),
        )],
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn weather_lines(bundle: &ForecastBundle, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mode = state.settings.icon_mode;
    let units = state.units;
    let headline = bundle.headline();

    let mut temp_line = Vec::new();
    if let Some(classification) = headline {
        temp_line.push(Span::styled(
            format!("{} ", classification.icon.glyph(mode)),
            Style::default().fg(icon_color(theme, classification.category)),
        ));
    }
    temp_line.push(Span::styled(
        format_temp(bundle.current.as_ref().map(|c| c.temperature_c), units),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ));
    temp_line.push(Span::styled(
        format!("   {}", summary(bundle, state)),
        Style::default().fg(theme.muted_text),
    ));

    let updated = state
        .last_updated
        .map_or_else(|| "--".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string());

    vec![
        Line::styled(
            bundle.location.display_name(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Line::from(temp_line),
        Line::styled(conditions(bundle), Style::default().fg(theme.text)),
        Line::styled(format!("Updated {updated}"), Style::default().fg(theme.muted_text)),
    ]
}

/// `icon category • Max .. • Min ..`, rendered under the temperature.
pub(crate) fn summary(bundle: &ForecastBundle, state: &AppState) -> String {
    let (high, low) = bundle.today_high_low_c();
    let units: Units = state.units;
    let condition = bundle.headline().map_or_else(
        || "--".to_string(),
        |c| format!("{} {}", c.icon.glyph(state.settings.icon_mode), c.category.label()),
    );
    format!(
        "{condition} • Max {} • Min {}",
        format_temp(high, units),
        format_temp(low, units)
    )
}

pub(crate) fn conditions(bundle: &ForecastBundle) -> String {
    let humidity = bundle
        .humidity_now
        .map_or_else(|| "--".to_string(), |h| format!("{}%", h.round()));
    let wind = bundle
        .current
        .as_ref()
        .and_then(|c| c.wind_speed_kmh)
        .map_or_else(|| "--".to_string(), |kmh| format!("{:.1}", convert_wind_speed(kmh)));
    format!("Humidity {humidity}  ·  Wind {wind} m/s")
}
