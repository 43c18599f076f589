use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    ui::{
        sparkline::{SparkStyle, render as render_spark},
        theme::{Theme, blended},
    },
};

use super::shared::panel_block;

mod braille;

pub use braille::{BrailleCell, BrailleGrid};

pub fn render(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let block = panel_block(title(state), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 || inner.width < 4 {
        return;
    }

    let [chart_area, slider_area, preview_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let values = state.chart_values();
    if values.is_empty() {
        frame.render_widget(
            Paragraph::new("No hourly data").style(Style::default().fg(theme.muted_text)),
            chart_area,
        );
        return;
    }

    let selected = state.window.as_ref().map_or(0, |w| w.selected());
    if state.spark_surface.resize(chart_area.width, chart_area.height) {
        tracing::trace!(
            width = chart_area.width,
            height = chart_area.height,
            "sparkline surface resized"
        );
    }
    let commands = render_spark(&values, selected, &state.spark_surface, &SparkStyle::default());
    let mut grid = BrailleGrid::new(chart_area.width, chart_area.height, theme.surface_rgb);
    grid.paint(&commands);
    frame.render_widget(Paragraph::new(chart_lines(&grid, theme)), chart_area);

    frame.render_widget(
        Paragraph::new(slider_line(selected, values.len(), slider_area.width, theme)),
        slider_area,
    );
    frame.render_widget(Paragraph::new(preview_line(state, theme)), preview_area);
}

fn title(state: &AppState) -> String {
    let day = state
        .selected_day
        .and_then(|idx| state.slices.get(idx))
        .and_then(|slice| slice.times.first())
        .map(|time| time.format("%a, %b %-d").to_string());
    match day {
        Some(label) => format!("Hourly · {label}"),
        None => "Next 24 hours".to_string(),
    }
}

fn chart_lines(grid: &BrailleGrid, theme: &Theme) -> Vec<Line<'static>> {
    grid.cells()
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| {
                        let style = cell.color.map_or_else(Style::default, |rgb| {
                            Style::default().fg(blended(theme, rgb))
                        });
                        Span::styled(cell.glyph.to_string(), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn thumb_position(selected: usize, len: usize, width: usize) -> usize {
    if len > 1 && width > 0 {
        selected.min(len - 1) * (width - 1) / (len - 1)
    } else {
        0
    }
}

/// Slider track with the thumb at `selected` of `len` positions.
fn slider_line(selected: usize, len: usize, width: u16, theme: &Theme) -> Line<'static> {
    let width = usize::from(width);
    if width == 0 {
        return Line::default();
    }
    let thumb = thumb_position(selected, len, width);
    Line::from(vec![
        Span::styled("─".repeat(thumb), Style::default().fg(theme.accent)),
        Span::styled(
            "●",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "─".repeat(width - thumb - 1),
            Style::default().fg(theme.muted_text),
        ),
    ])
}

fn preview_line(state: &AppState, theme: &Theme) -> Line<'static> {
    let Some(preview) = state.hour_preview() else {
        return Line::default();
    };
    Line::from(vec![
        Span::styled(
            preview.label(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}{}", preview.temp, preview.units.symbol()),
            Style::default().fg(theme.text),
        ),
    ])
}
