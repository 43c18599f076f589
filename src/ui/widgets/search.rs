use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::state::{AppState, Focus, Suggestions},
    ui::theme::Theme,
};

use super::shared::{panel_block, popup_block, popup_panel_style};

const PLACEHOLDER: &str = "Search city…";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Search;
    let mut block = panel_block("Search", theme);
    if focused {
        block = block.border_style(Style::default().fg(theme.accent).bg(theme.surface));
    }

    let mut spans = vec![Span::styled("⌕ ", Style::default().fg(theme.muted_text))];
    if state.query.is_empty() {
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(theme.muted_text)));
    } else {
        spans.push(Span::styled(
            state.query.as_str(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }
    spans.push(Span::styled(
        format!("   {}", state.units.symbol()),
        Style::default().fg(theme.accent),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Suggestion list drawn over the dashboard below the search bar.
pub fn render_suggestions(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = suggestion_rows(&state.suggestions);
    if rows.is_empty() || area.height < 3 {
        return;
    }
    let height = u16::try_from(rows.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let area = Rect { height, ..area };
    frame.render_widget(Clear, area);

    let panel_style = popup_panel_style(theme);
    let selectable = matches!(state.suggestions, Suggestions::Results(_));
    let items = rows
        .into_iter()
        .map(|row| {
            let style = if selectable {
                panel_style
            } else {
                Style::default().fg(theme.muted_text)
            };
            ListItem::new(Line::styled(row, style))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(popup_block("Suggestions", theme, panel_style))
        .style(panel_style)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");
    let mut list_state =
        ListState::default().with_selected(selectable.then_some(state.suggestion_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub(crate) fn suggestion_rows(suggestions: &Suggestions) -> Vec<String> {
    match suggestions {
        Suggestions::Hidden => Vec::new(),
        Suggestions::Searching => vec!["Searching...".to_string()],
        Suggestions::NoResults => vec!["No results".to_string()],
        Suggestions::Results(results) => results.iter().map(|loc| loc.display_name()).collect(),
    }
}
