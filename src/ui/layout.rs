use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 48;
pub const MIN_HEIGHT: u16 = 21;

/// Width of one daily tile, borders included.
pub const TILE_WIDTH: u16 = 14;
pub const MAX_TILES: usize = 9;
const MAX_SUGGESTION_ROWS: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub search: Rect,
    pub suggestions: Rect,
    pub hero: Rect,
    pub hourly: Rect,
    pub daily: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    #[must_use]
    pub fn for_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(6),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(area);

        let search = rows[0];
        let overlay_height =
            (MAX_SUGGESTION_ROWS + 2).min(area.bottom().saturating_sub(search.bottom()));
        Self {
            search,
            suggestions: Rect {
                x: search.x,
                y: search.bottom(),
                width: search.width,
                height: overlay_height,
            },
            hero: rows[1],
            hourly: rows[2],
            daily: rows[3],
            footer: rows[4],
        }
    }
}

/// Number of daily tiles that fit in `width` columns.
#[must_use]
pub fn visible_tiles(width: u16, days: usize) -> usize {
    usize::from(width / TILE_WIDTH).min(days).min(MAX_TILES)
}

#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
