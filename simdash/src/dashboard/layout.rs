use crate::dashboard::{command::ControlToken, position::Size};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

/// Screen regions of the dashboard, derived from the terminal area alone so that drawing and mouse hit-testing
/// agree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DashboardLayout {
    pub title: Rect,
    pub map: Rect,
    pub infra: Rect,
    pub video: Rect,
    pub controls: Rect,
    pub status: Rect,
    pub buttons: Vec<(ControlToken, Rect)>,
}

impl DashboardLayout {
    const TITLE_HEIGHT: u16 = 1;
    const BUTTON_WIDTH: u16 = 7;
    const BUTTON_HEIGHT: u16 = 3;
    const BUTTON_GAP: u16 = 1;
    const PAD_COLUMNS: u16 = 4;
    const PAD_ROWS: u16 = 3;

    // NOTE: (row, column) within the pad grid
    const BUTTON_CELLS: [(ControlToken, u16, u16); 6] = [
        (ControlToken::Up, 0, 1),
        (ControlToken::Left, 1, 0),
        (ControlToken::Right, 1, 2),
        (ControlToken::Down, 2, 1),
        (ControlToken::A, 0, 3),
        (ControlToken::B, 2, 3),
    ];

    pub fn new(area: Rect) -> Self {
        let controls_height = Self::PAD_ROWS * Self::BUTTON_HEIGHT + 2;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::TITLE_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(controls_height),
            ])
            .split(area);
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
            .split(rows[1]);
        let controls = rows[2];
        let pad_area = Self::panel_inner(controls);
        let pad_width = Self::PAD_COLUMNS * (Self::BUTTON_WIDTH + Self::BUTTON_GAP);
        let buttons = Self::BUTTON_CELLS
            .iter()
            .map(|&(token, row, column)| {
                let button = Rect::new(
                    pad_area.x.saturating_add(column * (Self::BUTTON_WIDTH + Self::BUTTON_GAP)),
                    pad_area.y.saturating_add(row * Self::BUTTON_HEIGHT),
                    Self::BUTTON_WIDTH,
                    Self::BUTTON_HEIGHT,
                );

                (token, button.intersection(pad_area))
            })
            .collect();
        let status_x = pad_area.x.saturating_add(pad_width);
        let status = Rect::new(
            status_x,
            pad_area.y,
            pad_area.right().saturating_sub(status_x),
            pad_area.height,
        );

        Self {
            title: rows[0],
            map: panels[0],
            infra: panels[1],
            video: panels[2],
            controls,
            status,
            buttons,
        }
    }

    pub fn panel_inner(panel: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(panel)
    }

    /// The logical viewport of the map panel: its inner cells scaled by `cell_size`, never smaller than
    /// `min_viewport`.
    pub fn map_viewport(&self, cell_size: Size, min_viewport: Size) -> Size {
        let inner = Self::panel_inner(self.map);
        let width = i32::from(inner.width).saturating_mul(cell_size.width);
        let height = i32::from(inner.height).saturating_mul(cell_size.height);

        Size::new(width, height).at_least(min_viewport)
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<ControlToken> {
        self.buttons.iter().find_map(|&(token, button)| {
            let contains = (button.left()..button.right()).contains(&column) && (button.top()..button.bottom()).contains(&row);

            contains.then_some(token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_panels_above_controls() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));

        assert_eq!(layout.title, Rect::new(0, 0, 120, 1));
        assert_eq!(layout.map, Rect::new(0, 1, 40, 28));
        assert_eq!(layout.infra, Rect::new(40, 1, 40, 28));
        assert_eq!(layout.video, Rect::new(80, 1, 40, 28));
        assert_eq!(layout.controls, Rect::new(0, 29, 120, 11));
    }

    #[test]
    fn buttons_form_a_direction_pad() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));

        // NOTE: the pad's inner area starts at (1, 30)
        assert_eq!(layout.button_at(9, 30), Some(ControlToken::Up));
        assert_eq!(layout.button_at(1, 33), Some(ControlToken::Left));
        assert_eq!(layout.button_at(17, 35), Some(ControlToken::Right));
        assert_eq!(layout.button_at(9, 36), Some(ControlToken::Down));
        assert_eq!(layout.button_at(25, 30), Some(ControlToken::A));
        assert_eq!(layout.button_at(31, 38), Some(ControlToken::B));
    }

    #[test]
    fn gaps_and_other_panels_hit_nothing() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));

        assert_eq!(layout.button_at(8, 30), None);
        assert_eq!(layout.button_at(1, 30), None);
        assert_eq!(layout.button_at(9, 10), None);
        assert_eq!(layout.button_at(0, 29), None);
    }

    #[test]
    fn map_viewport_scales_cells_with_a_floor() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));
        let cell_size = Size::new(8, 16);

        assert_eq!(layout.map_viewport(cell_size, Size::new(300, 300)), Size::new(304, 416));

        let small = DashboardLayout::new(Rect::new(0, 0, 30, 20));

        assert_eq!(small.map_viewport(cell_size, Size::new(300, 300)), Size::new(300, 300));
    }

    #[test]
    fn tiny_terminals_do_not_overflow() {
        let area = Rect::new(0, 0, 10, 5);
        let layout = DashboardLayout::new(area);

        for (_token, button) in &layout.buttons {
            assert_eq!(button.intersection(area), *button);
        }
    }
}
