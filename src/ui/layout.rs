use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub entry: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    UiLayout {
        entry: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Rect hanging below `anchor`, clipped to `bounds`.
pub(crate) fn dropdown_rect(anchor: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let y = anchor.y.saturating_add(anchor.height).min(bounds.bottom());
    let x = anchor.x.max(bounds.x);
    let width = width.min(bounds.right().saturating_sub(x));
    let height = height.min(bounds.bottom().saturating_sub(y));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_rect, dropdown_rect, split_layout};

    #[test]
    fn split_layout_reserves_entry_and_status_rows() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 120,
            height: 40,
        };

        let layout = split_layout(area);
        assert_eq!(layout.entry.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.body.height, 36);
        assert_eq!(layout.status.y, 39);
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(10, 5, 20, 8);
        let centered = centered_rect(area, 99, 99);
        assert_eq!(centered.x, 10);
        assert_eq!(centered.y, 5);
        assert_eq!(centered.width, 20);
        assert_eq!(centered.height, 8);
    }

    #[test]
    fn dropdown_rect_hangs_below_anchor_and_clips() {
        let bounds = Rect::new(0, 0, 40, 10);
        let anchor = Rect::new(2, 0, 30, 3);

        let rect = dropdown_rect(anchor, bounds, 60, 20);
        assert_eq!(rect, Rect::new(2, 3, 38, 7));
    }
}
