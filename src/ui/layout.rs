use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub sidebar: Rect,
    pub content: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(vertical[1]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        sidebar: main_chunks[0],
        content: main_chunks[1],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OverviewAreas {
    pub cards: [Rect; 4],
    pub activity: Rect,
    pub api: Rect,
}

/// Stat cards across the top, recent activity below, last API probe at the bottom
pub fn overview_areas(content: Rect) -> OverviewAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(content);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    OverviewAreas {
        cards: [cards[0], cards[1], cards[2], cards[3]],
        activity: rows[1],
        api: rows[2],
    }
}

/// Fixed-size box centered in `r`, shrunk to fit small terminals
pub fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

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

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_fill_screen() {
        let size = Rect::new(0, 0, 100, 30);
        let areas = areas(size);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.sidebar.width, 24);
        assert_eq!(areas.sidebar.width + areas.content.width, 100);
        assert_eq!(areas.command_line.y, 29);
    }

    #[test]
    fn test_centered_box_clamps() {
        let r = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_box(50, 12, r), r);
        assert_eq!(centered_box(10, 4, r), Rect::new(5, 3, 10, 4));
    }

    #[test]
    fn test_rect_inner_and_contains() {
        let r = Rect::new(2, 2, 10, 5);
        let inner = rect_inner(r);
        assert_eq!(inner, Rect::new(3, 3, 8, 3));
        assert!(rect_contains(r, 2, 2));
        assert!(!rect_contains(r, 12, 2));
    }
}
