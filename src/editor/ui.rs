/// Rows reserved above the canvas for the menu bar.
pub const CANVAS_OFFSET: u16 = 1;

pub struct Layout {
    pub canvas_y: u16,
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub status_y: u16,
    pub term_width: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16, board_width: u16, board_height: u16) -> Self {
        let status_h: u16 = 1;
        let available = term_height.saturating_sub(CANVAS_OFFSET + status_h);
        Layout {
            canvas_y: CANVAS_OFFSET,
            canvas_width: board_width.min(term_width),
            canvas_height: board_height.min(available),
            status_y: term_height.saturating_sub(status_h),
            term_width,
        }
    }

    /// Whether a canvas cell is inside the drawable area.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.canvas_width) && y < i64::from(self.canvas_height)
    }
}
