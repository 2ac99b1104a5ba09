//! Vertical scrolling window over the document

/// First visible document line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    top_line: usize,
}

impl Viewport {
    pub const fn new() -> Self {
        Self { top_line: 0 }
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Scroll the minimum amount that keeps `row` visible in a window of
    /// `screen_height` lines.
    pub fn scroll_to(&mut self, row: usize, screen_height: usize) {
        let height = screen_height.max(1);
        if row < self.top_line {
            self.top_line = row;
        } else if row >= self.top_line + height {
            self.top_line = row + 1 - height;
        }
    }

    /// Screen row of a document line, if it is visible
    pub fn screen_row(&self, row: usize, screen_height: usize) -> Option<usize> {
        row.checked_sub(self.top_line)
            .filter(|offset| *offset < screen_height)
    }
}
