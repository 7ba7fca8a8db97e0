// Scroll state shared by the list panels
//
// Both panels are selection-driven: the selected index moves and the scroll
// offset follows to keep it visible. Auto-follow snaps to the bottom when
// content grows (used by the comments list so a freshly appended comment
// scrolls into view).

/// Scroll state for a single list panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the first visible item
    offset: usize,

    /// Total number of items
    total: usize,

    /// Number of items visible in the viewport
    viewport: usize,

    /// Snap to the bottom when content grows
    pub auto_follow: bool,
}

impl ScrollState {
    /// Manual scrolling (offset only moves to follow the selection)
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: false,
        }
    }

    /// Auto-follow enabled: new content keeps the view at the bottom
    pub fn following() -> Self {
        Self {
            auto_follow: true,
            ..Self::new()
        }
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    /// Update content and viewport dimensions; call each render frame
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        let grew = total > self.total;
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow && grew {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Move the offset so the given item index is inside the viewport
    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    /// Visible item range as (start, end), end exclusive
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_visible_scrolls_down_and_up() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.ensure_visible(10);
        let (start, end) = scroll.visible_range();
        assert_eq!((start, end), (6, 11));

        scroll.ensure_visible(2);
        let (start, end) = scroll.visible_range();
        assert_eq!((start, end), (2, 7));
    }

    #[test]
    fn test_auto_follow_snaps_on_growth() {
        let mut scroll = ScrollState::following();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(12, 5);
        assert_eq!(scroll.offset(), 7);
    }

    #[test]
    fn test_offset_clamped_when_content_shrinks() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.ensure_visible(19);

        scroll.update_dimensions(6, 5);
        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn test_visible_range_with_short_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(3, 10);
        assert_eq!(scroll.visible_range(), (0, 3));
    }
}
