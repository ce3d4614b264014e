//! Page navigation state.

/// The page currently shown and the highest page ever reached.
///
/// `current_page` always stays within `0..=max_page_reached`, and
/// `max_page_reached` never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    current_page: usize,
    max_page_reached: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn max_page_reached(&self) -> usize {
        self.max_page_reached
    }

    /// Raises the high-water mark to at least `page`.
    pub fn extend_to(&mut self, page: usize) {
        if page > self.max_page_reached {
            self.max_page_reached = page;
        }
    }

    /// Appends a page after the last one reached and moves onto it.
    pub fn push_page(&mut self) -> usize {
        self.max_page_reached = self.max_page_reached.saturating_add(1);
        self.current_page = self.max_page_reached;
        self.current_page
    }

    /// Moves to `page` if it is in range. Returns whether the cursor moved.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page > self.max_page_reached || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Moves by `delta` pages if the target is in range.
    pub fn step(&mut self, delta: isize) -> bool {
        match self.current_page.checked_add_signed(delta) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_page < self.max_page_reached
    }
}
