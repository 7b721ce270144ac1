// SPDX-License-Identifier: MPL-2.0
//! Current-page bookkeeping for multi-page content.

/// One-based page cursor.
///
/// `current` stays in `[1, total]` whenever `total > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: usize,
    total: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current: 1,
            total: 0,
        }
    }
}

impl PageCursor {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { current: 1, total }
    }

    #[must_use]
    pub fn current(self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.total
    }

    /// Replaces the page total; the current page resets to 1 when it no
    /// longer fits.
    pub fn set_total(&mut self, total: usize) {
        if total == self.total {
            return;
        }
        self.total = total;
        if self.current > total || self.current == 0 {
            self.current = 1;
        }
    }

    /// Moves to `page`, clamped to the valid range. Returns true if it moved.
    pub fn go_to(&mut self, page: usize) -> bool {
        if self.total == 0 {
            return false;
        }
        let target = page.clamp(1, self.total);
        let changed = target != self.current;
        self.current = target;
        changed
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn previous(&mut self) -> bool {
        self.go_to(self.current.saturating_sub(1))
    }

    #[must_use]
    pub fn has_next(self) -> bool {
        self.current < self.total
    }

    #[must_use]
    pub fn has_previous(self) -> bool {
        self.total > 0 && self.current > 1
    }

    /// Whether pagination controls are worth showing.
    #[must_use]
    pub fn is_multi_page(self) -> bool {
        self.total > 1
    }
}
