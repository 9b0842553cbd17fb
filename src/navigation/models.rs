use crate::events::consts::PAGE_SIZE;

/// Cursor over the display points plus the running count of fetched records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    current_index: usize,
    total_result_count: usize,
    page_size: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            total_result_count: 0,
            page_size: PAGE_SIZE,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_result_count(&self) -> usize {
        self.total_result_count
    }

    /// Zero-based page the running count ends on; `-1` before anything was
    /// fetched.
    pub fn current_page(&self) -> i64 {
        (self.total_result_count / self.page_size) as i64 - 1
    }

    /// The last fetched page was full, so another one may follow.
    pub fn last_page_was_full(&self) -> bool {
        self.total_result_count % self.page_size == 0
    }

    /// Moves the cursor one marker forward or back, wrapping at both ends.
    /// Returns `None` and leaves the cursor alone when there are no points.
    pub fn step_marker(&mut self, forward: bool, point_count: usize) -> Option<usize> {
        if point_count == 0 {
            return None;
        }
        let last = point_count - 1;
        let current = self.current_index.min(last);
        self.current_index = match (forward, current) {
            (true, index) if index == last => 0,
            (true, index) => index + 1,
            (false, 0) => last,
            (false, index) => index - 1,
        };
        Some(self.current_index)
    }

    /// Points the cursor at a clicked marker. Unknown indices are ignored.
    pub fn select(&mut self, index: usize, point_count: usize) -> bool {
        if index >= point_count {
            return false;
        }
        self.current_index = index;
        true
    }

    /// New point list: cursor back to the first marker.
    pub fn reset_cursor(&mut self) {
        self.current_index = 0;
    }

    pub fn reset_for_new_search(&mut self) {
        self.total_result_count = 0;
    }

    /// Page that would continue the records fetched so far. `None` once a
    /// partial or empty page showed there is nothing left to fetch.
    pub fn next_page(&self) -> Option<usize> {
        (self.total_result_count > 0 && self.last_page_was_full())
            .then(|| self.total_result_count / self.page_size)
    }

    /// Count everything before `page` as already seen, so that after the
    /// page's batch is recorded the count ends exactly on that page.
    pub fn rewind_to_page(&mut self, page: usize) {
        self.total_result_count = page.saturating_mul(self.page_size);
    }

    pub fn record_batch(&mut self, records: usize) {
        self.total_result_count += records;
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
