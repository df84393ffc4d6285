//! Load-more pagination over a result list

use serde::Serialize;

/// Visible window over a listing: the first `visible` items are shown and
/// each "load more" reveals another `per_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    per_load: usize,
    visible: usize,
}

impl Pagination {
    pub fn new(per_load: usize) -> Self {
        let per_load = per_load.max(1);
        Self {
            per_load,
            visible: per_load,
        }
    }

    /// Window after `loads` clicks on "load more"
    pub fn at_page(per_load: usize, loads: usize) -> Self {
        let mut pagination = Self::new(per_load);
        pagination.visible = pagination.per_load.saturating_mul(loads.saturating_add(1));
        pagination
    }

    pub fn per_load(&self) -> usize {
        self.per_load
    }

    /// Number of items shown out of `total`
    pub fn visible_count(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Reveal the next batch; a no-op once everything is shown
    pub fn load_more(&mut self, total: usize) {
        if self.has_more(total) {
            self.visible = self.visible.saturating_add(self.per_load).min(total);
        }
    }

    /// Back to the first batch, e.g. when the filters change
    pub fn reset(&mut self) {
        self.visible = self.per_load;
    }

    pub fn window<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[..self.visible_count(items.len())]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(12)
    }
}
