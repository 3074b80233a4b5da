// src/search/paginator.rs

//! Batch reveal over an already computed result list.

/// Default number of results revealed per batch.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 24;

/// Growing prefix window over a result list.
///
/// The window starts at one page and only grows through [`reveal_more`]
/// until [`collapse`] resets it. Running a new search means building a new
/// paginator.
///
/// [`reveal_more`]: Paginator::reveal_more
/// [`collapse`]: Paginator::collapse
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    items_per_page: usize,
    visible_count: usize,
}

impl<T> Paginator<T> {
    /// A page size of zero is treated as one.
    pub fn new(items: Vec<T>, items_per_page: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        let visible_count = items_per_page.min(items.len());
        Self {
            items,
            items_per_page,
            visible_count,
        }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Currently visible prefix, in list order.
    pub fn visible_slice(&self) -> &[T] {
        &self.items[..self.visible_count]
    }

    /// Reveal the next batch. Returns false when everything was already visible.
    pub fn reveal_more(&mut self) -> bool {
        let next = self
            .visible_count
            .saturating_add(self.items_per_page)
            .min(self.items.len());
        let grew = next > self.visible_count;
        self.visible_count = next;
        grew
    }

    /// Shrink back to the first page.
    pub fn collapse(&mut self) {
        self.visible_count = self.items_per_page.min(self.items.len());
    }

    /// True once more than one page has been revealed.
    pub fn can_collapse(&self) -> bool {
        self.visible_count > self.items_per_page
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.items.len()
    }

    /// How many items the next reveal would add.
    pub fn next_batch_len(&self) -> usize {
        self.items_per_page.min(self.items.len() - self.visible_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_window() {
        let paginator = Paginator::new((0..100).collect::<Vec<_>>(), 24);
        assert_eq!(paginator.visible_count(), 24);
        assert_eq!(paginator.visible_slice(), (0..24).collect::<Vec<_>>().as_slice());

        let small = Paginator::new(vec![1, 2, 3], 24);
        assert_eq!(small.visible_count(), 3);
        assert!(!small.has_more());
    }

    #[test]
    fn test_reveal_is_monotonic_and_clamped() {
        let (p, n) = (24, 100);
        let mut paginator = Paginator::new((0..n).collect::<Vec<_>>(), p);
        for k in 1..=6 {
            paginator.reveal_more();
            assert_eq!(paginator.visible_count(), (p + k * p).min(n));
        }
        assert!(!paginator.has_more());
        assert!(!paginator.reveal_more());
        assert_eq!(paginator.visible_count(), n);
    }

    #[test]
    fn test_visible_slice_is_idempotent() {
        let mut paginator = Paginator::new((0..50).collect::<Vec<_>>(), 10);
        paginator.reveal_more();
        let first = paginator.visible_slice().to_vec();
        let second = paginator.visible_slice().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
    }

    #[test]
    fn test_collapse() {
        let mut paginator = Paginator::new((0..50).collect::<Vec<_>>(), 10);
        assert!(!paginator.can_collapse());

        paginator.reveal_more();
        paginator.reveal_more();
        assert!(paginator.can_collapse());

        paginator.collapse();
        assert_eq!(paginator.visible_count(), 10);
        assert!(!paginator.can_collapse());
    }

    #[test]
    fn test_next_batch_len() {
        let mut paginator = Paginator::new((0..30).collect::<Vec<_>>(), 24);
        assert_eq!(paginator.next_batch_len(), 6);
        paginator.reveal_more();
        assert_eq!(paginator.next_batch_len(), 0);
    }

    #[test]
    fn test_empty_list() {
        let mut paginator: Paginator<u32> = Paginator::new(Vec::new(), 24);
        assert!(paginator.visible_slice().is_empty());
        assert!(!paginator.reveal_more());
        paginator.collapse();
        assert_eq!(paginator.visible_count(), 0);
    }

    #[test]
    fn test_huge_page_size_does_not_overflow() {
        let mut paginator = Paginator::new(vec![1, 2, 3], usize::MAX);
        assert_eq!(paginator.visible_count(), 3);
        assert!(!paginator.reveal_more());
        assert_eq!(paginator.visible_count(), 3);
        assert!(!paginator.can_collapse());
        assert_eq!(paginator.next_batch_len(), 0);
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let mut paginator = Paginator::new(vec!['a', 'b', 'c'], 0);
        assert_eq!(paginator.items_per_page(), 1);
        assert_eq!(paginator.visible_slice(), &['a']);
        paginator.reveal_more();
        assert_eq!(paginator.visible_slice(), &['a', 'b']);
    }
}
