//! Pagination cursor over the visible view.

use std::ops::Range;

/// Count of visible records already rendered.
///
/// # Invariants
/// - `cursor <= len` for the `len` passed to the last [`Paginator::next_batch`].
/// - `batch_size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    cursor: usize,
    batch_size: usize,
}

impl Paginator {
    pub fn new(batch_size: usize) -> Self {
        Self {
            cursor: 0,
            batch_size: batch_size.max(1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Returns the next slice range of a list of length `len` and advances
    /// the cursor past it. Near the end the range is shorter; once exhausted
    /// it is empty.
    pub fn next_batch(&mut self, len: usize) -> Range<usize> {
        let start = self.cursor.min(len);
        let end = start.saturating_add(self.batch_size).min(len);
        self.cursor = end;
        start..end
    }

    /// Whether every record of a list of length `len` has been rendered.
    pub fn is_exhausted(&self, len: usize) -> bool {
        self.cursor >= len
    }
}

#[cfg(test)]
mod tests {
    use super::Paginator;

    #[test]
    fn advances_in_batches_and_clamps_to_length() {
        let mut paginator = Paginator::new(6);
        assert_eq!(paginator.next_batch(14), 0..6);
        assert!(!paginator.is_exhausted(14));
        assert_eq!(paginator.next_batch(14), 6..12);
        assert_eq!(paginator.next_batch(14), 12..14);
        assert_eq!(paginator.cursor(), 14);
        assert!(paginator.is_exhausted(14));
        assert_eq!(paginator.next_batch(14), 14..14);
        assert_eq!(paginator.cursor(), 14);
    }

    #[test]
    fn exact_multiple_is_exhausted_after_last_full_batch() {
        let mut paginator = Paginator::new(6);
        paginator.next_batch(12);
        assert!(!paginator.is_exhausted(12));
        paginator.next_batch(12);
        assert!(paginator.is_exhausted(12));
    }

    #[test]
    fn empty_list_is_immediately_exhausted() {
        let mut paginator = Paginator::new(6);
        assert!(paginator.is_exhausted(0));
        assert_eq!(paginator.next_batch(0), 0..0);
    }

    #[test]
    fn reset_returns_to_start_and_zero_batch_is_promoted() {
        let mut paginator = Paginator::new(0);
        assert_eq!(paginator.batch_size(), 1);
        paginator.next_batch(3);
        paginator.reset();
        assert_eq!(paginator.cursor(), 0);
    }
}
