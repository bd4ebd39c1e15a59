//! Slice bounds for Relay pagination arguments.

use std::ops::Range;

use crate::ports::{Cursor, PageArgs};

/// Half-open window `[start, end)` over an ordered collection.
///
/// Always satisfies `start <= end <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceBounds {
    pub start: usize,
    pub end: usize,
    /// Size of the full collection the window was computed against.
    pub total: usize,
}

impl SliceBounds {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Items exist after the window.
    pub fn has_next_page(&self) -> bool {
        self.end < self.total
    }

    /// Items exist before the window.
    pub fn has_previous_page(&self) -> bool {
        self.start > 0
    }
}

/// Compute the window selected by `args` over `total` items.
///
/// The steps run in a fixed order: `after`, `before`, `first`, `last`.
/// Cursors that do not decode, or decode outside `[0, total)`, are
/// ignored. `first` and `last` compose: `first` trims from the front of
/// the cursor window, then `last` trims from the back of what is left.
pub fn slice_bounds(total: usize, args: &PageArgs) -> SliceBounds {
    let mut start = 0;
    let mut end = total;

    if let Some(after) = in_range(args.after.as_ref(), total) {
        start = after + 1;
    }

    if let Some(before) = in_range(args.before.as_ref(), total) {
        end = before;
    }

    if let Some(first) = args.first() {
        end = end.min(start.saturating_add(first));
    }

    if let Some(last) = args.last() {
        start = start.max(end.saturating_sub(last));
    }

    // `after` past `before` leaves a crossed window; collapse it.
    let end = end.max(start);

    SliceBounds { start, end, total }
}

fn in_range(cursor: Option<&Cursor>, total: usize) -> Option<usize> {
    cursor.and_then(Cursor::index).filter(|&index| index < total)
}
