//! Pending GPU upload bookkeeping

use std::ops::Range;

/// What must be sent to the [`BufferSink`](crate::render::BufferSink) on the next sync
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingUpload {
    /// Buffers are in sync
    #[default]
    Clean,
    /// Buffer layout changed; everything must be replaced
    Full,
    /// Only these vertex ranges changed (sorted, non-overlapping, non-adjacent)
    Ranges(Vec<Range<usize>>),
}

impl PendingUpload {
    /// Require a full upload
    pub fn mark_full(&mut self) {
        *self = Self::Full;
    }

    /// Record a patched vertex range
    pub fn mark(&mut self, range: Range<usize>) {
        match self {
            Self::Full => {}
            Self::Clean => *self = Self::Ranges(vec![range]),
            Self::Ranges(ranges) => insert_merged(ranges, range),
        }
    }

    /// Take the pending work, leaving `Clean`
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Whether nothing is pending
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

fn insert_merged(ranges: &mut Vec<Range<usize>>, mut range: Range<usize>) {
    // First range that ends at or after the new start can touch it.
    let first = ranges.partition_point(|r| r.end < range.start);
    let mut last = first;
    while last < ranges.len() && ranges[last].start <= range.end {
        range.start = range.start.min(ranges[last].start);
        range.end = range.end.max(ranges[last].end);
        last += 1;
    }
    ranges.splice(first..last, std::iter::once(range));
}
