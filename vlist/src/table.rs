use alloc::vec::Vec;

use crate::PositionEntry;

/// Layout projection of the full item list.
///
/// One [`PositionEntry`] per item, stored as a flat array indexed by position. Entries are laid
/// out back to back: `top[0] == 0`, `top[i] == bottom[i - 1]` and `bottom[i] == top[i] +
/// height[i]`. Heights are always at least 1, so `bottom` is strictly increasing and the table
/// can be binary searched (see [`crate::locate`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionTable {
    entries: Vec<PositionEntry>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table of `count` entries seeded with a uniform estimate.
    pub fn with_estimate(count: usize, estimated_item_height: u32) -> Self {
        let mut table = Self::new();
        table.initialize(count, estimated_item_height);
        table
    }

    /// Creates a table from explicit per-item heights.
    pub fn from_heights(heights: impl IntoIterator<Item = u32>) -> Self {
        let mut table = Self::new();
        table.fill(heights);
        table
    }

    /// Rebuilds the table for `count` items, all at `estimated_item_height`.
    ///
    /// Must be called whenever the item list changes; previous entries are discarded.
    pub fn initialize(&mut self, count: usize, estimated_item_height: u32) {
        vdebug!(count, estimated_item_height, "PositionTable::initialize");
        self.fill(core::iter::repeat_n(estimated_item_height, count));
    }

    fn fill(&mut self, heights: impl IntoIterator<Item = u32>) {
        self.entries.clear();
        let mut top = 0u64;
        for (index, height) in heights.into_iter().enumerate() {
            let height = height.max(1);
            let bottom = top.saturating_add(height as u64);
            self.entries.push(PositionEntry {
                index,
                height,
                top,
                bottom,
            });
            top = bottom;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PositionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionEntry> {
        self.entries.iter()
    }

    pub fn entry(&self, index: usize) -> Option<&PositionEntry> {
        self.entries.get(index)
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        self.entries.get(index).map(|e| e.height)
    }

    pub fn top(&self, index: usize) -> Option<u64> {
        self.entries.get(index).map(|e| e.top)
    }

    pub fn bottom(&self, index: usize) -> Option<u64> {
        self.entries.get(index).map(|e| e.bottom)
    }

    /// Bottom of the last entry; sizes the scroll spacer.
    pub fn total_height(&self) -> u64 {
        self.entries.last().map_or(0, |e| e.bottom)
    }

    /// Replaces the height of `index` with a measured value and shifts every later entry.
    ///
    /// Returns the applied delta (`measured - previous`), `0` when nothing changed. Repeating a
    /// call with the same height is a no-op. A measured height of 0 is stored as 1.
    ///
    /// `index` must be in range. Indexes always come from the rendered window, so an
    /// out-of-range index is a caller bug: it is debug-asserted and otherwise ignored.
    pub fn record_measured_height(&mut self, index: usize, measured_height: u32) -> i64 {
        let len = self.entries.len();
        if index >= len {
            vwarn!(index, len, "record_measured_height: out-of-range index");
            debug_assert!(
                index < len,
                "record_measured_height: out-of-range index (i={index}, len={len})"
            );
            return 0;
        }

        let measured_height = measured_height.max(1);
        let entry = &mut self.entries[index];
        if entry.height == measured_height {
            return 0;
        }
        let delta = measured_height as i64 - entry.height as i64;
        vtrace!(index, from = entry.height, to = measured_height, "record_measured_height");
        entry.height = measured_height;
        entry.bottom = entry.top.saturating_add(measured_height as u64);

        let mut prev_bottom = entry.bottom;
        for next in &mut self.entries[index + 1..] {
            next.top = prev_bottom;
            next.bottom = prev_bottom.saturating_add(next.height as u64);
            prev_bottom = next.bottom;
        }
        delta
    }

    /// Checks the layout invariants (contiguity and strictly increasing `bottom`).
    pub fn is_consistent(&self) -> bool {
        let mut expected_top = 0u64;
        for (i, e) in self.entries.iter().enumerate() {
            if e.index != i
                || e.height == 0
                || e.top != expected_top
                || e.bottom != e.top.saturating_add(e.height as u64)
            {
                return false;
            }
            expected_top = e.bottom;
        }
        true
    }
}
