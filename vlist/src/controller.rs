use alloc::vec::Vec;

use crate::key::{KeyHeightMap, ListKey};
use crate::reconcile::reconcile;
use crate::window::{select_window, visible_count};
use crate::{
    ItemKey, ListOptions, Phase, PositionTable, ReconcileReport, RenderFrame, RenderedItem,
    ScrollState, WindowState, locate,
};

/// Drives a virtual list with adaptive row heights.
///
/// The controller owns the position table, the scroll offset and the current window. It holds no
/// UI objects; a host drives it with a two-phase handshake per frame:
///
/// 1. Feed events (`on_scroll`, `on_resize`, `set_items`), then call [`Self::render_frame`] and
///    mount the returned rows.
/// 2. Once the rows are painted, call [`Self::paint_complete`] with a closure that reads the real
///    row heights. Corrections are written back to the table and the render offset is
///    recomputed.
///
/// Measurements run at most once per render: scroll events only recompute the window.
#[derive(Clone, Debug)]
pub struct ScrollController<K = ItemKey> {
    options: ListOptions,
    keys: Vec<K>,
    table: PositionTable,
    key_heights: KeyHeightMap<K>,
    epoch: u64,

    viewport_height: u32,
    visible_count: usize,
    scroll_offset: i64,
    window: WindowState,
    phase: Phase,
}

impl<K: ListKey> ScrollController<K> {
    /// Creates a controller for an empty list.
    pub fn new(options: ListOptions) -> Self {
        vdebug!(
            estimated_item_height = options.estimated_item_height,
            buffer_scale = options.buffer_scale,
            "ScrollController::new"
        );
        let mut c = Self {
            viewport_height: options.initial_viewport_height.unwrap_or(0),
            visible_count: 0,
            scroll_offset: options.initial_offset,
            keys: Vec::new(),
            table: PositionTable::new(),
            key_heights: KeyHeightMap::<K>::new(),
            epoch: 0,
            window: WindowState::default(),
            phase: Phase::Idle,
            options,
        };
        c.window = c.derive_window();
        c
    }

    /// Creates a controller and supplies the initial list.
    pub fn with_items(options: ListOptions, keys: impl IntoIterator<Item = K>) -> Self {
        let mut c = Self::new(options);
        c.set_items(keys);
        c
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Changing the estimate rebuilds the table; any other change only re-derives the window.
    pub fn set_options(&mut self, options: ListOptions) {
        let estimate_changed = options.estimated_item_height != self.options.estimated_item_height;
        self.options = options;
        vtrace!(
            estimated_item_height = self.options.estimated_item_height,
            buffer_scale = self.options.buffer_scale,
            "ScrollController::set_options"
        );
        if estimate_changed {
            self.rebuild_table();
            self.request_render();
        } else {
            self.update_window();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_buffer_scale(&mut self, buffer_scale: usize) {
        if self.options.buffer_scale == buffer_scale {
            return;
        }
        self.options.buffer_scale = buffer_scale;
        self.update_window();
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    pub fn total_height(&self) -> u64 {
        self.table.total_height()
    }

    /// Identity of the current table; bumped on every rebuild.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            viewport_height: self.viewport_height,
        }
    }

    /// Restores viewport geometry and scroll offset from a snapshot in a single update.
    pub fn restore_scroll_state(&mut self, state: ScrollState) {
        self.viewport_height = state.viewport_height;
        self.scroll_offset = state.offset;
        self.update_window();
    }

    /// Supplies the ordered item keys.
    ///
    /// The list is compared with the current one by length and content. When it differs the
    /// table is rebuilt from the estimate (plus retained measurements, if enabled), the epoch is
    /// bumped and a render is requested. Returns whether the table was rebuilt.
    pub fn set_items(&mut self, keys: impl IntoIterator<Item = K>) -> bool {
        let keys: Vec<K> = keys.into_iter().collect();
        if keys == self.keys {
            return false;
        }
        vdebug!(from = self.keys.len(), to = keys.len(), "set_items: list changed");
        self.keys = keys;
        self.rebuild_table();
        self.request_render();
        true
    }

    /// Handles a scroll event. Cheap: one binary search and no table writes.
    pub fn on_scroll(&mut self, offset: i64) {
        vtrace!(offset, "on_scroll");
        self.scroll_offset = offset;
        self.update_window();
    }

    /// Handles a viewport resize. The scroll offset is kept.
    pub fn on_resize(&mut self, viewport_height: u32) {
        if self.viewport_height == viewport_height {
            return;
        }
        vtrace!(viewport_height, "on_resize");
        self.viewport_height = viewport_height;
        self.update_window();
    }

    /// Index of the first row visible at `offset` (see [`crate::locate`]).
    pub fn locate(&self, offset: i64) -> Option<usize> {
        locate(&self.table, offset)
    }

    pub fn item_top(&self, index: usize) -> Option<u64> {
        self.table.top(index)
    }

    pub fn item_height(&self, index: usize) -> Option<u32> {
        self.table.height(index)
    }

    /// Current index of `key` (linear scan).
    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll_offset(&self) -> i64 {
        let max = self
            .table
            .total_height()
            .saturating_sub(self.viewport_height as u64);
        i64::try_from(max).unwrap_or(i64::MAX)
    }

    /// Scrolls so that `index` (clamped to the last row) starts at the top of the viewport, as
    /// far as the list allows. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize) -> i64 {
        let Some(last) = self.table.len().checked_sub(1) else {
            return self.scroll_offset;
        };
        let top = self.table.top(index.min(last)).unwrap_or(0);
        let offset = i64::try_from(top)
            .unwrap_or(i64::MAX)
            .min(self.max_scroll_offset());
        self.on_scroll(offset);
        offset
    }

    /// Iterates over the rows of the current window without allocating.
    pub fn for_each_rendered_item(&self, mut f: impl FnMut(RenderedItem<K>)) {
        for index in self.window.rendered_range() {
            let (Some(entry), Some(key)) = (self.table.entry(index), self.keys.get(index)) else {
                continue;
            };
            f(RenderedItem {
                key: key.clone(),
                index,
                top: entry.top,
                height: entry.height,
            });
        }
    }

    /// Render instructions for the current window.
    pub fn render_frame(&self) -> RenderFrame<K> {
        let mut items = Vec::with_capacity(self.window.rendered_len());
        self.for_each_rendered_item(|it| items.push(it));
        RenderFrame {
            epoch: self.epoch,
            items,
            render_offset: self.window.render_offset,
            spacer_height: self.table.total_height(),
        }
    }

    /// Reports that the frame rendered at `epoch` has been painted and measures its rows.
    ///
    /// `measure(index, key)` returns the rendered height of a mounted row, or `None` when the
    /// row has no live handle. Does nothing unless a render is pending. A frame from an older
    /// epoch (the list was replaced after it was rendered) is dropped without touching the table.
    ///
    /// The pass always ends in [`Phase::Idle`]. Rows that could not be measured keep their
    /// current height and are measured again by the next pass, which runs after the window
    /// changes or [`Self::invalidate_layout`] is called. `on_change` fires only when the pass
    /// corrected the layout.
    pub fn paint_complete(
        &mut self,
        epoch: u64,
        mut measure: impl FnMut(usize, &K) -> Option<u32>,
    ) -> ReconcileReport {
        if epoch != self.epoch {
            vdebug!(epoch, current = self.epoch, "paint_complete: stale frame dropped");
            return ReconcileReport {
                dropped: true,
                ..ReconcileReport::default()
            };
        }
        if self.phase != Phase::Scrolled {
            return ReconcileReport::default();
        }

        self.phase = Phase::Measuring;
        let range = self.window.rendered_range();
        let retain = self.options.retain_measurements;
        let keys = &self.keys;
        let key_heights = &mut self.key_heights;
        let report = reconcile(&mut self.table, range, |index| {
            let key = keys.get(index)?;
            let height = measure(index, key)?;
            if retain && height > 0 {
                key_heights.insert(key.clone(), height);
            }
            Some(height)
        });

        if report.changed_layout() {
            let offset = self.render_offset_for(&self.window);
            self.window.render_offset = offset;
        }
        self.phase = Phase::Idle;
        if report.changed_layout() {
            self.notify();
        }
        report
    }

    /// Requests a new measurement pass for the current window (e.g. row content changed).
    pub fn invalidate_layout(&mut self) {
        if self.mark_dirty() {
            self.notify();
        }
    }

    /// Number of retained measurements (key → height).
    pub fn measurement_cache_len(&self) -> usize {
        self.key_heights.len()
    }

    /// Exports the retained measurements (useful for persistence).
    pub fn export_measurements(&self) -> Vec<(K, u32)> {
        self.key_heights
            .iter()
            .map(|(k, h)| (k.clone(), *h))
            .collect()
    }

    /// Replaces the retained measurements and rebuilds the table with them.
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.key_heights.clear();
        self.key_heights.extend(entries);
        vdebug!(entries = self.key_heights.len(), "import_measurements");
        self.rebuild_table();
        self.request_render();
    }

    /// Drops retained measurements whose key is no longer in the list. Returns how many were
    /// dropped.
    ///
    /// Retained measurements outlive their rows so that a row can leave the list and come back
    /// with its real height. Call this (or [`Self::reset_measurements`]) to bound the cache.
    pub fn prune_measurements(&mut self) -> usize {
        let mut kept = KeyHeightMap::<K>::new();
        for key in &self.keys {
            if let Some(height) = self.key_heights.remove(key) {
                kept.insert(key.clone(), height);
            }
        }
        let pruned = self.key_heights.len();
        self.key_heights = kept;
        if pruned > 0 {
            vdebug!(pruned, remaining = self.key_heights.len(), "prune_measurements");
        }
        pruned
    }

    /// Forgets every measurement and rebuilds the table from the estimate.
    pub fn reset_measurements(&mut self) {
        self.key_heights.clear();
        self.rebuild_table();
        self.request_render();
    }

    fn rebuild_table(&mut self) {
        let estimate = self.options.estimated_item_height;
        if self.options.retain_measurements && !self.key_heights.is_empty() {
            let key_heights = &self.key_heights;
            self.table = PositionTable::from_heights(
                self.keys
                    .iter()
                    .map(|k| key_heights.get(k).copied().unwrap_or(estimate)),
            );
        } else {
            self.table.initialize(self.keys.len(), estimate);
        }
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn mark_dirty(&mut self) -> bool {
        if self.phase == Phase::Scrolled {
            return false;
        }
        self.phase = Phase::Scrolled;
        true
    }

    fn derive_window(&mut self) -> WindowState {
        self.visible_count = visible_count(self.viewport_height, self.options.estimated_item_height);
        let start = if self.visible_count == 0 {
            0
        } else {
            locate(&self.table, self.scroll_offset).unwrap_or(0)
        };
        let mut next = select_window(
            start,
            self.table.len(),
            self.visible_count,
            self.options.buffer_scale,
        );
        next.render_offset = self.render_offset_for(&next);
        next
    }

    // Marks a render as pending and re-derives the window, notifying exactly once.
    fn request_render(&mut self) {
        let dirtied = self.mark_dirty();
        if !self.update_window() && dirtied {
            self.notify();
        }
    }

    fn update_window(&mut self) -> bool {
        let next = self.derive_window();
        if next == self.window {
            return false;
        }
        vtrace!(
            start = next.start_index,
            end = next.end_index,
            above = next.above_buffer_count,
            below = next.below_buffer_count,
            render_offset = next.render_offset,
            "window changed"
        );
        self.window = next;
        self.phase = Phase::Scrolled;
        self.notify();
        true
    }

    // Translation that puts the first rendered row (`start - above`) at its real position.
    fn render_offset_for(&self, window: &WindowState) -> u64 {
        if window.start_index < 1 {
            return 0;
        }
        let first = window.start_index - window.above_buffer_count;
        match (
            self.table.bottom(window.start_index - 1),
            self.table.top(window.start_index),
            self.table.top(first),
        ) {
            (Some(prev_bottom), Some(start_top), Some(first_top)) => {
                prev_bottom.saturating_sub(start_top.saturating_sub(first_top))
            }
            _ => 0,
        }
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(&self.window, self.phase);
        }
    }
}
