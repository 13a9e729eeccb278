use alloc::vec::Vec;
use core::ops::Range;

/// Default item key: the item's own integer identifier.
pub type ItemKey = u64;

/// Layout record for one item of the full list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionEntry {
    pub index: usize,
    /// Best-known height: the estimate until the row has been measured.
    pub height: u32,
    /// Offset from the start of the list (`bottom` of the previous entry).
    pub top: u64,
    /// `top + height`.
    pub bottom: u64,
}

/// Which rows are mounted and where the mounted group sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub start_index: usize,
    pub end_index: usize, // exclusive, visible range (no buffer)
    pub above_buffer_count: usize,
    pub below_buffer_count: usize,
    /// Pixel translation applied to the rendered group.
    pub render_offset: u64,
}

impl WindowState {
    /// The buffered range of indexes to mount.
    pub fn rendered_range(&self) -> Range<usize> {
        let start = self.start_index.saturating_sub(self.above_buffer_count);
        let end = self.end_index.saturating_add(self.below_buffer_count);
        start..end.max(start)
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered_range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered_range().is_empty()
    }
}

/// Where the controller is in the render/measure cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Nothing pending.
    #[default]
    Idle,
    /// The window changed; a render is pending and its paint has not been reported yet.
    Scrolled,
    /// A paint was reported and measurements are being applied.
    Measuring,
}

/// One row the host should mount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedItem<K> {
    pub key: K,
    pub index: usize,
    /// Absolute offset of the row in the list.
    pub top: u64,
    pub height: u32,
}

impl<K> RenderedItem<K> {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// Render instructions for one frame.
///
/// The host mounts `items` in order inside a group translated by `render_offset`, sizes the
/// scroll spacer to `spacer_height`, and reports the paint back with
/// [`crate::ScrollController::paint_complete`] passing `epoch`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderFrame<K> {
    pub epoch: u64,
    pub items: Vec<RenderedItem<K>>,
    pub render_offset: u64,
    pub spacer_height: u64,
}

impl<K> RenderFrame<K> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn indexes(&self) -> Range<usize> {
        match (self.items.first(), self.items.last()) {
            (Some(first), Some(last)) => first.index..last.index + 1,
            _ => 0..0,
        }
    }
}

/// Outcome of one measurement pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileReport {
    /// Rows that returned a usable height.
    pub measured: usize,
    /// Rows whose height differed from the table and was rewritten.
    pub corrected: usize,
    /// Rows without a live handle (or without a layout box) in this pass.
    pub skipped: usize,
    /// The pass belonged to an older list and was discarded.
    pub dropped: bool,
}

impl ReconcileReport {
    /// Whether the layout moved and the host should re-render.
    pub fn changed_layout(&self) -> bool {
        self.corrected > 0
    }
}

/// A lightweight snapshot of scroll position and viewport geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: i64,
    pub viewport_height: u32,
}
