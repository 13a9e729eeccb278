use crate::WindowState;

/// Approximate number of rows that fit in the viewport, based on the estimate.
///
/// Real heights vary, so this can be off by a few rows; the buffer absorbs the difference.
pub fn visible_count(viewport_height: u32, estimated_item_height: u32) -> usize {
    if viewport_height == 0 {
        return 0;
    }
    viewport_height.div_ceil(estimated_item_height.max(1)) as usize
}

/// Derives the visible and buffered range for a located start index.
///
/// `end_index` is exclusive and never exceeds `item_count`. Each buffer holds up to
/// `buffer_scale * visible_count` rows and is clamped at the list edges. The returned
/// `render_offset` is 0; the scroll controller fills it in from the position table.
pub fn select_window(
    start_index: usize,
    item_count: usize,
    visible_count: usize,
    buffer_scale: usize,
) -> WindowState {
    let start_index = start_index.min(item_count);
    let end_index = start_index.saturating_add(visible_count).min(item_count);
    let buffer = buffer_scale.saturating_mul(visible_count);

    WindowState {
        start_index,
        end_index,
        above_buffer_count: start_index.min(buffer),
        below_buffer_count: (item_count - end_index).min(buffer),
        render_offset: 0,
    }
}
