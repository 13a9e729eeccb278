use alloc::sync::Arc;

use crate::{Phase, WindowState};

/// A callback fired when the window state changes.
///
/// The host typically schedules a render from here.
pub type OnWindowChange = Arc<dyn Fn(&WindowState, Phase) + Send + Sync>;

/// Default row height estimate, in pixels.
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: u32 = 240;

/// Configuration for [`crate::ScrollController`].
///
/// Cheap to clone: the callback lives in an `Arc`.
#[derive(Clone)]
pub struct ListOptions {
    /// Height every row is seeded with until it is measured. Should be a realistic average so the
    /// first measurement pass moves little.
    pub estimated_item_height: u32,

    /// Screens of rows kept mounted above and below the visible range.
    pub buffer_scale: usize,

    /// Viewport height known before the first layout pass, if any.
    pub initial_viewport_height: Option<u32>,

    /// Scroll offset applied when the controller is created.
    pub initial_offset: i64,

    /// Remember measured heights per item key and re-apply them when the table is rebuilt.
    ///
    /// Off by default: a rebuilt table starts from the estimate for every row. Entries for removed
    /// keys are kept until `prune_measurements` or `reset_measurements` is called.
    pub retain_measurements: bool,

    pub on_change: Option<OnWindowChange>,
}

impl ListOptions {
    pub fn new(estimated_item_height: u32) -> Self {
        Self {
            estimated_item_height: estimated_item_height.max(1),
            buffer_scale: 1,
            initial_viewport_height: None,
            initial_offset: 0,
            retain_measurements: false,
            on_change: None,
        }
    }

    pub fn with_buffer_scale(mut self, buffer_scale: usize) -> Self {
        self.buffer_scale = buffer_scale;
        self
    }

    pub fn with_initial_viewport_height(mut self, viewport_height: Option<u32>) -> Self {
        self.initial_viewport_height = viewport_height;
        self
    }

    pub fn with_initial_offset(mut self, offset: i64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_retain_measurements(mut self, retain: bool) -> Self {
        self.retain_measurements = retain;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&WindowState, Phase) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ESTIMATED_ITEM_HEIGHT)
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("estimated_item_height", &self.estimated_item_height)
            .field("buffer_scale", &self.buffer_scale)
            .field("initial_viewport_height", &self.initial_viewport_height)
            .field("initial_offset", &self.initial_offset)
            .field("retain_measurements", &self.retain_measurements)
            .finish_non_exhaustive()
    }
}
