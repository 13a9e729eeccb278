use vlist::{ListKey, ListOptions, ReconcileReport, RenderFrame, ScrollController, ScrollState};

use crate::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};

/// Default delay after the last scroll event before `is_scrolling` resets.
pub const DEFAULT_SCROLL_RESET_DELAY_MS: u64 = 150;

/// A framework-neutral frame loop around [`vlist::ScrollController`].
///
/// UI event handlers only record the latest values (`on_scroll` / `on_resize`); all window work
/// happens once per animation frame:
///
/// - `begin_frame(now_ms)` applies the coalesced events and, when something changed, returns the
///   rows to mount.
/// - `end_frame(measure)` runs after paint and feeds real row heights back. When that corrects
///   the layout, the next `begin_frame` returns a frame with the corrected positions and spacer
///   height, without asking for another measurement.
///
/// The driver also debounces an `is_scrolling` flag, which hosts commonly use to defer expensive
/// row content while the user is flinging.
#[derive(Clone, Debug)]
pub struct FrameDriver<K> {
    c: ScrollController<K>,
    pending_offset: Option<i64>,
    pending_viewport: Option<u32>,
    in_flight: Option<u64>,
    relayout_pending: bool,

    is_scrolling: bool,
    last_scroll_event_ms: Option<u64>,
    scroll_reset_delay_ms: u64,
}

impl<K: ListKey> FrameDriver<K> {
    pub fn new(options: ListOptions) -> Self {
        Self::from_controller(ScrollController::new(options))
    }

    pub fn from_controller(c: ScrollController<K>) -> Self {
        Self {
            c,
            pending_offset: None,
            pending_viewport: None,
            in_flight: None,
            relayout_pending: false,
            is_scrolling: false,
            last_scroll_event_ms: None,
            scroll_reset_delay_ms: DEFAULT_SCROLL_RESET_DELAY_MS,
        }
    }

    pub fn with_scroll_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_reset_delay_ms = delay_ms;
        self
    }

    pub fn controller(&self) -> &ScrollController<K> {
        &self.c
    }

    pub fn controller_mut(&mut self) -> &mut ScrollController<K> {
        &mut self.c
    }

    pub fn into_controller(self) -> ScrollController<K> {
        self.c
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Whether measured heights changed the layout since the last frame was handed out.
    pub fn relayout_pending(&self) -> bool {
        self.relayout_pending
    }

    /// Epoch of the frame handed out by `begin_frame` and not yet ended.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Records a scroll event. Only the latest offset before the next frame is applied.
    pub fn on_scroll(&mut self, offset: i64, now_ms: u64) {
        self.pending_offset = Some(offset);
        self.last_scroll_event_ms = Some(now_ms);
        self.is_scrolling = true;
    }

    /// Records a viewport resize. Only the latest height before the next frame is applied.
    pub fn on_resize(&mut self, viewport_height: u32) {
        self.pending_viewport = Some(viewport_height);
    }

    /// Starts a frame: applies pending events, debounces `is_scrolling`, and returns the frame to
    /// render when a render or a relayout is pending.
    ///
    /// Only frames that need measuring are put in flight; a relayout-only frame is just painted.
    pub fn begin_frame(&mut self, now_ms: u64) -> Option<RenderFrame<K>> {
        self.flush_pending();
        self.update_scrolling(now_ms);

        let needs_measure = self.c.phase() == vlist::Phase::Scrolled;
        if !needs_measure && !self.relayout_pending {
            return None;
        }
        self.relayout_pending = false;
        let frame = self.c.render_frame();
        self.in_flight = needs_measure.then_some(frame.epoch);
        Some(frame)
    }

    /// Ends the frame started by `begin_frame` after it has been painted.
    ///
    /// Without a frame in flight this does nothing.
    pub fn end_frame(&mut self, measure: impl FnMut(usize, &K) -> Option<u32>) -> ReconcileReport {
        let Some(epoch) = self.in_flight.take() else {
            return ReconcileReport::default();
        };
        let report = self.c.paint_complete(epoch, measure);
        if report.dropped {
            vdebug!(epoch, "end_frame: list replaced mid-frame");
        } else if report.changed_layout() {
            vtrace!(epoch, corrected = report.corrected, "end_frame: relayout pending");
            self.relayout_pending = true;
        }
        report
    }

    /// Replaces the list, keeping the first visible row where it was on screen.
    ///
    /// Returns whether the list changed.
    pub fn replace_items(&mut self, keys: impl IntoIterator<Item = K>) -> bool {
        self.flush_pending();
        let anchor = capture_first_visible_anchor(&self.c);
        if !self.c.set_items(keys) {
            return false;
        }
        if let Some(anchor) = anchor {
            self.restore_anchor(&anchor);
        }
        true
    }

    /// Scrolls `index` to the top of the viewport immediately. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize) -> i64 {
        self.pending_offset = None;
        self.flush_pending();
        self.c.scroll_to_index(index)
    }

    pub fn capture_anchor(&self) -> Option<ScrollAnchor<K>> {
        capture_first_visible_anchor(&self.c)
    }

    /// Applies an anchor captured earlier. Returns `false` when its row is gone.
    pub fn restore_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        self.pending_offset = None;
        let index = self.c.position_of(&anchor.key);
        apply_anchor(&mut self.c, anchor, |_| index)
    }

    fn flush_pending(&mut self) {
        if self.pending_offset.is_none() && self.pending_viewport.is_none() {
            return;
        }
        let current = self.c.scroll_state();
        let next = ScrollState {
            offset: self.pending_offset.take().unwrap_or(current.offset),
            viewport_height: self
                .pending_viewport
                .take()
                .unwrap_or(current.viewport_height),
        };
        vtrace!(
            offset = next.offset,
            viewport_height = next.viewport_height,
            "flush_pending"
        );
        self.c.restore_scroll_state(next);
    }

    fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.scroll_reset_delay_ms {
            self.is_scrolling = false;
            self.last_scroll_event_ms = None;
        }
    }
}
