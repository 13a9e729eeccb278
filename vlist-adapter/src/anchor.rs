use vlist::{ListKey, ScrollController};

/// A scroll anchor that preserves visual position across list replacement.
///
/// Typical use: loading older orders above the current ones without the visible rows jumping.
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Distance from the anchor row's top to the scroll offset (negative while overscrolled).
    pub offset_in_item: i64,
}

/// Captures an anchor for the first visible row (by key).
///
/// Returns `None` when the list is empty or the scroll offset lies past the end of the list.
pub fn capture_first_visible_anchor<K: ListKey>(
    c: &ScrollController<K>,
) -> Option<ScrollAnchor<K>> {
    let index = c.locate(c.scroll_offset())?;
    let top = i64::try_from(c.item_top(index)?).ok()?;
    let key = c.keys().get(index)?.clone();
    Some(ScrollAnchor {
        key,
        offset_in_item: c.scroll_offset().saturating_sub(top),
    })
}

/// Applies a previously captured anchor by scrolling the controller.
///
/// `key_to_index` maps keys of the *current* list to indexes; pass
/// `|k| c.position_of(k)`-style lookups or a prebuilt map.
///
/// Returns `true` when the anchor row still exists and the scroll offset was updated.
pub fn apply_anchor<K: ListKey>(
    c: &mut ScrollController<K>,
    anchor: &ScrollAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    let Some(top) = c.item_top(index).and_then(|t| i64::try_from(t).ok()) else {
        return false;
    };
    vtrace!(index, top, offset_in_item = anchor.offset_in_item, "apply_anchor");
    c.on_scroll(top.saturating_add(anchor.offset_in_item));
    true
}
