use crate::*;

use std::cell::Cell;
use std::collections::HashMap;
use std::vec::Vec;

use vlist::{ListOptions, Phase, ScrollController};

#[test]
fn ttl_cache_serves_fresh_values_and_expires() {
    let mut cache = TtlCache::<u64, &str>::new(1000);
    assert_eq!(cache.get(&1, 0), None);

    cache.insert(1, "machine-1", 100);
    assert_eq!(cache.get(&1, 100), Some(&"machine-1"));
    assert_eq!(cache.get(&1, 1099), Some(&"machine-1"));
    assert_eq!(cache.get(&1, 1100), None);
    assert!(!cache.is_fresh(&1, 5000));
    assert_eq!(cache.len(), 1); // expired entries stay until purged
}

#[test]
fn ttl_cache_get_or_fetch_fetches_once_per_ttl() {
    let mut cache = TtlCache::<u64, u32>::new(500);
    let fetches = Cell::new(0u32);
    let fetch = |key: &u64| -> Result<u32, ()> {
        fetches.set(fetches.get() + 1);
        Ok(*key as u32 * 10 + fetches.get())
    };

    assert_eq!(cache.get_or_fetch(7, 0, fetch), Ok(&71));
    assert_eq!(cache.get_or_fetch(7, 499, fetch), Ok(&71));
    assert_eq!(fetches.get(), 1);

    assert_eq!(cache.get_or_fetch(7, 500, fetch), Ok(&72));
    assert_eq!(fetches.get(), 2);
    assert_eq!(cache.get(&7, 600), Some(&72));
}

#[test]
fn ttl_cache_does_not_store_failed_fetches() {
    let mut cache = TtlCache::<u64, u32>::new(100);
    assert_eq!(
        cache.get_or_fetch(1, 0, |_| Err::<u32, &str>("rpc unavailable")),
        Err("rpc unavailable")
    );
    assert!(cache.is_empty());

    cache.insert(2, 20, 0);
    assert_eq!(
        cache.get_or_fetch(2, 200, |_| Err::<u32, &str>("timeout")),
        Err("timeout")
    );
    // The expired value is still stored, just not served.
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&2, 200), None);
    assert_eq!(cache.invalidate(&2), Some(20));
}

#[test]
fn ttl_cache_purges_only_expired_entries() {
    let mut cache = TtlCache::<u64, u32>::new(100);
    cache.insert(1, 1, 0);
    cache.insert(2, 2, 50);
    cache.insert(3, 3, 120);
    assert_eq!(cache.purge_expired(130), 1);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&2, 130), Some(&2));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn ttl_cache_with_zero_ttl_never_serves() {
    let mut cache = TtlCache::<u64, u32>::new(0);
    cache.insert(1, 1, 10);
    assert_eq!(cache.get(&1, 10), None);

    cache.set_ttl_ms(5);
    assert_eq!(cache.ttl_ms(), 5);
    assert_eq!(cache.get(&1, 14), Some(&1));
}

#[test]
fn anchor_can_preserve_scroll_across_prepend() {
    let mut c = ScrollController::with_items(ListOptions::new(50), 100..200u64);
    c.on_resize(200);
    c.on_scroll(1010);

    let anchor = capture_first_visible_anchor(&c).unwrap();
    assert_eq!(anchor.key, 120);
    assert_eq!(anchor.offset_in_item, 10);

    // Prepend 10 older rows: old rows shift by +10 indexes.
    c.set_items((0..10u64).chain(100..200));

    let map: HashMap<u64, usize> = c.keys().iter().enumerate().map(|(i, k)| (*k, i)).collect();
    assert!(apply_anchor(&mut c, &anchor, |k| map.get(k).copied()));
    assert_eq!(c.scroll_offset(), 1510);
    assert_eq!(c.window().start_index, 30);
}

#[test]
fn anchor_for_removed_row_is_not_applied() {
    let mut c = ScrollController::with_items(ListOptions::new(50), 0..10u64);
    c.on_resize(100);
    c.on_scroll(120);
    let anchor = capture_first_visible_anchor(&c).unwrap();
    assert_eq!(anchor.key, 2);

    c.set_items(5..10u64);
    assert!(!apply_anchor(&mut c, &anchor, |k| c_index(&[5, 6, 7, 8, 9], k)));
    assert_eq!(c.scroll_offset(), 120);
}

fn c_index(keys: &[u64], key: &u64) -> Option<usize> {
    keys.iter().position(|k| k == key)
}

#[test]
fn no_anchor_for_empty_list() {
    let c = ScrollController::<u64>::new(ListOptions::new(50));
    assert_eq!(capture_first_visible_anchor(&c), None);
}

#[test]
fn driver_coalesces_scroll_events_per_frame() {
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(100),
        0..100u64,
    ));
    d.on_resize(300);
    d.on_scroll(200, 0);
    d.on_scroll(900, 4);
    d.on_scroll(1000, 8);
    // Nothing is applied until the frame starts.
    assert_eq!(d.controller().scroll_offset(), 0);

    let frame = d.begin_frame(16).unwrap();
    assert_eq!(d.controller().scroll_offset(), 1000);
    assert_eq!(d.controller().window().start_index, 10);
    assert_eq!(frame.indexes(), 7..16);
    assert_eq!(d.in_flight(), Some(frame.epoch));

    let report = d.end_frame(|_, _| Some(100));
    assert_eq!(report.measured, 9);
    assert_eq!(d.in_flight(), None);
    assert_eq!(d.controller().phase(), Phase::Idle);

    // No new events: nothing to render.
    assert!(d.begin_frame(32).is_none());
}

#[test]
fn driver_end_frame_without_begin_is_noop() {
    let mut d = FrameDriver::<u64>::new(ListOptions::new(100));
    let measured = Cell::new(0);
    let report = d.end_frame(|_, _| {
        measured.set(measured.get() + 1);
        Some(1)
    });
    assert_eq!(report, vlist::ReconcileReport::default());
    assert_eq!(measured.get(), 0);
}

#[test]
fn driver_debounces_is_scrolling() {
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(100),
        0..100u64,
    ))
    .with_scroll_reset_delay_ms(100);
    d.on_resize(300);
    assert!(!d.is_scrolling());

    d.on_scroll(50, 0);
    assert!(d.is_scrolling());
    d.begin_frame(16);
    assert!(d.is_scrolling());
    d.begin_frame(99);
    assert!(d.is_scrolling());
    d.begin_frame(100);
    assert!(!d.is_scrolling());
}

#[test]
fn driver_does_not_rerender_for_rows_that_never_measure() {
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(100),
        0..20u64,
    ));
    d.on_resize(200);
    let frame = d.begin_frame(0).unwrap();
    assert_eq!(frame.indexes(), 0..4);

    // Row 3 collapsed to 0px: it can't be measured on this pass or any later one.
    let collapsed = |i: usize, _: &u64| Some(if i == 3 { 0 } else { 100 });
    let report = d.end_frame(collapsed);
    assert_eq!(report.skipped, 1);
    assert_eq!(d.controller().phase(), Phase::Idle);

    let rendered = (1..=100u64).filter(|t| d.begin_frame(t * 16).is_some()).count();
    assert_eq!(rendered, 0);

    // The host asks for a new pass once the row has content again.
    d.controller_mut().invalidate_layout();
    let frame = d.begin_frame(2000).unwrap();
    assert!(frame.items.iter().any(|it| it.index == 3));
    let report = d.end_frame(|_, _| Some(120));
    assert_eq!(report.skipped, 0);
    assert_eq!(d.controller().item_height(3), Some(120));
}

#[test]
fn driver_hands_out_corrected_layout_after_measuring() {
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(100),
        0..100u64,
    ));
    d.on_resize(300);
    d.on_scroll(1000, 0);
    let frame = d.begin_frame(16).unwrap();
    assert_eq!(frame.spacer_height, 10_000);

    let report = d.end_frame(|_, _| Some(150));
    assert_eq!(report.corrected, 9);
    assert!(d.relayout_pending());

    let relayout = d.begin_frame(32).unwrap();
    assert_eq!(relayout.epoch, frame.epoch);
    assert_eq!(relayout.spacer_height, 10_450);
    assert_eq!(relayout.render_offset, d.controller().window().render_offset);
    assert_eq!(relayout.items[1].top, relayout.items[0].top + 150);
    // Nothing left to measure.
    assert_eq!(d.in_flight(), None);
    assert!(!d.relayout_pending());
    assert_eq!(d.end_frame(|_, _| Some(999)), vlist::ReconcileReport::default());

    assert!(d.begin_frame(48).is_none());
}

#[test]
fn driver_drops_measurements_for_replaced_list() {
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(100),
        0..10u64,
    ));
    d.on_resize(300);
    let frame = d.begin_frame(0).unwrap();

    assert!(d.replace_items(50..60u64));
    let report = d.end_frame(|_, _| Some(999));
    assert!(report.dropped);
    assert_eq!(d.controller().item_height(0), Some(100));

    let next = d.begin_frame(16).unwrap();
    assert_ne!(next.epoch, frame.epoch);
    assert_eq!(next.items[0].key, 50);
}

#[test]
fn driver_replace_items_keeps_first_visible_row_in_place() {
    let opts = ListOptions::new(100).with_retain_measurements(true);
    let mut d = FrameDriver::from_controller(ScrollController::with_items(opts, 100..150u64));
    d.on_resize(300);
    d.on_scroll(1050, 0);
    d.begin_frame(16).unwrap();
    d.end_frame(|_, key| Some(if *key % 2 == 0 { 80 } else { 120 }));

    let anchor = d.capture_anchor().unwrap();
    let before = d.controller().scroll_offset()
        - d.controller()
            .item_top(d.controller().position_of(&anchor.key).unwrap())
            .unwrap() as i64;

    // Load five older rows above.
    assert!(d.replace_items((95..100u64).chain(100..150)));
    let index = d.controller().position_of(&anchor.key).unwrap();
    let after = d.controller().scroll_offset() - d.controller().item_top(index).unwrap() as i64;
    assert_eq!(before, after);
    assert_eq!(d.controller().window().start_index, index);

    assert!(!d.replace_items((95..100u64).chain(100..150)));
}

#[test]
fn driver_scroll_to_index_discards_pending_scroll() {
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(100),
        0..100u64,
    ));
    d.on_resize(300);
    d.on_scroll(4000, 0);
    assert_eq!(d.scroll_to_index(20), 2000);
    d.begin_frame(16);
    assert_eq!(d.controller().scroll_offset(), 2000);

    let mut seen = Vec::new();
    d.controller().for_each_rendered_item(|it| seen.push(it.index));
    assert_eq!(seen.first(), Some(&17));
}
