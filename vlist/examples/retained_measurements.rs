// Example: keep measured heights when older rows are prepended.
use vlist::{ListOptions, ScrollController};

fn main() {
    let opts = ListOptions::new(100).with_retain_measurements(true);
    let mut c = ScrollController::with_items(opts, 50..60u64);
    c.on_resize(400);
    c.paint_complete(c.epoch(), |_, key| Some(100 + (*key as u32 % 3) * 20));
    println!("before: cached={} total={}", c.measurement_cache_len(), c.total_height());

    // Load older rows above the current ones.
    c.set_items(40..60u64);
    println!(
        "after prepend: len={} height(key 50)={:?} total={}",
        c.len(),
        c.position_of(&50).and_then(|i| c.item_height(i)),
        c.total_height()
    );
}
