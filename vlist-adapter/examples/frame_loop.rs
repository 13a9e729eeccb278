// Example: a simulated host loop driving the list once per animation frame.
use vlist::{ListOptions, ScrollController};
use vlist_adapter::{FrameDriver, TtlCache};

#[derive(Clone, Debug)]
struct Order {
    id: u64,
    lines: u32,
}

fn fetch_order(id: &u64) -> Result<Order, String> {
    // Stand-in for a slow read (RPC, REST...).
    Ok(Order {
        id: *id,
        lines: 1 + (*id % 4) as u32,
    })
}

fn main() {
    let ids: Vec<u64> = (5000..5400).collect();
    let mut orders = TtlCache::<u64, Order>::new(30_000);
    let mut d = FrameDriver::from_controller(ScrollController::with_items(
        ListOptions::new(64),
        ids.iter().copied(),
    ));
    d.on_resize(720);

    let mut now_ms = 0u64;
    for offset in [0i64, 300, 800, 2200, 2210, 2220] {
        // Several scroll events land between frames; only the latest one counts.
        d.on_scroll(offset, now_ms);
        now_ms += 16;

        let Some(frame) = d.begin_frame(now_ms) else {
            println!("t={now_ms}: nothing to render");
            continue;
        };
        for item in &frame.items {
            if let Err(err) = orders.get_or_fetch(item.key, now_ms, fetch_order) {
                eprintln!("order {} unavailable: {err}", item.key);
            }
        }

        // "Paint": each order line is 24px plus 16px of padding.
        let report = d.end_frame(|_, key| orders.get(key, now_ms).map(|o| 16 + 24 * o.lines));
        println!(
            "t={now_ms}: rendered={:?} corrected={} offset={} spacer={} scrolling={}",
            frame.indexes(),
            report.corrected,
            d.controller().window().render_offset,
            d.controller().total_height(),
            d.is_scrolling()
        );
    }

    if let Some(order) = orders.get(&5000, now_ms) {
        println!("cached order {} with {} lines", order.id, order.lines);
    }
}
