// Example: render, paint, measure, and watch the layout settle.
use vlist::{ListOptions, Phase, ScrollController};

fn main() {
    // Order history rows: most are one line, every fifth row carries an expanded detail block.
    let real_height = |key: u64| if key % 5 == 0 { 180 } else { 72 };

    let mut c = ScrollController::with_items(ListOptions::new(80), 1000..1200u64);
    c.on_resize(640);

    for offset in [0i64, 900, 4000] {
        c.on_scroll(offset);
        if c.phase() == Phase::Scrolled {
            let frame = c.render_frame();
            // ... host mounts `frame.items` and waits for paint ...
            let report = c.paint_complete(frame.epoch, |_, key| Some(real_height(*key)));
            println!(
                "offset={offset}: rendered={:?} corrected={} render_offset={} spacer={}",
                frame.indexes(),
                report.corrected,
                c.window().render_offset,
                c.total_height()
            );
        }
    }
}
