// Example: uniform estimate, scroll, and the rendered window.
use vlist::{ListOptions, ScrollController};

fn main() {
    let mut c = ScrollController::with_items(ListOptions::new(240), 0..1000u64);
    c.on_resize(800);

    let w = c.window();
    println!(
        "initial: visible_count={} window={:?} rendered={:?}",
        c.visible_count(),
        w,
        w.rendered_range()
    );

    c.on_scroll(2400);
    let frame = c.render_frame();
    println!(
        "scrolled: rendered={:?} render_offset={} spacer={}",
        frame.indexes(),
        frame.render_offset,
        frame.spacer_height
    );
}
