use core::ops::Range;

use crate::{PositionTable, ReconcileReport};

/// Applies post-paint measurements for the rendered `range` to the table.
///
/// `measure(index)` returns the rendered height of a mounted row, or `None` when the row has no
/// live handle. `None` and `Some(0)` are skipped for this pass and retried on the next one.
/// Rows outside `range` are not touched and keep whatever height they were last measured at.
pub fn reconcile(
    table: &mut PositionTable,
    range: Range<usize>,
    mut measure: impl FnMut(usize) -> Option<u32>,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let end = range.end.min(table.len());

    for index in range.start..end {
        match measure(index) {
            Some(height) if height > 0 => {
                report.measured += 1;
                if table.record_measured_height(index, height) != 0 {
                    report.corrected += 1;
                }
            }
            _ => report.skipped += 1,
        }
    }

    vtrace!(
        measured = report.measured,
        corrected = report.corrected,
        skipped = report.skipped,
        "reconcile"
    );
    report
}
