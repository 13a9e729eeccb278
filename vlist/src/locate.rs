use crate::PositionTable;

/// Returns the index of the first item that is at least partially visible at `target`.
///
/// That is the smallest index whose `bottom` lies beyond `target`. When an item ends exactly at
/// `target`, the next item starts there and is returned.
///
/// - `None` for an empty table, or when `target` is at or past the total height.
/// - `Some(0)` for negative targets (overscroll above the list).
///
/// Runs in `O(log n)` over the whole table.
pub fn locate(table: &PositionTable, target: i64) -> Option<usize> {
    let entries = table.entries();
    if entries.is_empty() {
        return None;
    }
    let Ok(target) = u64::try_from(target) else {
        return Some(0);
    };

    let mut low = 0usize;
    let mut high = entries.len(); // exclusive
    let mut candidate = None;
    while low < high {
        let mid = low + (high - low) / 2;
        let bottom = entries[mid].bottom;
        if bottom == target {
            let next = mid + 1;
            return (next < entries.len()).then_some(next);
        }
        if bottom < target {
            low = mid + 1;
        } else {
            candidate = Some(mid);
            high = mid;
        }
    }
    candidate
}
