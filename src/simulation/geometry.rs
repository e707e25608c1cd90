//! Rectangle overlap test

use super::types::Body;

/// Do two bodies overlap?
///
/// Bodies are separated only when one's near edge lies strictly beyond the
/// other's far edge on some axis, so touching edges still count.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let (ahw, ahh) = a.half_extents();
    let (bhw, bhh) = b.half_extents();

    if a.position.x + ahw < b.position.x - bhw {
        return false;
    }
    if a.position.x - ahw > b.position.x + bhw {
        return false;
    }
    if a.position.y + ahh < b.position.y - bhh {
        return false;
    }
    if a.position.y - ahh > b.position.y + bhh {
        return false;
    }
    true
}
