//! Dense scan of one target row.

use crate::edge::EdgePoint;
use crate::image::PixelBuffer;
use crate::search::patch::{check_window, ssd_unchecked};
use crate::search::RowMatch;
use crate::util::{StereoBmpError, StereoBmpResult};

/// Finds the column of `dst` row `point.row + row_offset` whose window best
/// matches the window around `point` in `src`.
///
/// Candidates are every column whose window fits, scanned left to right;
/// ties keep the leftmost column.
pub(crate) fn best_in_row(
    src: &PixelBuffer,
    dst: &PixelBuffer,
    point: EdgePoint,
    row_offset: isize,
    radius: usize,
) -> StereoBmpResult<RowMatch> {
    check_window(src, point.row as isize, point.col as isize, radius)?;
    let target_row = (point.row as isize).checked_add(row_offset).ok_or_else(|| {
        StereoBmpError::out_of_bounds(
            row_offset.saturating_add(point.row as isize),
            0,
            dst.height(),
            dst.width(),
        )
    })?;
    // The leftmost candidate fits only if the row and the width both do.
    check_window(dst, target_row, radius as isize, radius)?;
    let target_row = target_row as usize;

    let mut best = RowMatch {
        source: point,
        target: EdgePoint::new(target_row, radius),
        ssd: u64::MAX,
    };
    for col in radius..dst.width() - radius {
        let candidate = EdgePoint::new(target_row, col);
        let ssd = ssd_unchecked(src, point, dst, candidate, radius);
        if ssd < best.ssd {
            best.ssd = ssd;
            best.target = candidate;
        }
    }
    Ok(best)
}
