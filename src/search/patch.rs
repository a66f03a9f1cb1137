//! Square patch windows and their SSD.

use crate::edge::EdgePoint;
use crate::image::{PixelBuffer, CHANNELS};
use crate::util::{StereoBmpError, StereoBmpResult};

/// Checks that the `(2 * radius + 1)`-square window centred on `(row, col)`
/// lies inside `buf`.
pub(crate) fn check_window(
    buf: &PixelBuffer,
    row: isize,
    col: isize,
    radius: usize,
) -> StereoBmpResult<()> {
    let dims = buf.dimensions();
    let r = radius as isize;
    let corners = [
        (row.saturating_sub(r), col.saturating_sub(r)),
        (row.saturating_add(r), col.saturating_add(r)),
    ];
    for (y, x) in corners {
        if !dims.contains(y, x) {
            return Err(StereoBmpError::out_of_bounds(y, x, dims.height, dims.width));
        }
    }
    Ok(())
}

/// SSD between two windows over all channels. Both windows must be in bounds.
pub(crate) fn ssd_unchecked(
    a: &PixelBuffer,
    a_center: EdgePoint,
    b: &PixelBuffer,
    b_center: EdgePoint,
    radius: usize,
) -> u64 {
    let side = 2 * radius + 1;
    let (a_row, a_col) = (a_center.row - radius, a_center.col - radius);
    let (b_row, b_col) = (b_center.row - radius, b_center.col - radius);

    let mut sum = 0u64;
    for channel in 0..CHANNELS {
        for dy in 0..side {
            let ra = a.row(channel, a_row + dy).expect("window row within bounds");
            let rb = b.row(channel, b_row + dy).expect("window row within bounds");
            for (&va, &vb) in ra[a_col..a_col + side].iter().zip(&rb[b_col..b_col + side]) {
                let d = va.abs_diff(vb) as u64;
                sum += d * d;
            }
        }
    }
    sum
}

/// Sum of squared differences between the windows centred on `a_center` in
/// `a` and `b_center` in `b`, over all three channels.
pub fn ssd_at(
    a: &PixelBuffer,
    a_center: EdgePoint,
    b: &PixelBuffer,
    b_center: EdgePoint,
    radius: usize,
) -> StereoBmpResult<u64> {
    check_window(a, a_center.row as isize, a_center.col as isize, radius)?;
    check_window(b, b_center.row as isize, b_center.col as isize, radius)?;
    Ok(ssd_unchecked(a, a_center, b, b_center, radius))
}
