//! Rectangle outlines drawn into the working buffer.

use crate::bitmap::Bitmap;
use crate::image::{Pixel, PixelBuffer};
use crate::util::{StereoBmpError, StereoBmpResult};

/// Default marker colour: channel 0 saturated, the others zero.
pub const HIGHLIGHT: Pixel = [255, 0, 0];

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub top: isize,
    pub left: isize,
    pub bottom: isize,
    pub right: isize,
}

impl Region {
    /// Creates a rectangle from its inclusive corners.
    pub fn new(top: isize, left: isize, bottom: isize, right: isize) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The square of side `2 * radius + 1` centred on `(row, col)`.
    pub fn around(row: usize, col: usize, radius: usize) -> Self {
        let (row, col, radius) = (row as isize, col as isize, radius as isize);
        Self::new(row - radius, col - radius, row + radius, col + radius)
    }
}

/// Checks that `region` is well-formed and inside `buf`.
pub(crate) fn check_region(buf: &PixelBuffer, region: Region) -> StereoBmpResult<()> {
    let dims = buf.dimensions();
    let err = |row, col| StereoBmpError::out_of_bounds(row, col, dims.height, dims.width);
    if region.top > region.bottom || region.left > region.right {
        return Err(err(region.bottom, region.right));
    }
    if !dims.contains(region.top, region.left) {
        return Err(err(region.top, region.left));
    }
    if !dims.contains(region.bottom, region.right) {
        return Err(err(region.bottom, region.right));
    }
    Ok(())
}

/// Draws the outline of `region` in `color`. The interior is left as is.
pub fn mark_region(buf: &mut PixelBuffer, region: Region, color: Pixel) -> StereoBmpResult<()> {
    check_region(buf, region)?;
    outline(buf, region, color);
    Ok(())
}

/// Draws an outline already validated by [`check_region`].
pub(crate) fn outline(buf: &mut PixelBuffer, region: Region, color: Pixel) {
    let (top, left) = (region.top as usize, region.left as usize);
    let (bottom, right) = (region.bottom as usize, region.right as usize);

    for col in left..=right {
        buf.set_pixel(top, col, color);
        buf.set_pixel(bottom, col, color);
    }
    for row in top..=bottom {
        buf.set_pixel(row, left, color);
        buf.set_pixel(row, right, color);
    }
}

impl Bitmap {
    /// Outlines `region` of the working buffer in [`HIGHLIGHT`].
    pub fn mark_region(&mut self, region: Region) -> StereoBmpResult<()> {
        self.mark_region_with(region, HIGHLIGHT)
    }

    /// Outlines `region` of the working buffer in `color`.
    pub fn mark_region_with(&mut self, region: Region, color: Pixel) -> StereoBmpResult<()> {
        mark_region(self.current_mut("mark_region")?, region, color)
    }
}
