//! Horizontal-gradient edge detection on one row at a time.
//!
//! The detector compares channel 0 of each pixel with its right neighbour and
//! records the left pixel of every jump of at least `threshold`. It is a 1D
//! scan, not a 2D operator: sweeping an image means calling it per row. After
//! a hit the scan skips `skip` extra columns so one physical edge does not
//! produce a cluster of adjacent points.

use crate::bitmap::Bitmap;
use crate::draw::{check_region, outline, Region, HIGHLIGHT};
use crate::image::{Pixel, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::{StereoBmpError, StereoBmpResult};

/// Marker half-size around a detected edge (a 3x3 outline).
const MARKER_RADIUS: usize = 1;

/// A recorded edge coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgePoint {
    pub row: usize,
    pub col: usize,
}

impl EdgePoint {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Tunables for [`Bitmap::detect_row_edges`].
#[derive(Clone, Copy, Debug)]
pub struct EdgeParams {
    /// Minimum absolute intensity step between neighbours.
    pub threshold: u8,
    /// Columns excluded at both ends of the row (rows too, for sweeps).
    pub padding: usize,
    /// Extra columns skipped after each hit.
    pub skip: usize,
    /// Draw a 3x3 outline around every hit in the working buffer.
    pub mark: bool,
    /// Outline colour used when `mark` is set.
    pub marker_color: Pixel,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            threshold: 30,
            padding: 1,
            skip: 0,
            mark: false,
            marker_color: HIGHLIGHT,
        }
    }
}

/// Half-open column range scanned for `params` on a row of `width` pixels.
fn scan_columns(width: usize, padding: usize) -> std::ops::Range<usize> {
    let end = width.saturating_sub(padding).min(width.saturating_sub(1));
    padding..end
}

/// Scans `row` of channel 0 and returns the edge points in column order.
pub(crate) fn scan_row(buf: &PixelBuffer, row: usize, params: &EdgeParams) -> Vec<EdgePoint> {
    let cols = scan_columns(buf.width(), params.padding);
    let mut points = Vec::new();
    let mut col = cols.start;
    while col < cols.end {
        let here = buf.sample(0, row, col);
        let right = buf.sample(0, row, col + 1);
        if here.abs_diff(right) >= params.threshold {
            points.push(EdgePoint::new(row, col));
            col = col.saturating_add(params.skip);
        }
        col = col.saturating_add(1);
    }
    points
}

/// Checks that a marker fits around every column `row` can report.
fn check_markers(buf: &PixelBuffer, row: usize, params: &EdgeParams) -> StereoBmpResult<()> {
    let cols = scan_columns(buf.width(), params.padding);
    if cols.is_empty() {
        return Ok(());
    }
    check_region(buf, Region::around(row, cols.start, MARKER_RADIUS))?;
    check_region(buf, Region::around(row, cols.end - 1, MARKER_RADIUS))
}

fn draw_markers(buf: &mut PixelBuffer, points: &[EdgePoint], color: Pixel) {
    for point in points {
        outline(buf, Region::around(point.row, point.col, MARKER_RADIUS), color);
    }
}

impl Bitmap {
    /// Detects edges along `row` and appends them to the edge list.
    ///
    /// Requires grayscale data. The whole row is scanned before any marker is
    /// drawn, so markers never feed back into the gradient test. Returns the
    /// points found by this call.
    pub fn detect_row_edges(
        &mut self,
        row: usize,
        params: &EdgeParams,
    ) -> StereoBmpResult<Vec<EdgePoint>> {
        let _guard = trace_span!("detect_row_edges", row = row).entered();
        let grayscale = self.is_grayscale();
        let buf = self.current_mut("detect_row_edges")?;
        if !grayscale {
            return Err(StereoBmpError::InvalidState {
                reason: "edge detection requires a grayscale image",
            });
        }
        let dims = buf.dimensions();
        if row >= dims.height {
            return Err(StereoBmpError::out_of_bounds(
                row as isize,
                0,
                dims.height,
                dims.width,
            ));
        }
        if params.mark {
            check_markers(buf, row, params)?;
        }

        let points = scan_row(buf, row, params);
        if params.mark {
            draw_markers(buf, &points, params.marker_color);
        }
        self.record_edges(&points);
        trace_event!("row_edges", row = row, count = points.len());
        Ok(points)
    }

    /// Runs [`Bitmap::detect_row_edges`] over rows `padding..height - padding`.
    ///
    /// Markers are drawn only after every row has been scanned, so a marker
    /// on one row cannot create edges on the next. Returns the number of
    /// points recorded by the sweep.
    pub fn detect_edges(&mut self, params: &EdgeParams) -> StereoBmpResult<usize> {
        let height = self.loaded("detect_edges")?.height();
        if !self.is_grayscale() {
            return Err(StereoBmpError::InvalidState {
                reason: "edge detection requires a grayscale image",
            });
        }
        let rows = params.padding..height.saturating_sub(params.padding);
        if rows.is_empty() {
            return Ok(0);
        }
        if params.mark {
            let buf = self.loaded("detect_edges")?;
            check_markers(buf, rows.start, params)?;
            check_markers(buf, rows.end - 1, params)?;
        }

        let scan = EdgeParams {
            mark: false,
            ..*params
        };
        let mut found = Vec::new();
        for row in rows {
            found.extend(self.detect_row_edges(row, &scan)?);
        }
        if params.mark {
            draw_markers(self.current_mut("detect_edges")?, &found, params.marker_color);
        }
        Ok(found.len())
    }
}

#[cfg(test)]
mod tests {
    use super::scan_columns;

    #[test]
    fn scan_never_reads_past_last_column() {
        assert_eq!(scan_columns(10, 0), 0..9);
        assert_eq!(scan_columns(10, 1), 1..9);
        assert_eq!(scan_columns(10, 3), 3..7);
        assert!(scan_columns(4, 3).is_empty());
        assert!(scan_columns(0, 0).is_empty());
    }
}
