//! Single-row block matching between two bitmaps.
//!
//! For each edge point of the source image the matcher slides a square patch
//! along one row of the target image and keeps the column with the smallest
//! sum of squared differences. The vertical displacement between the two
//! images is a known constant (`row_offset`); only horizontal disparity is
//! searched. Both sides are sampled from their `original` buffers so earlier
//! tone transforms and marks do not bias the comparison.

mod patch;
pub(crate) mod scan;

pub use patch::ssd_at;

use crate::bitmap::Bitmap;
use crate::draw::{outline, Region, HIGHLIGHT};
use crate::edge::EdgePoint;
use crate::image::{Pixel, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::{StereoBmpError, StereoBmpResult};

/// Configuration for block matching.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Patch half-size; `1` compares 3x3 neighbourhoods.
    pub patch_radius: usize,
    /// Outline colour drawn around each match in the target.
    pub marker_color: Pixel,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            patch_radius: 1,
            marker_color: HIGHLIGHT,
        }
    }
}

/// One source edge point and its best correspondence in the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowMatch {
    /// Edge point in the source image.
    pub source: EdgePoint,
    /// Best-matching patch centre in the target image.
    pub target: EdgePoint,
    /// Sum of squared differences at the best match.
    pub ssd: u64,
}

impl RowMatch {
    /// Horizontal displacement `target.col - source.col`.
    pub fn disparity(&self) -> isize {
        self.target.col as isize - self.source.col as isize
    }
}

/// Borrowed view of a target image for one matching call.
///
/// Matching reads the target's original buffer and writes marks into its
/// working buffer; this type carries exactly those two permissions.
pub struct MatchTarget<'a> {
    original: &'a PixelBuffer,
    current: &'a mut PixelBuffer,
}

impl<'a> MatchTarget<'a> {
    /// Pairs a read-only reference buffer with a writable mark buffer.
    ///
    /// Returns `None` when the two buffers differ in extents.
    pub fn from_buffers(
        original: &'a PixelBuffer,
        current: &'a mut PixelBuffer,
    ) -> Option<Self> {
        (original.dimensions() == current.dimensions()).then(|| Self::new(original, current))
    }

    pub(crate) fn new(original: &'a PixelBuffer, current: &'a mut PixelBuffer) -> Self {
        Self { original, current }
    }
}

/// Block matcher with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with the default 3x3 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Matches every edge point of `source` against `target`.
    pub fn match_row(
        &self,
        source: &Bitmap,
        target: &mut Bitmap,
        row_offset: isize,
    ) -> StereoBmpResult<Vec<RowMatch>> {
        self.match_row_into(source, target.match_target()?, row_offset)
    }

    /// Matches every edge point of `source` against an explicit target borrow.
    ///
    /// All correspondences are found before the first mark is drawn, so an
    /// out-of-range edge point leaves the target untouched.
    pub fn match_row_into(
        &self,
        source: &Bitmap,
        target: MatchTarget<'_>,
        row_offset: isize,
    ) -> StereoBmpResult<Vec<RowMatch>> {
        let _guard = trace_span!("match_row", row_offset = row_offset).entered();
        let edges = source.edge_points();
        if edges.is_empty() {
            return Err(StereoBmpError::InvalidState {
                reason: "no edge points recorded",
            });
        }
        let src = source.original()?;
        let radius = self.cfg.patch_radius;

        let mut matches = Vec::with_capacity(edges.len());
        for &point in edges {
            let found = scan::best_in_row(src, target.original, point, row_offset, radius)?;
            trace_event!(
                "row_match",
                src_row = found.source.row,
                src_col = found.source.col,
                dst_row = found.target.row,
                dst_col = found.target.col,
                ssd = found.ssd
            );
            matches.push(found);
        }

        for found in &matches {
            let region = Region::around(found.target.row, found.target.col, radius);
            // The scan already proved this window fits the target.
            outline(target.current, region, self.cfg.marker_color);
        }
        Ok(matches)
    }
}

impl Bitmap {
    /// Matches this image's edge points against `other` with a 3x3 patch.
    ///
    /// See [`Matcher::match_row`].
    pub fn match_row(
        &self,
        other: &mut Bitmap,
        row_offset: isize,
    ) -> StereoBmpResult<Vec<RowMatch>> {
        Matcher::new().match_row(self, other, row_offset)
    }
}
