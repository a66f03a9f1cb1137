//! The pixel store: one loaded bitmap and everything derived from it.
//!
//! A `Bitmap` owns two buffers of identical extents. `current` is the working
//! copy every transform rewrites; `original` is the snapshot taken at ingest
//! and is only ever read afterwards (block matching compares original colour).
//! The store also owns the contrast extremes gathered during ingest, the edge
//! points recorded by detection and the grayscale flag.

mod io;

pub use io::{input_path, output_path, BufferKind};

use crate::edge::EdgePoint;
use crate::image::header::read_up_to;
use crate::image::{BmpHeader, ContrastRange, Dimensions, PixelBuffer, CHANNELS};
use crate::search::MatchTarget;
use crate::util::{StereoBmpError, StereoBmpResult};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Planes {
    current: PixelBuffer,
    original: PixelBuffer,
}

/// A loaded bitmap with working and original pixel buffers.
#[derive(Debug, Default)]
pub struct Bitmap {
    path: Option<PathBuf>,
    header: Option<BmpHeader>,
    planes: Option<Planes>,
    contrast: ContrastRange,
    edges: Vec<EdgePoint>,
    grayscale: bool,
}

impl Bitmap {
    /// Creates an empty store with no path and no pixel data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store bound to a base path (without extension).
    pub fn with_path<P: AsRef<Path>>(base: P) -> Self {
        Self {
            path: Some(base.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Reads a preamble and pixel body from `reader`.
    pub fn from_reader<R: Read>(reader: &mut R) -> StereoBmpResult<Self> {
        let mut bmp = Self::new();
        bmp.read_body(reader)?;
        Ok(bmp)
    }

    /// Parses a complete in-memory bitmap file.
    pub fn from_bytes(bytes: &[u8]) -> StereoBmpResult<Self> {
        Self::from_reader(&mut &bytes[..])
    }

    /// Binds the base path used by `load_path` and `write_output`.
    pub fn set_path<P: AsRef<Path>>(&mut self, base: P) -> StereoBmpResult<()> {
        let base = base.as_ref();
        if base.as_os_str().is_empty() {
            return Err(StereoBmpError::InvalidState {
                reason: "empty base path",
            });
        }
        self.path = Some(base.to_path_buf());
        Ok(())
    }

    /// Returns the bound base path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reserves zero-filled `current` and `original` buffers.
    ///
    /// Any previous pixel data, contrast extremes, edge points and grayscale
    /// state are discarded. A stored header that disagrees with `dims` is
    /// dropped; output then uses a canonical header.
    pub fn allocate(&mut self, dims: Dimensions) {
        if self
            .header
            .as_ref()
            .is_some_and(|header| header.dimensions() != dims)
        {
            self.header = None;
        }
        self.planes = Some(Planes {
            current: PixelBuffer::zeroed(dims),
            original: PixelBuffer::zeroed(dims),
        });
        self.contrast.reset();
        self.edges.clear();
        self.grayscale = false;
    }

    /// Reads `height * width` row-major triplets into both buffers.
    ///
    /// Each triplet is folded into the contrast range. Bytes beyond the
    /// expected body are left unread.
    pub fn ingest<R: Read>(&mut self, reader: &mut R) -> StereoBmpResult<()> {
        let planes = self.planes.as_mut().ok_or(StereoBmpError::MissingBuffer {
            operation: "ingest",
        })?;
        let dims = planes.current.dimensions();
        let expected = dims.pixel_count() * CHANNELS;
        let body = read_up_to(reader, expected)?;
        if body.len() < expected {
            return Err(StereoBmpError::TruncatedInput {
                expected,
                got: body.len(),
            });
        }

        self.contrast.reset();
        for (idx, triplet) in body.chunks_exact(CHANNELS).enumerate() {
            let (row, col) = (idx / dims.width, idx % dims.width);
            let px = [triplet[0], triplet[1], triplet[2]];
            planes.current.set_pixel(row, col, px);
            planes.original.set_pixel(row, col, px);
            self.contrast.observe(px);
        }
        self.grayscale = false;
        Ok(())
    }

    /// Frees both pixel buffers. Calling this again is a no-op.
    pub fn release(&mut self) {
        self.planes = None;
    }

    /// Returns true while pixel buffers are allocated.
    pub fn is_loaded(&self) -> bool {
        self.planes.is_some()
    }

    /// Image height in pixels (0 when nothing is loaded).
    pub fn height(&self) -> usize {
        self.dimensions().height
    }

    /// Image width in pixels (0 when nothing is loaded).
    pub fn width(&self) -> usize {
        self.dimensions().width
    }

    /// Image extents (zero when nothing is loaded).
    pub fn dimensions(&self) -> Dimensions {
        self.planes
            .as_ref()
            .map(|planes| planes.current.dimensions())
            .unwrap_or_default()
    }

    /// The preamble read at load time.
    pub fn header(&self) -> Option<&BmpHeader> {
        self.header.as_ref()
    }

    /// The working buffer.
    pub fn current(&self) -> StereoBmpResult<&PixelBuffer> {
        self.planes
            .as_ref()
            .map(|planes| &planes.current)
            .ok_or(StereoBmpError::MissingBuffer {
                operation: "current",
            })
    }

    /// The snapshot taken at ingest.
    pub fn original(&self) -> StereoBmpResult<&PixelBuffer> {
        self.planes
            .as_ref()
            .map(|planes| &planes.original)
            .ok_or(StereoBmpError::MissingBuffer {
                operation: "original",
            })
    }

    /// Per-channel extremes gathered during ingest.
    pub fn contrast(&self) -> &ContrastRange {
        &self.contrast
    }

    /// Edge points recorded so far, in detection order.
    pub fn edge_points(&self) -> &[EdgePoint] {
        &self.edges
    }

    /// Forgets all recorded edge points.
    ///
    /// Detection only ever appends, so call this before re-running a sweep
    /// whose points should not mix with an earlier one.
    pub fn clear_edge_points(&mut self) {
        self.edges.clear();
    }

    /// Returns true once `apply_grayscale` has run on the loaded data.
    pub fn is_grayscale(&self) -> bool {
        self.grayscale
    }

    /// Splits the store into the borrows block matching needs.
    pub fn match_target(&mut self) -> StereoBmpResult<MatchTarget<'_>> {
        let planes = self.planes.as_mut().ok_or(StereoBmpError::MissingBuffer {
            operation: "match_row",
        })?;
        Ok(MatchTarget::new(&planes.original, &mut planes.current))
    }

    pub(crate) fn current_mut(
        &mut self,
        operation: &'static str,
    ) -> StereoBmpResult<&mut PixelBuffer> {
        self.planes
            .as_mut()
            .map(|planes| &mut planes.current)
            .ok_or(StereoBmpError::MissingBuffer { operation })
    }

    pub(crate) fn loaded(&self, operation: &'static str) -> StereoBmpResult<&PixelBuffer> {
        self.planes
            .as_ref()
            .map(|planes| &planes.current)
            .ok_or(StereoBmpError::MissingBuffer { operation })
    }

    pub(crate) fn set_grayscale(&mut self) {
        self.grayscale = true;
    }

    pub(crate) fn record_edges(&mut self, points: &[EdgePoint]) {
        self.edges.extend_from_slice(points);
    }

    /// Replaces the image data with a fresh parse of `reader`, keeping the
    /// bound path. On error the store is left as it was.
    pub(crate) fn reload_from<R: Read>(&mut self, reader: &mut R) -> StereoBmpResult<()> {
        let fresh = Self::from_reader(reader)?;
        *self = Self {
            path: self.path.take(),
            ..fresh
        };
        Ok(())
    }

    fn read_body<R: Read>(&mut self, reader: &mut R) -> StereoBmpResult<()> {
        let header = BmpHeader::read_from(reader)?;
        let dims = header.dimensions();
        self.header = Some(header);
        self.allocate(dims);
        self.ingest(reader)
    }
}
