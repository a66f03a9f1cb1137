//! Planar pixel storage.
//!
//! A `PixelBuffer` holds three 8-bit channel planes in one contiguous
//! allocation. Sample `(channel, row, col)` lives at offset
//! `(channel * height + row) * width + col`, so each plane (and each row of a
//! plane) is a contiguous slice.

pub mod contrast;
pub mod header;

pub use contrast::ContrastRange;
pub use header::BmpHeader;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// One pixel as `(channel0, channel1, channel2)`.
pub type Pixel = [u8; CHANNELS];

/// Image extents in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Dimensions {
    /// Creates a `(height, width)` pair.
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Returns true when `(row, col)` addresses a pixel.
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }
}

/// Owned three-channel image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    dims: Dimensions,
}

impl PixelBuffer {
    /// Allocates a zero-filled buffer.
    pub fn zeroed(dims: Dimensions) -> Self {
        Self {
            data: vec![0u8; dims.pixel_count() * CHANNELS],
            dims,
        }
    }

    /// Returns the buffer extents.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.dims.width
    }

    /// Returns the raw planar storage.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the sample at `(channel, row, col)` if it is within bounds.
    pub fn get(&self, channel: usize, row: usize, col: usize) -> Option<u8> {
        if channel >= CHANNELS || row >= self.dims.height || col >= self.dims.width {
            return None;
        }
        Some(self.data[self.offset(channel, row, col)])
    }

    /// Returns all channels of the pixel at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Pixel> {
        if row >= self.dims.height || col >= self.dims.width {
            return None;
        }
        Some(self.pixel_unchecked(row, col))
    }

    /// Returns one channel plane.
    pub fn plane(&self, channel: usize) -> Option<&[u8]> {
        if channel >= CHANNELS {
            return None;
        }
        let len = self.dims.pixel_count();
        let start = channel * len;
        self.data.get(start..start + len)
    }

    /// Returns a contiguous slice for `row` of `channel`.
    pub fn row(&self, channel: usize, row: usize) -> Option<&[u8]> {
        if channel >= CHANNELS || row >= self.dims.height {
            return None;
        }
        let start = self.offset(channel, row, 0);
        self.data.get(start..start + self.dims.width)
    }

    #[inline]
    pub(crate) fn offset(&self, channel: usize, row: usize, col: usize) -> usize {
        (channel * self.dims.height + row) * self.dims.width + col
    }

    #[inline]
    pub(crate) fn sample(&self, channel: usize, row: usize, col: usize) -> u8 {
        self.data[self.offset(channel, row, col)]
    }

    #[inline]
    pub(crate) fn pixel_unchecked(&self, row: usize, col: usize) -> Pixel {
        [
            self.sample(0, row, col),
            self.sample(1, row, col),
            self.sample(2, row, col),
        ]
    }

    #[inline]
    pub(crate) fn set_pixel(&mut self, row: usize, col: usize, px: Pixel) {
        for (channel, value) in px.into_iter().enumerate() {
            let idx = self.offset(channel, row, col);
            self.data[idx] = value;
        }
    }

    /// Mutable access to the three planes at once.
    pub(crate) fn planes_mut(&mut self) -> [&mut [u8]; CHANNELS] {
        let len = self.dims.pixel_count();
        let (c0, rest) = self.data.split_at_mut(len);
        let (c1, c2) = rest.split_at_mut(len);
        [c0, c1, c2]
    }
}
