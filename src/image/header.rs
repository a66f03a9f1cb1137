//! Fixed-size bitmap preamble.
//!
//! Only the two extent fields are interpreted; every other byte is kept
//! verbatim and written back unchanged.

use crate::image::Dimensions;
use crate::util::{StereoBmpError, StereoBmpResult};
use std::io::{Read, Write};

/// Length of the preamble in bytes.
pub const HEADER_LEN: usize = 54;

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const FILE_SIZE_OFFSET: usize = 2;
const PIXEL_OFFSET_OFFSET: usize = 10;
const INFO_SIZE_OFFSET: usize = 14;
const PLANES_OFFSET: usize = 26;
const BPP_OFFSET: usize = 28;
const IMAGE_SIZE_OFFSET: usize = 34;

/// The raw bitmap preamble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    bytes: [u8; HEADER_LEN],
}

impl BmpHeader {
    /// Builds a canonical 24-bit preamble for a `width x height` image.
    ///
    /// The two size fields saturate at `u32::MAX` for extents too large to
    /// describe; readers only look at the width and height.
    pub fn new(width: u16, height: u16) -> Self {
        let pixel_bytes = u64::from(width) * u64::from(height) * 3;
        let file_size = saturate_u32(HEADER_LEN as u64 + pixel_bytes);
        let pixel_bytes = saturate_u32(pixel_bytes);
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = b'B';
        bytes[1] = b'M';
        put_u32(&mut bytes, FILE_SIZE_OFFSET, file_size);
        put_u32(&mut bytes, PIXEL_OFFSET_OFFSET, HEADER_LEN as u32);
        put_u32(&mut bytes, INFO_SIZE_OFFSET, 40);
        put_u16(&mut bytes, WIDTH_OFFSET, width);
        put_u16(&mut bytes, HEIGHT_OFFSET, height);
        put_u16(&mut bytes, PLANES_OFFSET, 1);
        put_u16(&mut bytes, BPP_OFFSET, 24);
        put_u32(&mut bytes, IMAGE_SIZE_OFFSET, pixel_bytes);
        Self { bytes }
    }

    /// Wraps preamble bytes as read from a file.
    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        Self { bytes }
    }

    /// Reads exactly `HEADER_LEN` bytes from `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> StereoBmpResult<Self> {
        let raw = read_up_to(reader, HEADER_LEN)?;
        let bytes: [u8; HEADER_LEN] = raw
            .as_slice()
            .try_into()
            .map_err(|_| StereoBmpError::TruncatedInput {
                expected: HEADER_LEN,
                got: raw.len(),
            })?;
        Ok(Self { bytes })
    }

    /// Writes the preamble verbatim.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> StereoBmpResult<()> {
        writer
            .write_all(&self.bytes)
            .map_err(|err| io_error("writing header", err))
    }

    /// Returns the preamble bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }

    /// Width in pixels (little-endian `u16` at byte 18).
    pub fn width(&self) -> u16 {
        u16::from_le_bytes([self.bytes[WIDTH_OFFSET], self.bytes[WIDTH_OFFSET + 1]])
    }

    /// Height in pixels (little-endian `u16` at byte 22).
    pub fn height(&self) -> u16 {
        u16::from_le_bytes([self.bytes[HEIGHT_OFFSET], self.bytes[HEIGHT_OFFSET + 1]])
    }

    /// Image extents described by the preamble.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.height() as usize, self.width() as usize)
    }
}

fn put_u16(bytes: &mut [u8], offset: usize, value: u16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn put_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Reads until `len` bytes are collected or the reader is exhausted.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, len: usize) -> StereoBmpResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|err| io_error("reading input", err))?;
    Ok(buf)
}

pub(crate) fn io_error(context: impl std::fmt::Display, err: std::io::Error) -> StereoBmpError {
    StereoBmpError::Io {
        reason: format!("{context}: {err}"),
    }
}
