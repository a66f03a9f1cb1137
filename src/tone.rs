//! Whole-buffer tone transforms on the working buffer.

use crate::bitmap::Bitmap;
use crate::image::{ContrastRange, PixelBuffer, CHANNELS};
use crate::trace::trace_span;
use crate::util::{StereoBmpError, StereoBmpResult};

/// How auto-contrast scales the `[min, max]` range of a channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContrastMode {
    /// `(v - min) * (255 / (max - min))` with the ratio truncated first.
    ///
    /// Byte-compatible with legacy output; the stretch is coarse because the
    /// gain is an integer.
    #[default]
    Truncated,
    /// `(v - min) * 255 / (max - min)`, truncating only the final result.
    Linear,
}

impl ContrastMode {
    #[inline]
    fn remap(self, value: u8, min: u8, max: u8) -> u8 {
        let v = value as i32 - min as i32;
        let range = max as i32 - min as i32;
        let out = match self {
            ContrastMode::Truncated => v * (255 / range),
            ContrastMode::Linear => v * 255 / range,
        };
        out.clamp(0, 255) as u8
    }
}

/// Replaces every pixel by the truncated mean of its three channels.
pub fn grayscale(buf: &mut PixelBuffer) {
    let [c0, c1, c2] = buf.planes_mut();
    for ((a, b), c) in c0.iter_mut().zip(c1.iter_mut()).zip(c2.iter_mut()) {
        let mean = ((*a as u16 + *b as u16 + *c as u16) / 3) as u8;
        *a = mean;
        *b = mean;
        *c = mean;
    }
}

/// Stretches each channel of `buf` using the extremes in `range`.
///
/// Every channel is checked before any sample is written, so a degenerate
/// channel leaves the buffer untouched.
pub fn auto_contrast(
    buf: &mut PixelBuffer,
    range: &ContrastRange,
    mode: ContrastMode,
) -> StereoBmpResult<()> {
    for channel in 0..CHANNELS {
        let (max, min) = (range.max(channel), range.min(channel));
        if max <= min {
            return Err(StereoBmpError::DegenerateContrast {
                channel,
                value: min,
            });
        }
    }

    for (channel, plane) in buf.planes_mut().into_iter().enumerate() {
        let (max, min) = (range.max(channel), range.min(channel));
        for value in plane.iter_mut() {
            *value = mode.remap(*value, min, max);
        }
    }
    Ok(())
}

impl Bitmap {
    /// Converts the working buffer to gray and sets the grayscale flag.
    ///
    /// The original snapshot keeps its colour.
    pub fn apply_grayscale(&mut self) -> StereoBmpResult<()> {
        let _guard = trace_span!("grayscale").entered();
        grayscale(self.current_mut("grayscale")?);
        self.set_grayscale();
        Ok(())
    }

    /// Stretches the working buffer with [`ContrastMode::Truncated`].
    pub fn apply_auto_contrast(&mut self) -> StereoBmpResult<()> {
        self.apply_auto_contrast_with(ContrastMode::default())
    }

    /// Stretches the working buffer using the extremes gathered at ingest.
    pub fn apply_auto_contrast_with(&mut self, mode: ContrastMode) -> StereoBmpResult<()> {
        let _guard = trace_span!("auto_contrast").entered();
        let range = *self.contrast();
        auto_contrast(self.current_mut("auto_contrast")?, &range, mode)
    }
}
