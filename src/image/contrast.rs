//! Per-channel intensity extremes gathered during ingestion.

use crate::image::{Pixel, CHANNELS};

/// Running `(max, min)` per channel.
///
/// Starts at the sentinels `max = 0`, `min = 255` so the first observed
/// pixel always replaces both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContrastRange {
    max: [u8; CHANNELS],
    min: [u8; CHANNELS],
}

impl Default for ContrastRange {
    fn default() -> Self {
        Self {
            max: [u8::MIN; CHANNELS],
            min: [u8::MAX; CHANNELS],
        }
    }
}

impl ContrastRange {
    /// Folds one pixel into the running extremes.
    pub fn observe(&mut self, px: Pixel) {
        for (channel, &value) in px.iter().enumerate() {
            self.max[channel] = self.max[channel].max(value);
            self.min[channel] = self.min[channel].min(value);
        }
    }

    /// Largest value seen on `channel`.
    pub fn max(&self, channel: usize) -> u8 {
        self.max[channel]
    }

    /// Smallest value seen on `channel`.
    pub fn min(&self, channel: usize) -> u8 {
        self.min[channel]
    }

    /// Returns true once at least one pixel has been observed.
    pub fn is_populated(&self) -> bool {
        (0..CHANNELS).all(|channel| self.max[channel] >= self.min[channel])
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
