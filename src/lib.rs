//! stereobmp loads uncompressed 24-bit bitmaps into planar pixel buffers and
//! runs a small pipeline over them: grayscale, auto-contrast, horizontal
//! edge detection along rows, and single-row SSD block matching between two
//! images of a stereo pair.
//!
//! ```no_run
//! use stereobmp::{Bitmap, BufferKind, EdgeParams};
//!
//! # fn main() -> stereobmp::StereoBmpResult<()> {
//! let mut left = Bitmap::load("scene_left")?;
//! let mut right = Bitmap::load("scene_right")?;
//! left.apply_grayscale()?;
//! left.detect_edges(&EdgeParams::default())?;
//! for m in left.match_row(&mut right, 0)? {
//!     println!("{:?} -> {:?}", m.source, m.target);
//! }
//! right.write_output(BufferKind::Current)?;
//! # Ok(())
//! # }
//! ```

pub mod bitmap;
pub mod draw;
pub mod edge;
pub mod image;
pub mod search;
pub mod tone;
mod trace;
pub mod util;

pub use bitmap::{Bitmap, BufferKind};
pub use draw::{Region, HIGHLIGHT};
pub use edge::{EdgeParams, EdgePoint};
pub use image::{BmpHeader, ContrastRange, Dimensions, Pixel, PixelBuffer, CHANNELS};
pub use search::{MatchConfig, MatchTarget, Matcher, RowMatch};
pub use tone::ContrastMode;
pub use util::{StereoBmpError, StereoBmpResult};
