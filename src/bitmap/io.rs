//! File adapter: `<base>.bmp` in, `<base>_w.bmp` out.

use crate::bitmap::Bitmap;
use crate::image::header::io_error;
use crate::image::{BmpHeader, CHANNELS};
use crate::trace::trace_event;
use crate::util::{StereoBmpError, StereoBmpResult};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Which buffer to serialise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferKind {
    /// The working buffer with all transforms and marks applied.
    #[default]
    Current,
    /// The untouched snapshot taken at ingest.
    Original,
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Input file for a base path.
pub fn input_path<P: AsRef<Path>>(base: P) -> PathBuf {
    with_suffix(base.as_ref(), ".bmp")
}

/// Output file for a base path.
pub fn output_path<P: AsRef<Path>>(base: P) -> PathBuf {
    with_suffix(base.as_ref(), "_w.bmp")
}

impl Bitmap {
    /// Loads `<base>.bmp` and binds `base` for later output.
    pub fn load<P: AsRef<Path>>(base: P) -> StereoBmpResult<Self> {
        let mut bmp = Self::new();
        bmp.set_path(base)?;
        bmp.load_path()?;
        Ok(bmp)
    }

    /// (Re)loads the file named by the bound base path.
    ///
    /// A failed reload keeps the previously loaded image.
    pub fn load_path(&mut self) -> StereoBmpResult<()> {
        let base = self.path().ok_or(StereoBmpError::InvalidState {
            reason: "no base path bound",
        })?;
        let path = input_path(base);
        let file = File::open(&path).map_err(|err| io_error(path.display(), err))?;
        self.reload_from(&mut BufReader::new(file))?;
        trace_event!(
            "bitmap_loaded",
            height = self.height(),
            width = self.width()
        );
        Ok(())
    }

    /// Writes the preamble and the selected buffer to `<base>_w.bmp`.
    ///
    /// Returns the path written.
    pub fn write_output(&self, kind: BufferKind) -> StereoBmpResult<PathBuf> {
        let base = self.path().ok_or(StereoBmpError::InvalidState {
            reason: "no base path bound",
        })?;
        // Check before creating the file so a missing buffer leaves no output.
        self.loaded("write_output")?;
        let path = output_path(base);
        let file = File::create(&path).map_err(|err| io_error(path.display(), err))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, kind)?;
        writer
            .flush()
            .map_err(|err| io_error(path.display(), err))?;
        Ok(path)
    }

    /// Serialises the preamble and the selected buffer as interleaved triplets.
    pub fn write_to<W: Write>(&self, writer: &mut W, kind: BufferKind) -> StereoBmpResult<()> {
        let buf = match kind {
            BufferKind::Current => self.loaded("write_output")?,
            BufferKind::Original => self.original()?,
        };
        let dims = buf.dimensions();

        match self.header() {
            Some(header) => header.write_to(writer)?,
            None => {
                let width = u16::try_from(dims.width).map_err(|_| StereoBmpError::InvalidState {
                    reason: "width does not fit the header",
                })?;
                let height =
                    u16::try_from(dims.height).map_err(|_| StereoBmpError::InvalidState {
                        reason: "height does not fit the header",
                    })?;
                BmpHeader::new(width, height).write_to(writer)?;
            }
        }

        let mut body = Vec::with_capacity(dims.pixel_count() * CHANNELS);
        for row in 0..dims.height {
            for col in 0..dims.width {
                body.extend_from_slice(&buf.pixel_unchecked(row, col));
            }
        }
        writer
            .write_all(&body)
            .map_err(|err| io_error("writing pixel data", err))
    }
}
