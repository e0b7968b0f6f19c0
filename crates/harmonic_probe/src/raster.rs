//! Owned scalar image buffer and plain PGM (P2) serialization.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors surfaced by the raster writer.
///
/// The writer never swallows an I/O failure: an unwritable output path is the
/// caller's problem to report, typically as a non-zero exit status.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("image buffer holds {len} values, expected {width}×{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("failed to write image")]
    Io(#[from] io::Error),
}

/// Heap-allocated W×H grid of scalars, row-major.
///
/// Values are nominally in [0, 1]; anything outside that range is clamped at
/// serialization time, not on store.
#[derive(Debug)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ImageBuffer {
    /// Wrap a row-major value vector produced by the render loop.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self, RasterError> {
        if data.len() != width * height {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> f32 {
        self.data[row * self.width + column]
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Map a scalar to an 8-bit grey level: `clamp(round(256·v), 0, 255)`.
#[inline]
fn grey_level(value: f32) -> u8 {
    let level = (256.0 * value).round();
    level.clamp(0.0, 255.0) as u8
}

/// Serialize the buffer as a plain (ASCII) PGM `P2` image.
///
/// Format: `P2`, `<width> <height>`, `255`, then `height` rows of `width`
/// space-separated grey levels.
pub fn write_pgm<W: Write>(mut out: W, image: &ImageBuffer) -> Result<(), RasterError> {
    writeln!(out, "P2")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;
    for row in image.as_slice().chunks(image.width()) {
        let mut first = true;
        for &value in row {
            if !first {
                write!(out, " ")?;
            }
            write!(out, "{}", grey_level(value))?;
            first = false;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the buffer to `path` as plain PGM, creating or truncating the file.
pub fn write_pgm_file(path: &Path, image: &ImageBuffer) -> Result<(), RasterError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_pgm(&mut out, image)?;
    out.flush()?;
    Ok(())
}
