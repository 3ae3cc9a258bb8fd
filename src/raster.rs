//! Pixel rasters that can act as carriers.
//!
//! A raster is a grid of `width × height` pixels, each made of `channels`
//! interleaved 8-bit samples. The [`Raster`] and [`RasterMut`] traits are the
//! seam between the codec and whatever decoded the image file; [`Pixels`] is a
//! plain owned implementation.

use crate::{Error, Result};

/// Number of bit-planes in an 8-bit sample.
pub const PLANES: u64 = 8;

/// Read access to a raster of 8-bit samples.
pub trait Raster {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Number of interleaved samples per pixel.
    fn channels(&self) -> usize;

    /// Returns the sample at the given position.
    ///
    /// # Panics
    ///
    /// Implementations may panic if the position is out of bounds.
    fn sample(&self, row: usize, col: usize, channel: usize) -> u8;

    /// Total number of bits that can be hidden in this raster across all bit-planes.
    fn capacity(&self) -> u64 {
        (self.width() as u64)
            .saturating_mul(self.height() as u64)
            .saturating_mul(self.channels() as u64)
            .saturating_mul(PLANES)
    }
}

/// Write access to a raster of 8-bit samples.
pub trait RasterMut: Raster {
    /// Replaces the sample at the given position.
    fn set_sample(&mut self, row: usize, col: usize, channel: usize, value: u8);
}

impl<T: Raster + ?Sized> Raster for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn channels(&self) -> usize {
        (**self).channels()
    }

    fn sample(&self, row: usize, col: usize, channel: usize) -> u8 {
        (**self).sample(row, col, channel)
    }
}

impl<T: Raster + ?Sized> Raster for &mut T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn channels(&self) -> usize {
        (**self).channels()
    }

    fn sample(&self, row: usize, col: usize, channel: usize) -> u8 {
        (**self).sample(row, col, channel)
    }
}

impl<T: RasterMut + ?Sized> RasterMut for &mut T {
    fn set_sample(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        (**self).set_sample(row, col, channel, value);
    }
}

/// An owned raster stored row by row, with the channels of each pixel interleaved.
///
/// # Examples
///
/// ```
/// use planesteg::{Pixels, Raster};
///
/// let mut pixels = Pixels::new(4, 2, 3);
/// pixels.set(1, 3, 2, 0xff);
///
/// assert_eq!(pixels.get(1, 3, 2), 0xff);
/// assert_eq!(pixels.capacity(), 4 * 2 * 3 * 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pixels {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Pixels {
    /// Creates a zero-filled raster.
    #[must_use]
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    /// Wraps an existing row-major interleaved buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels));

        if expected != Some(data.len()) {
            return Err(Error::DimensionMismatch {
                width,
                height,
                channels,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Returns `(width, height, channels)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.channels)
    }

    /// Returns the sample at the given position.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the raster.
    #[must_use]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.data[self.index(row, col, channel)]
    }

    /// Replaces the sample at the given position.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the raster.
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        let index = self.index(row, col, channel);
        self.data[index] = value;
    }

    /// Returns the row-major interleaved samples.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the raster and returns its row-major interleaved samples.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, row: usize, col: usize, channel: usize) -> usize {
        assert!(
            row < self.height && col < self.width && channel < self.channels,
            "sample ({row}, {col}, {channel}) is outside a {}x{}x{} raster",
            self.width,
            self.height,
            self.channels,
        );

        (row * self.width + col) * self.channels + channel
    }
}

impl Raster for Pixels {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn sample(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.get(row, col, channel)
    }
}

impl RasterMut for Pixels {
    fn set_sample(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        self.set(row, col, channel, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_lays_out_samples_row_major() {
        let mut pixels = Pixels::new(3, 2, 3);
        pixels.set(1, 0, 2, 7);

        assert_eq!(pixels.as_raw()[3 * 3 + 2], 7);
    }

    #[test]
    fn it_rejects_mismatched_buffers() {
        assert_eq!(
            Pixels::from_raw(2, 2, 3, vec![0; 11]),
            Err(Error::DimensionMismatch {
                width: 2,
                height: 2,
                channels: 3,
                len: 11,
            })
        );
    }

    #[test]
    fn it_reports_capacity_through_references() {
        let pixels = Pixels::new(10, 10, 3);
        let by_ref = &pixels;

        assert_eq!(by_ref.capacity(), 2400);
        assert_eq!(Pixels::new(0, 10, 3).capacity(), 0);
    }

    #[test]
    #[should_panic]
    fn it_panics_outside_bounds() {
        let _ = Pixels::new(2, 2, 3).get(2, 0, 0);
    }
}
