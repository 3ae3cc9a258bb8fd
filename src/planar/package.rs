use super::{BitCursor, DIM_BITS, LEN_BITS, NESTED_CHANNELS};
use crate::{Error, Limits, Payload, Pixels, Raster, Result, Reveal, Shape};
use tracing::debug;

/// A bit-plane package that may contain a concealed payload.
///
/// Every reveal starts a fresh [`BitCursor`] at the first slot of bit-plane 0,
/// so a package can be read as one shape and then the other without the
/// first attempt disturbing the second.
///
/// When no [`Shape`] is fixed, [`reveal`][crate::Reveal::reveal] first looks for
/// a bytes frame and falls back to an image frame if the length header is not
/// plausible. If neither header is plausible, the error of the image attempt is
/// returned, which usually means the raster hides nothing.
///
/// # Examples
///
/// Revealing a payload of known shape:
///
/// ```
/// use planesteg::{planar, Conceal, Pixels};
///
/// let mut cover = Pixels::new(16, 16, 3);
/// planar::Carrier::bytes(b"a very secret message").conceal(&mut cover)?;
///
/// let message = planar::Package::new().reveal_bytes(&cover)?;
/// assert_eq!(message, b"a very secret message");
/// # Ok::<(), planesteg::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Package {
    shape: Option<Shape>,
    limits: Limits,
}

impl Package {
    /// Creates a [`Package`] that detects the payload shape from its header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Package`] that only looks for the given payload shape.
    #[must_use]
    pub fn with_shape(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            limits: Limits::default(),
        }
    }

    /// Replaces the plausibility bounds used to validate headers.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Reveals an opaque byte payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousHeader`] if the stored length is zero, not
    /// below [`Limits::max_payload_len`], or larger than the raster could hold,
    /// and [`Error::InsufficientCapacity`] if the raster cannot even hold the
    /// 64-bit header.
    pub fn reveal_bytes<R: Raster + ?Sized>(&self, package: &R) -> Result<Vec<u8>> {
        let available = Self::check_header(package, LEN_BITS)?;

        let mut cursor = BitCursor::new(package);
        let len = cursor.read_bits(LEN_BITS)?;

        if !self.limits.accepts_payload_len(len) || len.saturating_mul(8) > available {
            debug!(len, available, "no plausible bytes header");
            return Err(Error::AmbiguousHeader {
                shape: Shape::Bytes,
                value: len,
            });
        }

        debug!(len, "revealing bytes payload");

        (0..len).map(|_| cursor.read_byte()).collect()
    }

    /// Reveals a nested 3-channel image.
    ///
    /// The first header field is the row count and the second the column
    /// count; the samples follow in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousHeader`] if the stored row count is zero, above
    /// [`Limits::max_image_rows`], or the image is larger than the raster could
    /// hold, and [`Error::InsufficientCapacity`] if the raster cannot even hold
    /// the 32-bit header.
    pub fn reveal_image<R: Raster + ?Sized>(&self, package: &R) -> Result<Pixels> {
        let available = Self::check_header(package, 2 * DIM_BITS)?;

        let mut cursor = BitCursor::new(package);
        let header = cursor.read_bits(2 * DIM_BITS)?;

        let rows = (header >> DIM_BITS) as u16;
        let cols = header as u16;
        let body = u64::from(rows) * u64::from(cols) * NESTED_CHANNELS as u64 * 8;

        if !self.limits.accepts_image_rows(rows) || body > available {
            debug!(rows, cols, available, "no plausible image header");
            return Err(Error::AmbiguousHeader {
                shape: Shape::Image,
                value: header,
            });
        }

        debug!(rows, cols, "revealing image payload");

        let (rows, cols) = (usize::from(rows), usize::from(cols));
        let mut image = Pixels::new(cols, rows, NESTED_CHANNELS);

        for row in 0..rows {
            for col in 0..cols {
                for channel in 0..NESTED_CHANNELS {
                    image.set(row, col, channel, cursor.read_byte()?);
                }
            }
        }

        Ok(image)
    }

    /// Checks that a header of `bits` fits and returns the bits left for the body.
    fn check_header<R: Raster + ?Sized>(package: &R, bits: u32) -> Result<u64> {
        let capacity = package.capacity();

        capacity
            .checked_sub(bits.into())
            .ok_or(Error::InsufficientCapacity {
                required: bits.into(),
                available: capacity,
            })
    }
}

impl Reveal for &Package {
    type Output = Payload;

    fn reveal<R: Raster + ?Sized>(self, package: &R) -> Result<Payload> {
        match self.shape {
            Some(Shape::Bytes) => self.reveal_bytes(package).map(Payload::Bytes),
            Some(Shape::Image) => self.reveal_image(package).map(Payload::Image),
            None => match self.reveal_bytes(package) {
                Err(Error::AmbiguousHeader { .. } | Error::InsufficientCapacity { .. }) => {
                    debug!("falling back to an image frame");
                    self.reveal_image(package).map(Payload::Image)
                }
                result => result.map(Payload::Bytes),
            },
        }
    }
}

impl Reveal for Package {
    type Output = Payload;

    fn reveal<R: Raster + ?Sized>(self, package: &R) -> Result<Payload> {
        (&self).reveal(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{planar::Carrier, Conceal};

    #[test]
    fn it_reports_empty_rasters_as_too_small() {
        assert_eq!(
            Package::new().reveal(&Pixels::new(0, 0, 3)),
            Err(Error::InsufficientCapacity {
                required: 32,
                available: 0,
            })
        );
    }

    #[test]
    fn it_rejects_lengths_beyond_the_raster() -> Result<()> {
        let mut cover = Pixels::new(4, 4, 3);
        let mut cursor = BitCursor::new(&mut cover);
        cursor.write_bits(1_000, LEN_BITS)?;

        assert_eq!(
            Package::new().reveal_bytes(&cover),
            Err(Error::AmbiguousHeader {
                shape: Shape::Bytes,
                value: 1_000,
            })
        );

        Ok(())
    }

    #[test]
    fn it_honours_custom_limits() -> Result<()> {
        let mut cover = Pixels::new(32, 32, 3);
        Carrier::bytes(&[7; 100]).conceal(&mut cover)?;

        let strict = Package::new().with_limits(Limits::default().with_max_payload_len(100));

        assert!(strict
            .reveal_bytes(&cover)
            .is_err_and(|err| err.is_ambiguous_header()));
        assert_eq!(Package::new().reveal_bytes(&cover)?, [7; 100]);

        Ok(())
    }

    #[test]
    fn it_falls_back_to_an_image_frame() -> Result<()> {
        let mut cover = Pixels::new(20, 20, 3);
        let mut secret = Pixels::new(3, 2, 3);
        secret.set(1, 2, 0, 0xab);

        Carrier::image(&secret).conceal(&mut cover)?;

        assert_eq!(Package::new().reveal(&cover)?, Payload::Image(secret));

        Ok(())
    }

    #[test]
    fn it_sticks_to_a_fixed_shape() -> Result<()> {
        let mut cover = Pixels::new(20, 20, 3);
        Carrier::image(&Pixels::new(3, 2, 3)).conceal(&mut cover)?;

        assert!(Package::with_shape(Shape::Bytes)
            .reveal(&cover)
            .is_err_and(|err| err.is_ambiguous_header()));

        Ok(())
    }
}
