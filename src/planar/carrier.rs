use super::{BitCursor, DIM_BITS, LEN_BITS, NESTED_CHANNELS};
use crate::{Conceal, Error, Limits, Payload, Pixels, Raster, RasterMut, Result, Shape};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
enum Cargo<'p> {
    Bytes(&'p [u8]),
    Image(&'p Pixels),
}

/// A bit-plane carrier that can conceal one payload in a cover raster.
///
/// The [`conceal`][crate::Conceal::conceal] method checks that the whole frame
/// fits in the cover before touching it, so a failed call leaves the cover
/// exactly as it was. On success, it returns the number of bits written.
///
/// # Examples
///
/// Concealing a nested image:
///
/// ```
/// use planesteg::{planar, Conceal, Pixels};
///
/// let mut cover = Pixels::new(50, 50, 3);
/// let secret = Pixels::new(2, 2, 3);
///
/// let bits = planar::Carrier::image(&secret).conceal(&mut cover)?;
/// assert_eq!(bits, 32 + 2 * 2 * 3 * 8);
/// # Ok::<(), planesteg::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Carrier<'p> {
    cargo: Cargo<'p>,
    limits: Limits,
}

impl<'p> Carrier<'p> {
    /// Creates a [`Carrier`] for an opaque byte payload.
    #[must_use]
    pub fn bytes(payload: &'p [u8]) -> Self {
        Self {
            cargo: Cargo::Bytes(payload),
            limits: Limits::default(),
        }
    }

    /// Creates a [`Carrier`] for a nested 3-channel image.
    ///
    /// The frame stores the row count, then the column count, followed by the
    /// samples in row-major order.
    #[must_use]
    pub fn image(image: &'p Pixels) -> Self {
        Self {
            cargo: Cargo::Image(image),
            limits: Limits::default(),
        }
    }

    /// Sets the limits the receiver is expected to decode with.
    ///
    /// They are only used to warn about payloads that will not be recognised on
    /// the other end; concealing is never refused because of them.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the shape of the frame this carrier writes.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self.cargo {
            Cargo::Bytes(_) => Shape::Bytes,
            Cargo::Image(_) => Shape::Image,
        }
    }

    /// Number of bits the framed payload occupies, header included.
    #[must_use]
    pub fn required_bits(&self) -> u64 {
        match self.cargo {
            Cargo::Bytes(bytes) => (bytes.len() as u64)
                .saturating_mul(8)
                .saturating_add(LEN_BITS.into()),
            Cargo::Image(image) => (image.width() as u64)
                .saturating_mul(image.height() as u64)
                .saturating_mul(image.channels() as u64)
                .saturating_mul(8)
                .saturating_add((2 * DIM_BITS).into()),
        }
    }

    fn validate(&self) -> Result<()> {
        match self.cargo {
            Cargo::Bytes(bytes) => {
                if !self.limits.accepts_payload_len(bytes.len() as u64) {
                    warn!(
                        len = bytes.len(),
                        max = self.limits.max_payload_len,
                        "payload length is outside the decode limits and will not be recognised"
                    );
                }
            }
            Cargo::Image(image) => {
                let (width, height, channels) = image.dimensions();

                if channels != NESTED_CHANNELS {
                    return Err(Error::UnsupportedChannels(channels));
                }

                let (Ok(rows), Ok(_)) = (u16::try_from(height), u16::try_from(width)) else {
                    return Err(Error::DimensionOverflow { width, height });
                };

                if !self.limits.accepts_image_rows(rows) {
                    warn!(
                        rows,
                        max = self.limits.max_image_rows,
                        "image row count is outside the decode limits and will not be recognised"
                    );
                }
            }
        }

        Ok(())
    }
}

impl<'p> From<&'p Payload> for Carrier<'p> {
    fn from(payload: &'p Payload) -> Self {
        match payload {
            Payload::Bytes(bytes) => Self::bytes(bytes),
            Payload::Image(image) => Self::image(image),
        }
    }
}

impl Conceal for Carrier<'_> {
    fn conceal<R: RasterMut + ?Sized>(self, cover: &mut R) -> Result<u64> {
        self.validate()?;

        let required = self.required_bits();
        let available = cover.capacity();

        debug!(shape = %self.shape(), required, available, "concealing payload");

        if required > available {
            return Err(Error::InsufficientCapacity {
                required,
                available,
            });
        }

        let mut cursor = BitCursor::new(cover);

        match self.cargo {
            Cargo::Bytes(bytes) => {
                cursor.write_bits(bytes.len() as u64, LEN_BITS)?;

                for &byte in bytes {
                    cursor.write_byte(byte)?;
                }
            }
            Cargo::Image(image) => {
                cursor.write_bits(image.height() as u64, DIM_BITS)?;
                cursor.write_bits(image.width() as u64, DIM_BITS)?;

                for row in 0..image.height() {
                    for col in 0..image.width() {
                        for channel in 0..NESTED_CHANNELS {
                            cursor.write_byte(image.get(row, col, channel))?;
                        }
                    }
                }
            }
        }

        debug!(bits = required, plane = cursor.plane(), "payload concealed");

        Ok(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_counts_header_and_body_bits() {
        assert_eq!(Carrier::bytes(b"hi").required_bits(), 80);
        assert_eq!(Carrier::bytes(&[]).required_bits(), 64);
        assert_eq!(Carrier::image(&Pixels::new(2, 2, 3)).required_bits(), 128);
    }

    #[test]
    fn it_rejects_images_without_three_channels() {
        let mut cover = Pixels::new(50, 50, 3);
        let gray = Pixels::new(2, 2, 1);

        assert_eq!(
            Carrier::image(&gray).conceal(&mut cover),
            Err(Error::UnsupportedChannels(1))
        );
    }

    #[test]
    fn it_rejects_images_wider_than_the_header() {
        let mut cover = Pixels::new(1, 1, 3);
        let wide = Pixels::new(70_000, 1, 3);

        assert_eq!(
            Carrier::image(&wide).conceal(&mut cover),
            Err(Error::DimensionOverflow {
                width: 70_000,
                height: 1,
            })
        );
    }

    #[test]
    fn it_writes_the_length_header_first() -> Result<()> {
        let mut cover = Pixels::new(8, 8, 1);

        Carrier::bytes(&[0u8; 5]).conceal(&mut cover)?;

        // 64 header bits fill plane 0; the length 5 ends in 0b101.
        let low_bits: Vec<u8> = cover.as_raw()[61..].iter().map(|s| s & 1).collect();
        assert_eq!(low_bits, [1, 0, 1]);

        Ok(())
    }

    #[test]
    fn it_writes_rows_then_columns_then_row_major_samples() -> Result<()> {
        fn msb_first(value: u64, width: u32) -> impl Iterator<Item = u8> {
            (0..width).rev().map(move |bit| ((value >> bit) & 1) as u8)
        }

        // 2 rows of 3 columns, every sample distinct.
        let secret = Pixels::from_raw(3, 2, 3, (0..18).map(|i| i * 13 + 1).collect())?;

        // 32 + 18 * 8 = 176 bits, all on plane 0.
        let mut cover = Pixels::new(176, 1, 1);
        Carrier::image(&secret).conceal(&mut cover)?;

        let mut expected: Vec<u8> = msb_first(2, DIM_BITS).chain(msb_first(3, DIM_BITS)).collect();
        for row in 0..2 {
            for col in 0..3 {
                for channel in 0..3 {
                    expected.extend(msb_first(secret.get(row, col, channel).into(), 8));
                }
            }
        }

        let low_bits: Vec<u8> = cover.as_raw().iter().map(|s| s & 1).collect();
        assert_eq!(low_bits, expected);

        Ok(())
    }
}
