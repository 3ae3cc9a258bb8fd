use super::bits::{MsbFirst, MASKS};
use crate::{Error, Raster, RasterMut, Result};
use tracing::trace;

/// The sample and bit-plane a [`BitCursor`] will access next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row of the sample.
    pub row: usize,
    /// Column of the sample.
    pub col: usize,
    /// Channel within the pixel.
    pub channel: usize,
    /// Bit-plane index, `0` being the least significant.
    pub plane: u8,
}

/// A cursor that reads and writes single bits of a raster, one sample at a time.
///
/// Each access touches the bit selected by the current plane's mask and then
/// advances to the next channel, wrapping into the next column, then the next
/// row. Once the whole raster has been visited on one plane, the cursor moves
/// on to the next more significant plane, so all of bit-plane 0 is used before
/// any of bit-plane 1. After the last sample of plane 7 the cursor is
/// exhausted and every further access fails with [`Error::CapacityExhausted`].
///
/// A cursor borrows its raster for its whole lifetime: `BitCursor<&R>` can only
/// read, while `BitCursor<&mut R>` can also write.
///
/// # Examples
///
/// ```
/// use planesteg::{planar::BitCursor, Pixels};
///
/// let mut pixels = Pixels::new(2, 1, 3);
///
/// let mut cursor = BitCursor::new(&mut pixels);
/// cursor.write_bits(0b1011, 4)?;
///
/// let mut cursor = BitCursor::new(&pixels);
/// assert_eq!(cursor.read_bits(4)?, 0b1011);
/// # Ok::<(), planesteg::Error>(())
/// ```
#[derive(Debug)]
pub struct BitCursor<R> {
    raster: R,
    row: usize,
    col: usize,
    channel: usize,
    plane: usize,
    exhausted: bool,
}

impl<R: Raster> BitCursor<R> {
    /// Creates a cursor at the first sample of bit-plane 0.
    ///
    /// A raster with no samples yields a cursor that is exhausted from the start.
    #[must_use]
    pub fn new(raster: R) -> Self {
        let exhausted = raster.capacity() == 0;

        Self {
            raster,
            row: 0,
            col: 0,
            channel: 0,
            plane: 0,
            exhausted,
        }
    }

    /// Index of the current bit-plane, `0` being the least significant.
    #[must_use]
    pub fn plane(&self) -> u8 {
        self.plane as u8
    }

    /// Single-bit mask of the current bit-plane.
    #[must_use]
    pub fn mask(&self) -> u8 {
        MASKS[self.plane]
    }

    /// Returns the next position to be accessed, or `None` once exhausted.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        (!self.exhausted).then(|| Position {
            row: self.row,
            col: self.col,
            channel: self.channel,
            plane: self.plane(),
        })
    }

    /// Returns `true` once every slot of every bit-plane has been used.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Releases the borrowed raster.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.raster
    }

    /// Moves to the next slot: channel first, then column, row, and bit-plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if the cursor is already past the
    /// last slot of the highest bit-plane.
    pub fn advance(&mut self) -> Result<()> {
        if self.exhausted {
            return Err(Error::CapacityExhausted);
        }

        self.channel += 1;
        if self.channel < self.raster.channels() {
            return Ok(());
        }

        self.channel = 0;
        self.col += 1;
        if self.col < self.raster.width() {
            return Ok(());
        }

        self.col = 0;
        self.row += 1;
        if self.row < self.raster.height() {
            return Ok(());
        }

        self.row = 0;
        if self.plane + 1 < MASKS.len() {
            self.plane += 1;
            trace!(plane = self.plane, "moved to the next bit-plane");
        } else {
            self.exhausted = true;
            trace!("every bit-plane is used");
        }

        Ok(())
    }

    /// Reads the bit at the current slot and advances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if no slot is left.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self.current()? & self.mask() != 0;
        self.advance()?;

        Ok(bit)
    }

    /// Reads `width` bits, most significant first, into the low bits of a `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if the raster runs out of slots;
    /// the bits read so far are lost.
    pub fn read_bits(&mut self, width: u32) -> Result<u64> {
        debug_assert!(width <= u64::BITS);

        (0..width).try_fold(0u64, |value, _| Ok((value << 1) | u64::from(self.read_bit()?)))
    }

    /// Reads 8 bits, most significant first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if the raster runs out of slots.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(u8::BITS)? as u8)
    }

    fn current(&self) -> Result<u8> {
        if self.exhausted {
            return Err(Error::CapacityExhausted);
        }

        Ok(self.raster.sample(self.row, self.col, self.channel))
    }
}

impl<R: RasterMut> BitCursor<R> {
    /// Sets or clears the bit at the current slot and advances.
    ///
    /// Only the bit of the current plane is changed; every other bit of the
    /// sample keeps its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if no slot is left. The raster is
    /// not modified in that case.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        let sample = self.current()?;
        let mask = self.mask();

        let sample = if bit { sample | mask } else { sample & !mask };
        self.raster.set_sample(self.row, self.col, self.channel, sample);

        self.advance()
    }

    /// Writes the low `width` bits of `value`, most significant first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if the raster runs out of slots;
    /// the bits written so far stay in the raster.
    pub fn write_bits(&mut self, value: u64, width: u32) -> Result<()> {
        MsbFirst::new(value, width).try_for_each(|bit| self.write_bit(bit))
    }

    /// Writes 8 bits, most significant first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExhausted`] if the raster runs out of slots.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        MsbFirst::from(byte).try_for_each(|bit| self.write_bit(bit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pixels;

    #[test]
    fn it_walks_channels_then_columns_then_rows() -> Result<()> {
        let pixels = Pixels::new(2, 2, 3);
        let mut cursor = BitCursor::new(&pixels);

        let mut visited = Vec::new();
        while let Some(position) = cursor.position().filter(|p| p.plane == 0) {
            visited.push((position.row, position.col, position.channel));
            cursor.advance()?;
        }

        assert_eq!(
            visited,
            [
                (0, 0, 0),
                (0, 0, 1),
                (0, 0, 2),
                (0, 1, 0),
                (0, 1, 1),
                (0, 1, 2),
                (1, 0, 0),
                (1, 0, 1),
                (1, 0, 2),
                (1, 1, 0),
                (1, 1, 1),
                (1, 1, 2),
            ]
        );
        assert_eq!(cursor.mask(), 2);

        Ok(())
    }

    #[test]
    fn it_fills_a_plane_before_promoting() -> Result<()> {
        let mut pixels = Pixels::new(2, 1, 2);
        let mut cursor = BitCursor::new(&mut pixels);

        for _ in 0..6 {
            cursor.write_bit(true)?;
        }

        assert_eq!(cursor.plane(), 1);
        assert_eq!(pixels.as_raw(), [3, 3, 1, 1]);

        Ok(())
    }

    #[test]
    fn it_clears_only_the_current_plane() -> Result<()> {
        let mut pixels = Pixels::from_raw(1, 1, 1, vec![0xff])?;
        let mut cursor = BitCursor::new(&mut pixels);

        cursor.write_bits(0b010, 3)?;

        assert_eq!(pixels.get(0, 0, 0), 0b1111_1010);

        Ok(())
    }

    #[test]
    fn it_exhausts_after_the_last_plane() -> Result<()> {
        let mut pixels = Pixels::new(1, 1, 2);
        let mut cursor = BitCursor::new(&mut pixels);

        cursor.write_bits(u64::from(u16::MAX), 16)?;

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.position(), None);
        assert_eq!(cursor.write_bit(false), Err(Error::CapacityExhausted));
        assert_eq!(cursor.advance(), Err(Error::CapacityExhausted));
        assert_eq!(pixels.as_raw(), [0xff, 0xff]);

        Ok(())
    }

    #[test]
    fn it_starts_exhausted_on_empty_rasters() {
        let pixels = Pixels::new(3, 0, 3);
        let mut cursor = BitCursor::new(&pixels);

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.read_bit(), Err(Error::CapacityExhausted));
    }

    #[test]
    fn it_reads_back_across_planes() -> Result<()> {
        let mut pixels = Pixels::new(3, 1, 1);

        let mut cursor = BitCursor::new(&mut pixels);
        cursor.write_byte(0xb6)?;
        assert_eq!(cursor.position().map(|p| p.plane), Some(2));

        let mut cursor = BitCursor::new(&pixels);
        assert_eq!(cursor.read_byte()?, 0xb6);

        Ok(())
    }
}
