//! Bit-plane implementations of [`Conceal`][crate::Conceal] and [`Reveal`][crate::Reveal].
//!
//! The [`Carrier`] and [`Package`] structures hide and recover payloads in the
//! bit-planes of a raster, using a [`BitCursor`] to hand out one bit slot at a time.
//!
//! ## Bit-Planes
//!
//! A *bit-plane* is one bit position taken across every sample of the raster.
//! Payload bits fill bit-plane 0 of every sample first, in channel, column,
//! row order, and only then spill over into bit-plane 1, and so on up to
//! bit-plane 7. A raster of `width × height × channels` samples therefore holds
//! up to `width × height × channels × 8` bits, with small payloads touching
//! nothing but the least significant bits.
//!
//! ## Framing
//!
//! Every payload starts at the first slot of bit-plane 0 with a fixed-width,
//! big-endian header:
//!
//! | Shape   | Header                         | Body                                   |
//! |---------|--------------------------------|----------------------------------------|
//! | bytes   | 64-bit byte length             | the bytes, most significant bit first  |
//! | image   | 16-bit row count, 16-bit column count | `rows × cols × 3` samples in row-major order |
//!
//! The headers carry no tag telling the two shapes apart. On decode, a header
//! is only trusted if it passes the plausibility bounds in [`Limits`][crate::Limits];
//! otherwise [`Error::AmbiguousHeader`][crate::Error::AmbiguousHeader] is
//! returned and the caller may try the other shape.
//!
//! ## Examples
//!
//! Hiding a message and reading it back:
//!
//! ```
//! use planesteg::{planar, Conceal, Payload, Pixels, Reveal};
//!
//! let mut cover = Pixels::new(10, 10, 3);
//!
//! planar::Carrier::bytes(b"hi").conceal(&mut cover)?;
//!
//! let payload = planar::Package::new().reveal(&cover)?;
//! assert_eq!(payload, Payload::Bytes(b"hi".to_vec()));
//! # Ok::<(), planesteg::Error>(())
//! ```

mod bits;
mod carrier;
mod cursor;
mod package;

pub use carrier::Carrier;
pub use cursor::{BitCursor, Position};
pub use package::Package;

/// Width of the bytes frame header.
const LEN_BITS: u32 = 64;

/// Width of each dimension in the image frame header.
const DIM_BITS: u32 = 16;

/// Samples per pixel of a nested image.
const NESTED_CHANNELS: usize = 3;
