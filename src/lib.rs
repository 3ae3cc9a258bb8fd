//! # planesteg
//!
//! The **planesteg** library hides byte payloads and small images in the
//! bit-planes of pixel rasters, and recovers them again.
//!
//! ## Bit-plane implementation
//!
//! The [`planar`] module spreads a framed payload over the least significant
//! bits of every sample first, moving to more significant bit-planes only when
//! the lower ones are full. See its [documentation][`planar`] for the layout.
//!
//! Decoding and encoding image files is left to the caller: anything that
//! implements [`Raster`] (or [`RasterMut`] for concealing) can be used as a
//! carrier. [`Pixels`] is a plain owned raster, and the `image` feature adds
//! implementations for [`image::ImageBuffer`](https://docs.rs/image).
//!
//! This is capacity-based hiding, not encryption: anyone who knows the layout
//! can read the payload back.
//!
//! ## Examples
//!
//! ```
//! use planesteg::Pixels;
//!
//! let mut cover = Pixels::new(10, 10, 3);
//!
//! planesteg::encode_bytes(&mut cover, b"hi")?;
//! assert_eq!(planesteg::decode_bytes(&cover)?, b"hi");
//! # Ok::<(), planesteg::Error>(())
//! ```

mod error;
#[cfg(feature = "image")]
mod image_buffer;
mod limits;
mod payload;
pub mod planar;
mod raster;

pub use error::{Error, Result};
pub use limits::Limits;
pub use payload::{Payload, Shape};
pub use raster::{Pixels, Raster, RasterMut, PLANES};

/// A trait for objects able to conceal steganographic messages, or carriers.
///
/// Carriers are defined by a single required method, [`conceal`][Conceal::conceal],
/// which hides the payload in the given cover raster.
///
/// # Examples
///
/// [`planar::Carrier`] can be used to conceal secret messages in bit-planes.
pub trait Conceal {
    /// Conceals the payload in the given cover and returns how many bits were written in total.
    ///
    /// # Errors
    ///
    /// Implementations should return [`Error::InsufficientCapacity`] without
    /// modifying `cover` if the payload cannot fit entirely.
    fn conceal<R: RasterMut + ?Sized>(self, cover: &mut R) -> Result<u64>;
}

/// A trait for objects able to reveal steganographic messages, or packages.
///
/// Packages are defined by a single required method, [`reveal`][Reveal::reveal],
/// which recovers the hidden message from a raster.
///
/// # Examples
///
/// [`planar::Package`] can be used to reveal secret messages hidden in bit-planes.
pub trait Reveal {
    /// The message recovered by [`reveal`][Reveal::reveal].
    type Output;

    /// Recovers the hidden message from `package`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousHeader`] if `package` does not appear to hold a
    /// message the implementation understands.
    fn reveal<R: Raster + ?Sized>(self, package: &R) -> Result<Self::Output>;
}

/// Conceals an opaque byte payload in `cover` behind a 64-bit length header.
///
/// Returns the number of bits written.
///
/// # Errors
///
/// Returns [`Error::InsufficientCapacity`], leaving `cover` untouched, if
/// `payload.len() * 8 + 64` exceeds the capacity of `cover`.
pub fn encode_bytes<R: RasterMut + ?Sized>(cover: &mut R, payload: &[u8]) -> Result<u64> {
    planar::Carrier::bytes(payload).conceal(cover)
}

/// Reveals a byte payload concealed with [`encode_bytes`], using the default [`Limits`].
///
/// # Errors
///
/// Returns [`Error::AmbiguousHeader`] if the length header is not plausible, in
/// which case the raster may hold an image instead.
pub fn decode_bytes<R: Raster + ?Sized>(package: &R) -> Result<Vec<u8>> {
    planar::Package::new().reveal_bytes(package)
}

/// Conceals a 3-channel image in `cover` behind 16-bit row and column count headers.
///
/// Returns the number of bits written.
///
/// # Errors
///
/// Returns [`Error::InsufficientCapacity`], leaving `cover` untouched, if the
/// image does not fit, [`Error::UnsupportedChannels`] if it does not have
/// 3 channels, and [`Error::DimensionOverflow`] if a dimension exceeds 16 bits.
pub fn encode_image<R: RasterMut + ?Sized>(cover: &mut R, image: &Pixels) -> Result<u64> {
    planar::Carrier::image(image).conceal(cover)
}

/// Reveals an image concealed with [`encode_image`], using the default [`Limits`].
///
/// # Errors
///
/// Returns [`Error::AmbiguousHeader`] if the dimension header is not plausible.
pub fn decode_image<R: Raster + ?Sized>(package: &R) -> Result<Pixels> {
    planar::Package::new().reveal_image(package)
}
