use crate::Shape;
use thiserror::Error;

/// Errors that can occur while concealing or revealing a payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The payload cannot fit in the carrier. Nothing was written.
    #[error("payload needs {required} bits, but the carrier holds only {available}")]
    InsufficientCapacity { required: u64, available: u64 },

    /// A cursor was advanced past the last cell of the highest bit-plane.
    #[error("no bit slot remaining: every bit-plane of the raster is used")]
    CapacityExhausted,

    /// The frame header did not pass the plausibility filter.
    ///
    /// This is not a hard failure: the carrier may hold the other payload
    /// shape, or nothing at all.
    #[error("{shape} header value {value} is not plausible")]
    AmbiguousHeader { shape: Shape, value: u64 },

    /// A raw sample buffer does not match the declared dimensions.
    #[error("buffer of {len} samples does not match a {width}x{height}x{channels} raster")]
    DimensionMismatch {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },

    /// A nested image is too large for its 16-bit dimension header.
    #[error("nested image of {width}x{height} does not fit a 16-bit header")]
    DimensionOverflow { width: usize, height: usize },

    /// Nested images always carry exactly three channels.
    #[error("nested image must have 3 channels, found {0}")]
    UnsupportedChannels(usize),
}

impl Error {
    /// Returns `true` if this is the non-fatal [`Error::AmbiguousHeader`] outcome.
    #[must_use]
    pub fn is_ambiguous_header(&self) -> bool {
        matches!(self, Self::AmbiguousHeader { .. })
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
