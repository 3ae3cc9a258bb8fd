use crate::Pixels;
use std::fmt;

/// The two framed payload formats a carrier can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Shape {
    /// A 64-bit length followed by opaque bytes.
    Bytes,
    /// Two 16-bit dimensions followed by a 3-channel pixel grid.
    Image,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bytes => "bytes",
            Self::Image => "image",
        })
    }
}

/// A payload recovered from (or to be hidden in) a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Opaque bytes.
    Bytes(Vec<u8>),
    /// A nested 3-channel image.
    Image(Pixels),
}

impl Payload {
    /// Returns the frame shape this payload is stored in.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Bytes(_) => Shape::Bytes,
            Self::Image(_) => Shape::Image,
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Pixels> for Payload {
    fn from(image: Pixels) -> Self {
        Self::Image(image)
    }
}
