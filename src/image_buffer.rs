//! Rasters backed by [`image::ImageBuffer`].

use crate::{Error, Pixels, Raster, RasterMut};
use image::{ImageBuffer, Pixel, RgbImage};
use std::ops::{Deref, DerefMut};

impl<P, C> Raster for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    fn channels(&self) -> usize {
        P::CHANNEL_COUNT.into()
    }

    fn sample(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.get_pixel(col as u32, row as u32).channels()[channel]
    }
}

impl<P, C> RasterMut for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]> + DerefMut,
{
    fn set_sample(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        self.get_pixel_mut(col as u32, row as u32).channels_mut()[channel] = value;
    }
}

impl TryFrom<RgbImage> for Pixels {
    type Error = Error;

    fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        let (width, height) = (width as usize, height as usize);

        // The container may be longer than the pixels it describes.
        let mut data = image.into_raw();
        data.truncate(width * height * 3);

        Pixels::from_raw(width, height, 3, data)
    }
}

impl TryFrom<Pixels> for RgbImage {
    type Error = Error;

    fn try_from(pixels: Pixels) -> Result<Self, Self::Error> {
        let (width, height, channels) = pixels.dimensions();

        if channels != 3 {
            return Err(Error::UnsupportedChannels(channels));
        }

        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(Error::DimensionOverflow { width, height });
        };

        let len = pixels.as_raw().len();
        RgbImage::from_raw(w, h, pixels.into_raw()).ok_or(Error::DimensionMismatch {
            width,
            height,
            channels,
            len,
        })
    }
}
