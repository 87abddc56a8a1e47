/// Offscreen RGBA raster for decoded textures

use crate::{Error, Result};
use image::{DynamicImage, GenericImageView};
use log::debug;

/// Decode an image file's bytes. Any format the `image` crate was built
/// with is accepted; the size check happens later, on the raster.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::DecodeError(e.to_string()))?;
    let (w, h) = img.dimensions();
    debug!("decoded {} bytes into a {}x{} image", bytes.len(), w, h);
    Ok(img)
}

/// Row-major RGBA8 pixel buffer, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterBuffer {
    /// Draw a decoded image into a fresh RGBA8 buffer.
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            data: rgba.into_raw(),
        }
    }

    /// Wrap raw RGBA bytes. `data` must hold exactly `width * height * 4`
    /// bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::ConfigError(format!(
                "raster of {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// A fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// RGBA channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Iterate scan lines top to bottom; each yields its RGBA quads left to
    /// right.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width.max(1) as usize * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_rejects_short_buffer() {
        let err = RasterBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn set_and_read_pixel() {
        let mut r = RasterBuffer::transparent(4, 3);
        r.set_pixel(3, 2, [1, 2, 3, 4]);
        assert_eq!(r.pixel(3, 2), [1, 2, 3, 4]);
        assert_eq!(r.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(r.rows().count(), 3);
    }

    #[test]
    #[should_panic]
    fn pixel_outside_buffer_panics() {
        RasterBuffer::transparent(2, 2).pixel(2, 1);
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::DecodeError(_)));
    }

    #[test]
    fn from_image_keeps_dimensions() {
        let img = DynamicImage::new_rgba8(16, 8);
        let r = RasterBuffer::from_image(&img);
        assert_eq!((r.width, r.height), (16, 8));
        assert_eq!(r.data.len(), 16 * 8 * 4);
    }
}
