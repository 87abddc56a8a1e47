/// PNG previews of accepted textures

use crate::rendering::RasterBuffer;
use crate::{Error, Result};
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// An accepted texture re-encoded for display surfaces.
#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Preview {
    /// Encode a raster as PNG.
    pub fn from_raster(raster: &RasterBuffer) -> Result<Self> {
        let img = RgbaImage::from_raw(raster.width, raster.height, raster.data.clone())
            .ok_or_else(|| Error::ConfigError("raster buffer size mismatch".into()))?;

        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .map_err(|e| Error::Serialization(format!("PNG encode failed: {}", e)))?;

        Ok(Self {
            width: raster.width,
            height: raster.height,
            png_data,
        })
    }

    /// `data:image/png;base64,...` URI, usable directly as an `<img>` source.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::decode;

    #[test]
    fn preview_png_decodes_back_to_same_pixels() {
        let mut r = RasterBuffer::transparent(16, 16);
        r.set_pixel(5, 7, [10, 20, 30, 255]);
        let p = Preview::from_raster(&r).unwrap();
        assert_eq!((p.width, p.height), (16, 16));

        let back = RasterBuffer::from_image(&decode(&p.png_data).unwrap());
        assert_eq!(back, r);
    }

    #[test]
    fn data_uri_has_png_prefix() {
        let p = Preview::from_raster(&RasterBuffer::transparent(2, 2)).unwrap();
        assert!(p.data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
