//! Pixel extraction: raster scan lines to hex palette rows and packed values.
//!
//! A pixel is either fully transparent, which is written as the sentinel `0`,
//! or an RGB triple written as `#rrggbb`. Partial alpha counts as opaque. The
//! packed form `r * 65536 + g * 256 + b` is what descriptors serialize; note
//! that opaque black packs to `0` as well and is therefore indistinguishable
//! from transparency once packed.

use crate::rendering::RasterBuffer;
use crate::{Error, ImportConfig, Result};
use log::debug;
use std::fmt;

/// Largest packed value (`#ffffff`).
pub const MAX_PACKED: u32 = 0xFF_FFFF;

/// A single texture pixel as seen by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    Transparent,
    Rgb(u8, u8, u8),
}

impl Pixel {
    pub fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        if a == 0 {
            Pixel::Transparent
        } else {
            Pixel::Rgb(r, g, b)
        }
    }

    pub fn packed(self) -> u32 {
        match self {
            Pixel::Transparent => 0,
            Pixel::Rgb(r, g, b) => pack(r, g, b),
        }
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pixel::Transparent => f.write_str("0"),
            Pixel::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// Combine channels as `r * 65536 + g * 256 + b`.
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) * 65536 + (g as u32) * 256 + b as u32
}

/// Split a packed value back into its channels.
pub fn unpack(value: u32) -> (u8, u8, u8) {
    ((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Parse a `#rrggbb` token into its channels.
pub fn parse_hex(token: &str) -> Option<(u8, u8, u8)> {
    let digits = token.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Packed value of a palette token: the sentinel `0` or a `#rrggbb` string.
pub fn pack_token(token: &str) -> Option<u32> {
    if token == "0" {
        return Some(0);
    }
    parse_hex(token).map(|(r, g, b)| pack(r, g, b))
}

/// One horizontal scan line of the texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRow {
    pub pixels: Vec<Pixel>,
}

impl PaletteRow {
    /// Comma-joined tokens, the text a user copies into the item editor.
    pub fn text(&self) -> String {
        self.pixels
            .iter()
            .map(Pixel::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<PaletteRow>,
    /// Row-major packed values, exactly `width * height` entries.
    pub pixels: Vec<u32>,
}

impl Extraction {
    pub fn row_texts(&self) -> Vec<String> {
        self.rows.iter().map(PaletteRow::text).collect()
    }

    /// Number of pixels that survive into a descriptor's sparse map.
    pub fn non_zero_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v != 0).count()
    }
}

/// Check that a decoded texture has the configured size.
pub fn validate_dimensions(width: u32, height: u32, config: &ImportConfig) -> Result<()> {
    if width != config.width || height != config.height {
        return Err(Error::DimensionMismatch {
            width,
            height,
            expected_width: config.width,
            expected_height: config.height,
        });
    }
    Ok(())
}

/// Scan a raster into palette rows and the flat packed list.
pub fn extract(raster: &RasterBuffer, config: &ImportConfig) -> Result<Extraction> {
    validate_dimensions(raster.width, raster.height, config)?;
    let expected = raster.width as usize * raster.height as usize * 4;
    if raster.data.len() != expected {
        return Err(Error::ConfigError(format!(
            "raster of {}x{} needs {} bytes, got {}",
            raster.width,
            raster.height,
            expected,
            raster.data.len()
        )));
    }

    let mut rows = Vec::with_capacity(raster.height as usize);
    let mut pixels = Vec::with_capacity(raster.width as usize * raster.height as usize);

    for line in raster.rows() {
        let row: Vec<Pixel> = line
            .chunks_exact(4)
            .map(|c| Pixel::from_rgba([c[0], c[1], c[2], c[3]]))
            .collect();
        pixels.extend(row.iter().map(|p| p.packed()));
        rows.push(PaletteRow { pixels: row });
    }

    debug!(
        "extracted {} rows, {} opaque-or-coloured pixels",
        rows.len(),
        pixels.iter().filter(|&&v| v != 0).count()
    );

    Ok(Extraction {
        width: raster.width,
        height: raster.height,
        rows,
        pixels,
    })
}
