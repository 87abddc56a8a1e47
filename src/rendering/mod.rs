//! Rendering module: decoding textures into an offscreen RGBA raster and
//! producing display previews of accepted imports.

pub mod preview;
pub mod raster;

pub use preview::Preview;
pub use raster::{decode, RasterBuffer};
