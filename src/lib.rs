//! NotEnoughMatter texture tools
//!
//! Converts 16x16 item textures into the palette rows pasted into the item
//! editor and into YAML item descriptors, and carries the small tab router
//! behind the relics wiki.
//!
//! # Features
//!
//! - **Extraction**: decode an image, check its size, scan it into `#rrggbb`
//!   rows and a flat list of packed colours
//! - **Descriptors**: sparse YAML (or JSON) export of the non-zero pixels
//! - **Session**: copy/next row indicators and export gating, independent of
//!   any UI
//! - **Async imports** (`async` feature, default): cancellable background
//!   decodes where a newer selection always wins
//!
//! # Example
//!
//! ```no_run
//! use nemtex::{DescriptorFields, ImportConfig, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(ImportConfig::default());
//! session.import_file("ruby.png")?;
//! for (i, row) in session.row_texts().iter().enumerate() {
//!     println!("{}. {}", i + 1, row);
//! }
//!
//! session.fields = DescriptorFields {
//!     id: "ruby".into(),
//!     name: "Ruby".into(),
//!     category: "gems".into(),
//!     material: "crystal".into(),
//! };
//! print!("{}", session.export()?.to_yaml());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod descriptor;
pub mod palette;
pub mod rendering;
pub mod router;
pub mod session;

// Cancellable background imports
#[cfg(feature = "async")]
pub mod async_api;

pub use descriptor::{Descriptor, DescriptorFields, OutputFormat};
pub use palette::{Extraction, PaletteRow, Pixel};
pub use rendering::{Preview, RasterBuffer};
pub use router::{Navigation, Page, TabRouter};
pub use session::Session;

#[cfg(feature = "async")]
pub use async_api::{ImportTask, Importer};

/// Import settings
///
/// Item textures are always 16x16; the size is configurable so other
/// atlases can reuse the extractor.
///
/// # Examples
///
/// ```
/// let cfg = nemtex::ImportConfig::default();
/// assert_eq!((cfg.width, cfg.height), (16, 16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Required texture width in pixels
    pub width: u32,
    /// Required texture height in pixels
    pub height: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
        }
    }
}

/// Export settings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Descriptor rendering
    pub format: OutputFormat,
    /// Directory the descriptor file is written into
    pub out_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Yaml,
            out_dir: PathBuf::from("."),
        }
    }
}

/// A decoded texture that passed the size check, with its extraction.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Decoded RGBA pixels
    pub raster: RasterBuffer,
    /// Palette rows and packed pixel list
    pub extraction: Extraction,
}

impl Texture {
    /// PNG re-encoding of the raster, for display.
    pub fn preview(&self) -> Result<Preview> {
        Preview::from_raster(&self.raster)
    }
}

/// Decode, validate and extract a texture from raw file bytes.
///
/// Nothing is produced unless every step succeeds.
pub fn import_texture(bytes: &[u8], config: &ImportConfig) -> Result<Texture> {
    let img = rendering::decode(bytes)?;
    {
        use image::GenericImageView;
        let (w, h) = img.dimensions();
        palette::validate_dimensions(w, h, config)?;
    }
    let raster = RasterBuffer::from_image(&img);
    let extraction = palette::extract(&raster, config)?;
    Ok(Texture { raster, extraction })
}
