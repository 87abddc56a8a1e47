//! Import session: the state behind the converter page.
//!
//! A `Session` owns everything the page used to keep in loose globals: the
//! last accepted texture, which row was copied last, which row is suggested
//! next, and the descriptor form fields. Every import starts by clearing the
//! previous texture and both row indicators; the form fields are kept so a
//! user can re-import without retyping them.

use crate::descriptor::{Descriptor, DescriptorFields};
use crate::palette::{Extraction, PaletteRow};
use crate::rendering::Preview;
use crate::{import_texture, ExportConfig, Error, ImportConfig, Result, Texture};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ImportConfig,
    texture: Option<Texture>,
    copied: Option<usize>,
    next: Option<usize>,
    last_error: Option<String>,
    generation: u64,
    /// Descriptor form fields
    pub fields: DescriptorFields,
}

impl Session {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Drop the current texture, row indicators and error message.
    pub fn reset(&mut self) {
        self.texture = None;
        self.copied = None;
        self.next = None;
        self.last_error = None;
    }

    /// Reset and hand out a ticket for a new import. Only the import holding
    /// the latest ticket may complete; older ones are discarded.
    pub fn begin_import(&mut self) -> u64 {
        self.reset();
        self.generation += 1;
        self.generation
    }

    /// Apply the outcome of the import started with `ticket`.
    pub fn finish_import(&mut self, ticket: u64, outcome: Result<Texture>) -> Result<&Extraction> {
        if ticket != self.generation {
            warn!(
                "discarding superseded import (ticket {}, current {})",
                ticket, self.generation
            );
            return Err(Error::Superseded);
        }

        match outcome {
            Ok(texture) => {
                info!(
                    "imported {}x{} texture, {} non-zero pixels",
                    texture.extraction.width,
                    texture.extraction.height,
                    texture.extraction.non_zero_count()
                );
                self.next = if texture.extraction.rows.is_empty() {
                    None
                } else {
                    Some(0)
                };
                let texture = self.texture.insert(texture);
                Ok(&texture.extraction)
            }
            Err(err) => {
                warn!("import failed: {}", err);
                if let Error::DecodeError(detail) = &err {
                    debug!("decoder said: {}", detail);
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Import a texture from raw file bytes.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<&Extraction> {
        let ticket = self.begin_import();
        let outcome = import_texture(bytes, &self.config);
        self.finish_import(ticket, outcome)
    }

    /// Import a texture from disk.
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&Extraction> {
        let ticket = self.begin_import();
        let outcome = std::fs::read(path.as_ref())
            .map_err(|e| Error::DecodeError(format!("{}: {}", path.as_ref().display(), e)))
            .and_then(|bytes| import_texture(&bytes, &self.config));
        self.finish_import(ticket, outcome)
    }

    pub fn extraction(&self) -> Option<&Extraction> {
        self.texture.as_ref().map(|t| &t.extraction)
    }

    pub fn rows(&self) -> &[PaletteRow] {
        self.extraction().map(|e| e.rows.as_slice()).unwrap_or(&[])
    }

    pub fn row_texts(&self) -> Vec<String> {
        self.extraction().map(Extraction::row_texts).unwrap_or_default()
    }

    /// Message of the last failed import, cleared by the next import.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Copy a row: returns its text, marks it as the only copied row and
    /// moves the "next" suggestion to the row below (or clears it after the
    /// last row).
    pub fn copy_row(&mut self, row: usize) -> Result<String> {
        let rows = self.rows();
        let text = rows
            .get(row)
            .map(PaletteRow::text)
            .ok_or(Error::RowOutOfRange {
                row,
                rows: rows.len(),
            })?;
        let count = rows.len();

        self.copied = Some(row);
        self.next = Some(row + 1).filter(|&n| n < count);
        Ok(text)
    }

    pub fn copied_row(&self) -> Option<usize> {
        self.copied
    }

    pub fn next_row(&self) -> Option<usize> {
        self.next
    }

    /// True when a texture is loaded and the ID, name, material and category
    /// fields are filled in.
    pub fn can_export(&self) -> bool {
        self.texture.is_some() && self.fields.is_complete()
    }

    /// Build the descriptor for the current texture and form fields.
    pub fn export(&self) -> Result<Descriptor> {
        let texture = self.texture.as_ref().ok_or_else(|| {
            warn!("export refused, no texture imported");
            Error::NoTexture
        })?;
        Descriptor::build(&self.fields, &texture.extraction.pixels)
    }

    /// Export and write `<id>.<ext>` into the configured directory.
    pub fn export_to(&self, config: &ExportConfig) -> Result<PathBuf> {
        let descriptor = self.export()?;
        if descriptor.id.contains(['/', '\\']) || descriptor.id == "." || descriptor.id == ".." {
            return Err(Error::ConfigError(format!(
                "ID '{}' cannot be used as a file name",
                descriptor.id
            )));
        }

        let path = config.out_dir.join(descriptor.file_name(config.format));
        std::fs::write(&path, descriptor.render(config.format)?)?;
        info!("wrote {}", path.display());
        Ok(path)
    }

    /// PNG preview of the current texture, if any.
    pub fn preview(&self) -> Result<Option<Preview>> {
        self.texture.as_ref().map(Texture::preview).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::extract;
    use crate::rendering::RasterBuffer;

    fn texture_with(f: impl FnOnce(&mut RasterBuffer)) -> Texture {
        let mut raster = RasterBuffer::transparent(16, 16);
        f(&mut raster);
        let extraction = extract(&raster, &ImportConfig::default()).unwrap();
        Texture { raster, extraction }
    }

    fn loaded() -> Session {
        let mut s = Session::new(ImportConfig::default());
        let t = s.begin_import();
        s.finish_import(t, Ok(texture_with(|_| {}))).unwrap();
        s
    }

    fn filled(s: &mut Session) {
        s.fields = DescriptorFields {
            id: "ruby".into(),
            name: "Ruby".into(),
            category: "gems".into(),
            material: "crystal".into(),
        };
    }

    #[test]
    fn import_points_next_at_first_row() {
        let s = loaded();
        assert_eq!(s.rows().len(), 16);
        assert_eq!(s.next_row(), Some(0));
        assert_eq!(s.copied_row(), None);
    }

    #[test]
    fn copy_then_advance() {
        let mut s = loaded();
        let text = s.copy_row(4).unwrap();
        assert_eq!(text, vec!["0"; 16].join(", "));
        assert_eq!(s.copied_row(), Some(4));
        assert_eq!(s.next_row(), Some(5));

        s.copy_row(9).unwrap();
        assert_eq!(s.copied_row(), Some(9));
        assert_eq!(s.next_row(), Some(10));
    }

    #[test]
    fn copying_last_row_clears_next() {
        let mut s = loaded();
        s.copy_row(15).unwrap();
        assert_eq!(s.copied_row(), Some(15));
        assert_eq!(s.next_row(), None);
    }

    #[test]
    fn copy_out_of_range() {
        let mut s = loaded();
        s.copy_row(2).unwrap();
        assert!(matches!(
            s.copy_row(16),
            Err(Error::RowOutOfRange { row: 16, rows: 16 })
        ));
        assert_eq!(s.copied_row(), Some(2));

        let mut empty = Session::default();
        assert!(empty.copy_row(0).is_err());
    }

    #[test]
    fn failed_import_clears_previous_state() {
        let mut s = loaded();
        filled(&mut s);
        s.copy_row(3).unwrap();

        let err = s.import_bytes(b"garbage").unwrap_err();
        assert!(matches!(err, Error::DecodeError(_)));
        assert!(s.rows().is_empty());
        assert_eq!(s.copied_row(), None);
        assert_eq!(s.next_row(), None);
        assert_eq!(s.last_error(), Some("Error: could not load the image."));
        assert!(!s.can_export());
        // form fields survive a re-import
        assert_eq!(s.fields.id, "ruby");
    }

    #[test]
    fn export_gating() {
        let mut s = Session::default();
        filled(&mut s);
        assert!(!s.can_export());
        assert!(matches!(s.export(), Err(Error::NoTexture)));

        let mut s = loaded();
        assert!(!s.can_export());
        assert!(matches!(s.export(), Err(Error::MissingFields(_))));

        filled(&mut s);
        assert!(s.can_export());
        let d = s.export().unwrap();
        assert!(d.pixels.is_empty());
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut s = Session::default();
        let old = s.begin_import();
        let new = s.begin_import();

        let red = texture_with(|r| r.set_pixel(0, 0, [255, 0, 0, 255]));
        assert!(matches!(
            s.finish_import(old, Ok(red)),
            Err(Error::Superseded)
        ));
        assert!(s.extraction().is_none());

        s.finish_import(new, Ok(texture_with(|_| {}))).unwrap();
        assert_eq!(s.extraction().unwrap().non_zero_count(), 0);
    }

    #[test]
    fn export_to_rejects_path_like_ids() {
        let mut s = loaded();
        filled(&mut s);
        s.fields.id = "../escape".into();
        let cfg = ExportConfig::default();
        assert!(matches!(s.export_to(&cfg), Err(Error::ConfigError(_))));
    }

    #[test]
    fn preview_only_after_import() {
        assert!(Session::default().preview().unwrap().is_none());
        let p = loaded().preview().unwrap().unwrap();
        assert_eq!((p.width, p.height), (16, 16));
    }
}
