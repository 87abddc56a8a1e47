//! Item descriptors: the exported record of an imported texture.
//!
//! A descriptor carries four header fields and a sparse pixel map holding
//! only the non-zero packed values, keyed by flat row-major index. The YAML
//! rendering is line-oriented and written by hand so the output matches the
//! format the item loader expects byte for byte:
//!
//! ```text
//! id: ruby_block
//! name: Ruby Block
//! category: blocks
//! material: stone
//! pixels:
//!   '0': 16711680
//! ```

use crate::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

/// On-disk rendering of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yml",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {s}. Valid formats are: yaml, json")),
        }
    }
}

/// User-entered header fields, as typed (untrimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorFields {
    pub id: String,
    pub name: String,
    pub category: String,
    pub material: String,
}

impl DescriptorFields {
    /// Labels of required fields that are empty after trimming, in form
    /// order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("ID", &self.id),
            ("Name", &self.name),
            ("Material", &self.material),
            ("Category", &self.category),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// Exported item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub id: String,
    pub name: String,
    pub category: String,
    pub material: String,
    /// Flat index to packed colour; zero values never appear.
    pub pixels: BTreeMap<usize, u32>,
}

impl Descriptor {
    /// Build a descriptor from form fields and a flat packed pixel list.
    pub fn build(fields: &DescriptorFields, pixels: &[u32]) -> Result<Self> {
        let missing = fields.missing();
        if !missing.is_empty() {
            warn!("export refused, missing fields: {:?}", missing);
            return Err(Error::MissingFields(missing));
        }

        let line = |label: &str, value: &str| -> Result<String> {
            let value = value.trim();
            if value.contains(['\n', '\r']) {
                return Err(Error::ConfigError(format!("{} must be a single line", label)));
            }
            Ok(value.to_string())
        };

        let descriptor = Self {
            id: line("ID", &fields.id)?,
            name: line("Name", &fields.name)?,
            category: line("Category", &fields.category)?,
            material: line("Material", &fields.material)?,
            pixels: sparse_pixels(pixels),
        };
        debug!(
            "built descriptor '{}' with {} pixel entries",
            descriptor.id,
            descriptor.pixels.len()
        );
        Ok(descriptor)
    }

    pub fn to_yaml(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "id: {}", self.id);
        let _ = writeln!(out, "name: {}", self.name);
        let _ = writeln!(out, "category: {}", self.category);
        let _ = writeln!(out, "material: {}", self.material);
        out.push_str("pixels:\n");
        for (index, value) in &self.pixels {
            let _ = writeln!(out, "  '{}': {}", index, value);
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Yaml => Ok(self.to_yaml()),
            OutputFormat::Json => self.to_json(),
        }
    }

    /// `<id>.yml` or `<id>.json`
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.id, format.extension())
    }
}

/// Keep only non-zero packed values, keyed by flat index.
pub fn sparse_pixels(pixels: &[u32]) -> BTreeMap<usize, u32> {
    pixels
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v != 0)
        .map(|(i, &v)| (i, v))
        .collect()
}
