use serde::{Deserialize, Serialize};

use crate::constants::icons::DEFAULT_ICONS;

/// One raster output: a square PNG of `size` pixels, written as `name`.
///
/// `padding` is the fraction of the edge kept as border on each side. A padded icon
/// gets its artwork shrunk to [`IconSpec::inner_size`] and centred on a solid canvas.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IconSpec {
    pub name: String,
    pub size: u32,
    #[serde(default)]
    pub padding: f64,
}

impl IconSpec {
    pub fn new(name: impl Into<String>, size: u32, padding: f64) -> Self {
        IconSpec {
            name: name.into(),
            size,
            padding,
        }
    }

    /// The built-in table, in generation order
    pub fn defaults() -> Vec<IconSpec> {
        DEFAULT_ICONS
            .iter()
            .map(|&(name, size, padding)| IconSpec::new(name, size, padding))
            .collect()
    }

    pub fn is_padded(&self) -> bool {
        self.padding > 0.0
    }

    /// Edge length of the rendered artwork: floor(size * (1 - 2 * padding))
    pub fn inner_size(&self) -> u32 {
        (self.size as f64 * (1.0 - 2.0 * self.padding)).floor() as u32
    }

    /// Distance from the canvas edge to the artwork: floor(size * padding)
    pub fn offset(&self) -> u32 {
        (self.size as f64 * self.padding).floor() as u32
    }
}
