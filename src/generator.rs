use anyhow::{Context, Result, bail};
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::icon_spec::IconSpec;
use crate::render::{composite_padded, SvgSource};

/// One written icon, as reported back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedIcon {
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Renders the configured icon table from a single SVG into an output directory.
pub struct IconGenerator {
    source: SvgSource,
    out_dir: PathBuf,
    background: [u8; 4],
    quiet: bool,
}

impl IconGenerator {
    /// Fails before touching the output directory if the source file is missing.
    pub fn new(source_path: &Path, out_dir: &Path, background: [u8; 4]) -> Result<Self> {
        if !source_path.exists() {
            bail!("Source SVG not found: {}", source_path.display());
        }

        let source = SvgSource::load(source_path)?;

        Ok(IconGenerator {
            source,
            out_dir: out_dir.to_path_buf(),
            background,
            quiet: false,
        })
    }

    pub fn from_config(config: &Config, source_path: &Path, out_dir: &Path) -> Result<Self> {
        Self::new(source_path, out_dir, config.background)
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn source(&self) -> &SvgSource {
        &self.source
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render, composite and write a single icon, overwriting any previous file
    pub fn generate(&self, spec: &IconSpec) -> Result<GeneratedIcon> {
        if !self.quiet {
            println!("📱 Creating {} ({}x{})...", spec.name, spec.size, spec.size);
        }

        let artwork = self.source.render(spec.inner_size())?;

        let final_img = if spec.is_padded() {
            composite_padded(&artwork, spec.size, spec.offset(), self.background)
        } else {
            artwork
        };

        let path = self.out_dir.join(&spec.name);
        final_img
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if !self.quiet {
            println!("✅ Created {}", spec.name);
        }

        Ok(GeneratedIcon {
            name: spec.name.clone(),
            path,
            width: final_img.width(),
            height: final_img.height(),
        })
    }

    /// Generate every icon in order, stopping at the first failure
    pub fn generate_all(&self, specs: &[IconSpec]) -> Result<Vec<GeneratedIcon>> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Failed to create output directory {}", self.out_dir.display())
        })?;

        specs.iter().map(|spec| self.generate(spec)).collect()
    }
}

/// File sizes of the generated icons, re-read from disk.
/// Icons whose file has gone missing are left out.
pub fn summarize(icons: &[GeneratedIcon]) -> Vec<(String, u64)> {
    icons
        .iter()
        .filter_map(|icon| {
            fs::metadata(&icon.path)
                .ok()
                .map(|meta| (icon.name.clone(), meta.len()))
        })
        .collect()
}

pub fn format_summary_line(name: &str, bytes: u64) -> String {
    format!("   {} - {:.1} KB", name, bytes as f64 / 1024.0)
}
