use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A parsed SVG, ready to be rasterized at any edge length.
pub struct SvgSource {
    path: PathBuf,
    tree: usvg::Tree,
}

impl SvgSource {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut opt = usvg::Options::default();
        // Relative <image> hrefs resolve next to the SVG itself
        opt.resources_dir = path.parent().map(Path::to_path_buf);
        Arc::make_mut(&mut opt.fontdb).load_system_fonts();

        let tree = usvg::Tree::from_data(&data, &opt)
            .with_context(|| format!("Failed to parse SVG {}", path.display()))?;

        Ok(SvgSource {
            path: path.to_path_buf(),
            tree,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Intrinsic width and height from the SVG's viewport
    pub fn dimensions(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }

    /// Render onto a transparent `edge × edge` raster, scaled uniformly and centred
    pub fn render(&self, edge: u32) -> Result<RgbaImage> {
        let mut pixmap = tiny_skia::Pixmap::new(edge, edge)
            .with_context(|| format!("Failed to create {edge}x{edge} pixmap"))?;

        let (svg_w, svg_h) = self.dimensions();
        let scale = (edge as f32 / svg_w).min(edge as f32 / svg_h);
        let offset_x = (edge as f32 - svg_w * scale) / 2.0;
        let offset_y = (edge as f32 - svg_h * scale) / 2.0;

        let transform = tiny_skia::Transform::from_translate(offset_x, offset_y)
            .pre_scale(scale, scale);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        Ok(pixmap_to_image(&pixmap))
    }
}

/// tiny-skia keeps premultiplied alpha, `image` expects straight alpha
fn pixmap_to_image(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

/// Paste `artwork` at (`offset`, `offset`) on a solid `size × size` canvas.
///
/// The artwork's alpha acts as the paste mask: fully transparent pixels leave the
/// background showing, opaque pixels replace it. Partial alpha mixes every channel,
/// alpha included, as `src * m + dst * (1 - m)`.
pub fn composite_padded(artwork: &RgbaImage, size: u32, offset: u32, background: [u8; 4]) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba(background));
    for (x, y, src) in artwork.enumerate_pixels() {
        let (cx, cy) = (x + offset, y + offset);
        if cx >= size || cy >= size {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        *dst = paste_masked(*dst, *src, src.0[3]);
    }
    canvas
}

/// `(src * m + dst * (255 - m) + 127) / 255` on all four channels
fn paste_masked(dst: Rgba<u8>, src: Rgba<u8>, mask: u8) -> Rgba<u8> {
    let m = mask as u32;
    let mut out = [0u8; 4];
    for (c, channel) in out.iter_mut().enumerate() {
        let mixed = src.0[c] as u32 * m + dst.0[c] as u32 * (255 - m) + 127;
        *channel = (mixed / 255) as u8;
    }
    Rgba(out)
}
