//! Procedurally drawn application icon: a dark radial gradient, two rings
//! and a stylized "K" glyph.

use crate::draw::{fill_rect, fill_triangle, lerp_rgb, stroke_ellipse, Rgb};
use crate::png::save_png;
use anyhow::{anyhow, Result};
use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

/// Edge length of the rendered canvas.
pub const CANVAS_SIZE: u32 = 256;

/// File name and edge length of every emitted variant, in write order.
pub const ICON_VARIANTS: [(&str, u32); 4] = [
    ("icon.png", 256),
    ("128x128@2x.png", 256),
    ("128x128.png", 128),
    ("32x32.png", 32),
];

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "src-tauri/icons";

/// Palette used to paint the icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle {
    /// Gradient color at the center of the canvas (#1c162b).
    pub center: Rgb,
    /// Gradient color from the inscribed circle outwards (#0b0816).
    pub edge: Rgb,
    pub outer_ring: Rgba<u8>,
    /// Semi-transparent; composited over the gradient.
    pub inner_ring: Rgba<u8>,
    pub glyph: Rgba<u8>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            center: Rgb(28, 22, 43),
            edge: Rgb(11, 8, 22),
            outer_ring: Rgba([224, 64, 251, 255]),
            inner_ring: Rgba([122, 238, 190, 200]),
            glyph: Rgba([255, 204, 0, 255]),
        }
    }
}

/// Parse a CSS color (`#fff`, `rebeccapurple`, `rgb(...)`) into an opaque [`Rgb`].
pub fn parse_css_color(color: &str) -> Result<Rgb> {
    let parsed = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid CSS color: {}", color))?;
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.).round() as u8;
    Ok(Rgb(
        channel(parsed.red),
        channel(parsed.green),
        channel(parsed.blue),
    ))
}

/// Paint the icon at [`CANVAS_SIZE`]. Every pixel of the result is opaque.
pub fn render_icon(style: &IconStyle) -> RgbaImage {
    let size = CANVAS_SIZE;
    let center = (size / 2) as f32;

    let mut img = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let distance = ((dx * dx + dy * dy).sqrt() / center).min(1.0);
        lerp_rgb(style.center, style.edge, distance).opaque()
    });

    let s = size as i64;
    stroke_ellipse(&mut img, 10, 10, s - 10, s - 10, 4, style.outer_ring);
    stroke_ellipse(&mut img, 20, 20, s - 20, s - 20, 2, style.inner_ring);

    // "K": stem, upper arm, lower arm
    fill_rect(&mut img, 100, 70, 115, 190, style.glyph);
    fill_triangle(&mut img, [(115, 70), (160, 110), (145, 125)], style.glyph);
    fill_triangle(&mut img, [(115, 130), (160, 180), (145, 195)], style.glyph);

    img
}

/// Render the icon and write every entry of [`ICON_VARIANTS`] into `out_dir`.
///
/// `out_dir` is not created; writing into a missing directory fails on the
/// first file.
pub fn generate_gradient_icons(out_dir: &Path, style: &IconStyle) -> Result<Vec<PathBuf>> {
    println!("Generating gradient icon...");
    let icon = DynamicImage::ImageRgba8(render_icon(style));
    log::debug!("Rendered {}x{} icon with {:?}", CANVAS_SIZE, CANVAS_SIZE, style);

    let mut written = Vec::with_capacity(ICON_VARIANTS.len());
    for (filename, size) in ICON_VARIANTS {
        let path = out_dir.join(filename);
        if size == CANVAS_SIZE {
            save_png(&icon, &path)?;
        } else {
            let resized = icon.resize_exact(size, size, FilterType::Lanczos3);
            save_png(&resized, &path)?;
        }
        println!("  ✓ Created {} ({size}x{size})", path.display());
        written.push(path);
    }

    println!("✓ Icon files created successfully");
    Ok(written)
}
