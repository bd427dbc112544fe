use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    DynamicImage, ImageEncoder,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Encode `image` as PNG at `path` with the best compression. The parent
/// directory must already exist.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(image, &mut out).with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out.flush()?;
    Ok(())
}

fn write_png<W: Write>(image: &DynamicImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_bytes(), image.width(), image.height(), image.color())?;
    Ok(())
}
