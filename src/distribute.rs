//! Resizes one source bitmap to the standard app icon sizes and copies
//! selected results to the places the packaging step and website read them
//! from.

use crate::png::save_png;
use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage, RgbImage};
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs::{self, create_dir_all},
    path::{Component, Path, PathBuf},
};

const DEFAULT_PLAN: &str = r#"
{
  "source": "kael-dragon-icon.jpeg",
  "output_dir": "assets/generated/png/app-icons",
  "file_name": "icon-{size}.png",
  "sizes": [16, 32, 48, 64, 128, 256, 512, 1024],
  "copies": [
    { "size": 512, "dest": "src-tauri/icons/icon.png" },
    { "size": 1024, "dest": "website/images/kael-dragon-1024.png" },
    { "size": 128, "dest": "assets/generated/png/app-icons/kael-os.png" }
  ]
}
"#;

/// Where resized icons go and which of them get copied elsewhere.
/// All relative paths are resolved against the root passed to
/// [`resize_and_distribute`].
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionPlan {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// File name of each resized icon; `{size}` is replaced with the edge length.
    pub file_name: String,
    pub sizes: Vec<u32>,
    #[serde(default)]
    pub copies: Vec<CopyTarget>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopyTarget {
    pub size: u32,
    pub dest: PathBuf,
}

#[derive(Debug, Default)]
pub struct DistributionReport {
    /// (size, path, file length in bytes) of every resized icon.
    pub resized: Vec<(u32, PathBuf, u64)>,
    pub copied: Vec<PathBuf>,
}

impl Default for DistributionPlan {
    fn default() -> Self {
        serde_json::from_str(DEFAULT_PLAN).expect("embedded distribution plan is valid JSON")
    }
}

impl DistributionPlan {
    /// Load a plan from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan {}", path.display()))?;
        let plan: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse plan {}", path.display()))?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            anyhow::bail!("Distribution plan lists no sizes");
        }
        if self.sizes.contains(&0) {
            anyhow::bail!("Icon sizes must be greater than zero");
        }
        if self.sizes.len() > 1 && !self.file_name.contains("{size}") {
            anyhow::bail!(
                "File name '{}' must contain {{size}} when more than one size is planned",
                self.file_name
            );
        }

        let planned: HashSet<u32> = self.sizes.iter().copied().collect();
        let outputs: HashSet<PathBuf> = self
            .sizes
            .iter()
            .map(|&size| lexical(&self.output_path(Path::new(""), size)))
            .collect();
        for copy in &self.copies {
            if !planned.contains(&copy.size) {
                anyhow::bail!(
                    "Copy to {} references size {} which is not in the plan",
                    copy.dest.display(),
                    copy.size
                );
            }
            // A copy landing on a resized icon would clobber it.
            if outputs.contains(&lexical(&copy.dest)) {
                anyhow::bail!(
                    "Copy destination {} overwrites a resized icon",
                    copy.dest.display()
                );
            }
        }
        Ok(())
    }

    /// Path of the resized icon for `size`.
    pub fn output_path(&self, root: &Path, size: u32) -> PathBuf {
        root.join(&self.output_dir)
            .join(self.file_name.replace("{size}", &size.to_string()))
    }
}

/// `path` without `.` components, for comparing plan entries.
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Whether `a` and `b` name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Decode the source image and drop any alpha channel or palette.
pub fn load_source(path: &Path) -> Result<RgbImage> {
    let source = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;
    log::debug!("Loaded {} as {:?}", path.display(), source.color());
    Ok(source.to_rgb8())
}

/// Resize `source` to every planned size, then perform the planned copies.
///
/// Stops at the first failure; files written before it are left in place.
pub fn resize_and_distribute(
    root: &Path,
    source: &Path,
    plan: &DistributionPlan,
) -> Result<DistributionReport> {
    plan.validate()?;
    let img = load_source(&root.join(source))?;

    let out_dir = root.join(&plan.output_dir);
    create_dir_all(&out_dir)
        .with_context(|| format!("Can't create output directory {}", out_dir.display()))?;

    let mut report = DistributionReport::default();

    println!("Resizing icon to all required sizes...");
    for &size in &plan.sizes {
        let resized = image::imageops::resize(&img, size, size, FilterType::Lanczos3);
        let path = plan.output_path(root, size);
        save_png(&DynamicImage::ImageRgb8(resized), &path)?;

        let bytes = fs::metadata(&path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        println!("  ✓ {} ({:.1} KB)", path.display(), bytes as f64 / 1024.0);
        report.resized.push((size, path, bytes));
    }

    if !plan.copies.is_empty() {
        println!("Copying icons to their destinations...");
    }
    for copy in &plan.copies {
        let from = plan.output_path(root, copy.size);
        let to = root.join(&copy.dest);
        if from == to || same_file(&from, &to) {
            anyhow::bail!("{} and {} are the same file", from.display(), to.display());
        }
        if let Some(parent) = to.parent() {
            create_dir_all(parent)
                .with_context(|| format!("Can't create directory {}", parent.display()))?;
        }
        fs::copy(&from, &to).with_context(|| {
            format!("Failed to copy {} to {}", from.display(), to.display())
        })?;
        println!("  ✓ {}", to.display());
        report.copied.push(to);
    }

    log::info!(
        "Wrote {} resized icons and {} copies",
        report.resized.len(),
        report.copied.len()
    );
    Ok(report)
}
