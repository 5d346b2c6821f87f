use std::path::{Path, PathBuf};

use anyhow::Context;
use image::imageops::FilterType;
use image::{ImageReader, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;
use walkdir::WalkDir;

use crate::sheet::SheetConfig;

/// A decoded icon ready to be packed.
pub struct Sprite {
    /// Source file name, for logging.
    pub file_name: String,
    /// CSS class derived from the file stem.
    pub class: String,
    pub image: RgbaImage,
}

/// Image files directly inside `dir`, sorted by file name.
pub fn gather_paths(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let mut list = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("scan {}", dir.display()))?;
        let p = entry.path();
        if entry.file_type().is_file() && is_image(p) {
            list.push(p.to_path_buf());
        }
    }
    Ok(list)
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif")
    )
}

/// Decodes every path, resizing when the sheet asks for a fixed sprite size.
/// Files that fail to decode are logged and skipped.
pub fn load_sprites(paths: &[PathBuf], sheet: &SheetConfig, progress: bool) -> Vec<Sprite> {
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        ) {
            b.set_style(style);
        }
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let file_name = p
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(b) = &bar {
            b.set_message(file_name.clone());
        }
        match load_image(p, sheet.sprite_size) {
            Ok(image) => {
                let stem = p
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                list.push(Sprite {
                    class: sheet.class_name(&stem),
                    file_name,
                    image,
                });
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    list
}

fn load_image(p: &Path, sprite_size: u32) -> anyhow::Result<RgbaImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    let img = if sprite_size > 0 {
        img.resize_exact(sprite_size, sprite_size, FilterType::Lanczos3)
    } else {
        img
    };
    Ok(img.to_rgba8())
}
