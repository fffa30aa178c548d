//! Block texture files.

use crate::error::{EditorError, Result};
use image::ImageFormat;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Check that `path` points at an existing PNG image.
///
/// The extension must be `.png` and the file header must sniff as PNG.
pub fn validate_png<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = || EditorError::InvalidImagePath(path.to_path_buf());

    let has_png_extension = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !has_png_extension || !path.is_file() {
        return Err(invalid());
    }

    let mut header = [0u8; 16];
    let read = File::open(path)
        .and_then(|mut file| file.read(&mut header))
        .map_err(|_| invalid())?;

    match image::guess_format(&header[..read]) {
        Ok(ImageFormat::Png) => Ok(()),
        _ => Err(invalid()),
    }
}

/// Pixel size of a texture, if it can be read.
pub fn texture_dimensions<P: AsRef<Path>>(path: P) -> Option<(u32, u32)> {
    image::image_dimensions(path).ok()
}

/// Numeric part of a variant file stem.
/// "3" -> 3, "3_m" -> 3, "stone" -> None
pub fn parse_variant_index(stem: &str) -> Option<u32> {
    stem.strip_suffix("_m").unwrap_or(stem).parse().ok()
}

/// Highest variant index among the files in `dir` with the given extension.
///
/// A missing directory has no indices.
pub fn max_variant_index(dir: &Path, extension: &str) -> Result<Option<u32>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut max = None;
    for entry in entries {
        let path = entry?.path();

        if path.extension().map(|e| e == extension).unwrap_or(false) {
            let index = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(parse_variant_index);
            max = max.max(index);
        }
    }

    Ok(max)
}
