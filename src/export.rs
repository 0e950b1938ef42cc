//! PNG export
//!
//! Writes the base canvas and one Lanczos-resampled copy per export size.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::{IconError, Result};

/// File name of the full-size icon
pub const BASE_FILE_NAME: &str = "icon.png";

/// File name of the copy resampled to `size` x `size`
pub fn export_file_name(size: u32) -> String {
    format!("icon-{}.png", size)
}

/// Write `icon.png` plus `icon-{N}.png` for each size into `dir`.
///
/// The directory is created if missing. Returns the written paths, base first.
pub fn export_all(base: &RgbaImage, dir: &Path, sizes: &[u32]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| IconError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(sizes.len() + 1);

    let base_path = dir.join(BASE_FILE_NAME);
    save_png(base, &base_path)?;
    written.push(base_path);

    for &size in sizes {
        let resized = imageops::resize(base, size, size, FilterType::Lanczos3);
        let path = dir.join(export_file_name(size));
        save_png(&resized, &path)?;
        written.push(path);
    }

    Ok(written)
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| IconError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!("Wrote {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(export_file_name(16), "icon-16.png");
        assert_eq!(export_file_name(512), "icon-512.png");
    }

    #[test]
    fn test_export_writes_base_then_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("icons");

        let written = export_all(&checker(64), &out, &[8, 32]).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["icon.png", "icon-8.png", "icon-32.png"]);

        let small = image::open(out.join("icon-8.png")).unwrap();
        assert_eq!((small.width(), small.height()), (8, 8));
    }

    #[test]
    fn test_export_into_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        export_all(&checker(16), dir.path(), &[4]).unwrap();
        export_all(&checker(16), dir.path(), &[4]).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_unwritable_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = export_all(&checker(4), &blocker.join("icons"), &[2]).unwrap_err();
        assert!(matches!(err, IconError::Io { .. }));
    }
}
