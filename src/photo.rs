//! アップロード写真の読み込み
//!
//! 拡張子の許可リスト確認 → 読み込み → 長辺がmax_sizeを超える場合のみ縮小

use crate::error::{AuraError, Result};
use aura_threads_common::{is_supported_extension, mime_type_for_extension, ImagePayload};
use image::{imageops::FilterType, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// 写真を読み込んで送信用ペイロードにする
pub fn load_photo(path: &Path, max_size: u32) -> Result<ImagePayload> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    if !is_supported_extension(&ext) {
        return Err(AuraError::UnsupportedImageFormat(path.display().to_string()));
    }

    if !path.is_file() {
        return Err(AuraError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let payload = ImagePayload::new(bytes, mime_type_for_extension(&ext));

    downscale_if_needed(payload, max_size)
}

/// 長辺がmax_sizeを超える場合はJPEGで縮小し直す（0なら無効）
pub fn downscale_if_needed(payload: ImagePayload, max_size: u32) -> Result<ImagePayload> {
    if max_size == 0 {
        return Ok(payload);
    }

    let img = image::load_from_memory(&payload.bytes)
        .map_err(|e| AuraError::ImageLoad(e.to_string()))?;

    if img.width().max(img.height()) <= max_size {
        return Ok(payload);
    }

    tracing::debug!(
        width = img.width(),
        height = img.height(),
        max_size,
        "downscaling photo"
    );

    let resized = img.resize(max_size, max_size, FilterType::Lanczos3).to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    resized
        .write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| AuraError::ImageLoad(e.to_string()))?;

    Ok(ImagePayload::new(buf.into_inner(), "image/jpeg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(width, height, Rgb([200, 30, 30]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let result = load_photo(Path::new("selfie.gif"), 1568);
        assert!(matches!(result, Err(AuraError::UnsupportedImageFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_photo(Path::new("/nonexistent/selfie.jpg"), 1568);
        assert!(matches!(result, Err(AuraError::FileNotFound(_))));
    }

    #[test]
    fn test_small_image_is_passed_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.png");
        write_png(&path, 40, 20);
        let original = std::fs::read(&path).unwrap();

        let payload = load_photo(&path, 1568).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.bytes, original);
    }

    #[test]
    fn test_large_image_is_downscaled_to_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("large.PNG");
        write_png(&path, 300, 150);

        let payload = load_photo(&path, 100).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");

        let img = image::load_from_memory(&payload.bytes).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
    }

    #[test]
    fn test_undecodable_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let result = load_photo(&path, 1568);
        assert!(matches!(result, Err(AuraError::ImageLoad(_))));
    }
}
