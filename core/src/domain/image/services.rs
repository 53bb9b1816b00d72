use image::{
    DynamicImage, ImageFormat, Rgb, RgbImage,
    imageops::{self, FilterType},
};
use jpeg_encoder::{ColorType as JpegColorType, Encoder, EncodingError};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    image::value_objects::{CompressedImage, CompressionSettings, ResizePolicy},
};

const JPEG_MEDIA_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
enum ReencodeError {
    #[error("{0}x{1} exceeds the JPEG size limit")]
    TooLarge(u32, u32),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Normalizes and re-encodes an image for submission to the inference backend.
///
/// Only undecodable input is an error. Once the image has been decoded, any
/// failure while resizing or encoding falls back to the original bytes so the
/// pipeline keeps going at a higher cost.
pub fn compress(
    image_bytes: &[u8],
    settings: &CompressionSettings,
) -> Result<CompressedImage, CoreError> {
    if image_bytes.is_empty() {
        return Err(CoreError::DecodeError("empty image payload".to_string()));
    }

    let decoded = image::load_from_memory(image_bytes).map_err(|e| {
        warn!(error = %e, bytes = image_bytes.len(), "failed to decode image");
        CoreError::DecodeError(e.to_string())
    })?;

    let original = CompressedImage {
        bytes: image_bytes.to_vec(),
        width: decoded.width(),
        height: decoded.height(),
        media_type: media_type_of(image_bytes).to_string(),
        reencoded: false,
    };

    if !settings.enabled {
        return Ok(original);
    }

    match reencode(&decoded, settings) {
        Ok(compressed) => {
            info!(
                original_width = original.width,
                original_height = original.height,
                original_bytes = original.bytes.len(),
                width = compressed.width,
                height = compressed.height,
                bytes = compressed.bytes.len(),
                "image compressed"
            );
            Ok(compressed)
        }
        Err(e) => {
            warn!(error = %e, "image compression failed, submitting original");
            Ok(original)
        }
    }
}

/// Target dimensions for an image of `width` x `height`.
///
/// The larger edge becomes `max_dimension` and the other one is scaled by the
/// same factor, rounded down (never below one pixel).
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    max_dimension: u32,
    policy: ResizePolicy,
) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    let larger = width.max(height);

    if larger == 0 {
        return (width, height);
    }
    if policy == ResizePolicy::SkipIfWithinBounds && larger <= max_dimension {
        return (width, height);
    }

    let scale = |edge: u32| -> u32 {
        ((u64::from(edge) * u64::from(max_dimension)) / u64::from(larger)).max(1) as u32
    };

    if width >= height {
        (max_dimension, scale(height))
    } else {
        (scale(width), max_dimension)
    }
}

fn reencode(
    decoded: &DynamicImage,
    settings: &CompressionSettings,
) -> Result<CompressedImage, ReencodeError> {
    let rgb = to_opaque_rgb(decoded);
    let (width, height) = scaled_dimensions(
        rgb.width(),
        rgb.height(),
        settings.max_dimension,
        settings.policy,
    );

    let rgb = if (width, height) != rgb.dimensions() {
        imageops::resize(&rgb, width, height, FilterType::Lanczos3)
    } else {
        rgb
    };

    let bytes = encode_jpeg(&rgb, settings.quality, true)?;

    Ok(CompressedImage {
        bytes,
        width,
        height,
        media_type: JPEG_MEDIA_TYPE.to_string(),
        reencoded: true,
    })
}

/// Baseline JPEG at `quality`. With `optimize` the Huffman tables are built
/// from the image's own symbol statistics instead of the standard ones.
fn encode_jpeg(rgb: &RgbImage, quality: u8, optimize: bool) -> Result<Vec<u8>, ReencodeError> {
    let (width, height) = rgb.dimensions();
    let too_large = || ReencodeError::TooLarge(width, height);
    let w = u16::try_from(width).map_err(|_| too_large())?;
    let h = u16::try_from(height).map_err(|_| too_large())?;

    let mut bytes = Vec::new();
    let mut encoder = Encoder::new(&mut bytes, quality.clamp(1, 100));
    encoder.set_optimized_huffman_tables(optimize);
    encoder.encode(rgb.as_raw(), w, h, JpegColorType::Rgb)?;

    Ok(bytes)
}

/// JPEG has no transparency: alpha is composited onto white, every other
/// colour model is converted to 8-bit RGB. Palette images are expanded by the
/// decoder, so they land in one of those two cases.
fn to_opaque_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u32::from(a);
        let over_white =
            |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([over_white(r), over_white(g), over_white(b)]));
    }
    out
}

fn media_type_of(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::Bmp) => "image/bmp",
        Ok(ImageFormat::Tiff) => "image/tiff",
        _ => "application/octet-stream",
    }
}
