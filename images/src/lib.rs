//! Thin JPEG/PNG decode entry points.
//!
//! These delegate entirely to the `image` crate and share no state or code
//! paths with `numshape_core::decode` -- there is no schema here, just a
//! byte buffer in and a typed pixel buffer out.

use image::{DynamicImage, ImageFormat};
use numshape_core::{Buffer, Error, TypedBuffer};

fn dynamic_image_to_buffer(img: DynamicImage) -> TypedBuffer {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (raw, channels): (Vec<u8>, usize) = match &img {
        DynamicImage::ImageLuma8(_) => (img.to_luma8().into_raw(), 1),
        DynamicImage::ImageRgba8(_) | DynamicImage::ImageLumaA8(_) => {
            (img.to_rgba8().into_raw(), 4)
        }
        _ => (img.to_rgb8().into_raw(), 3),
    };

    let mut buffer: Buffer<u8> = Buffer::new();
    for byte in raw {
        buffer.push(byte);
    }
    let shape = if channels == 1 {
        vec![height, width]
    } else {
        vec![height, width, channels]
    };
    buffer.set_shape(shape);
    TypedBuffer::U8(buffer)
}

fn decode(bytes: &[u8], format: ImageFormat) -> Result<TypedBuffer, Error> {
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::Parse(format!("could not decode image: {e}")))?;
    Ok(dynamic_image_to_buffer(img))
}

/// Decodes a JPEG byte buffer into `[H, W]`, `[H, W, 3]` or `[H, W, 4]` u8 pixels.
pub fn decode_jpeg(bytes: &[u8]) -> Result<TypedBuffer, Error> {
    decode(bytes, ImageFormat::Jpeg)
}

/// Decodes a PNG byte buffer into `[H, W]`, `[H, W, 3]` or `[H, W, 4]` u8 pixels.
pub fn decode_png(bytes: &[u8]) -> Result<TypedBuffer, Error> {
    decode(bytes, ImageFormat::Png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_minimal_png() {
        // 1x1 white pixel, RGB PNG.
        let png: &[u8] = &[
            0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00,
            0x00, 0x90, 0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x08,
            0xd7, 0x63, 0xf8, 0xcf, 0xc0, 0x00, 0x00, 0x00, 0x03, 0x00, 0x01, 0x4f, 0xd1, 0x6b,
            0xdd, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
        ];
        let buf = decode_png(png).unwrap();
        assert_eq!(buf.shape(), &[1, 1, 3]);
        assert_eq!(buf.dtype(), numshape_core::DType::U8);
    }

    #[test]
    fn rejects_garbage_bytes() {
        let result = decode_jpeg(b"not an image");
        assert!(result.is_err());
    }
}
