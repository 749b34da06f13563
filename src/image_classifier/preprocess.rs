use crate::device_camera::interface::Frame;
use crate::library::error::{Error, Result};
use image::{imageops, DynamicImage, RgbImage};

/// Dense NCHW float tensor, values in 0-1.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

/// Scales to fit a `size`x`size` square, padding the short side with black.
pub fn letterbox(image: &DynamicImage, size: u32) -> RgbImage {
    let rgb = image.to_rgb8();

    if rgb.width() == rgb.height() {
        return imageops::resize(&rgb, size, size, imageops::FilterType::Triangle);
    }

    let (w, h) = (rgb.width() as f32, rgb.height() as f32);
    let scale = (size as f32 / w).min(size as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, size);
    let new_h = ((h * scale) as u32).clamp(1, size);

    let scaled = imageops::resize(&rgb, new_w, new_h, imageops::FilterType::Triangle);

    let mut padded = RgbImage::new(size, size);
    let x_offset = (size - new_w) / 2;
    let y_offset = (size - new_h) / 2;
    imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    padded
}

fn rgb_to_tensor(rgb: &RgbImage) -> InputTensor {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let plane = width * height;
    let mut data = vec![0.0f32; 3 * plane];

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let offset = y as usize * width + x as usize;
        for c in 0..3 {
            data[c * plane + offset] = pixel[c] as f32 / 255.0;
        }
    }

    InputTensor {
        shape: [1, 3, height, width],
        data,
    }
}

pub fn frame_to_tensor(frame: &Frame, size: u32) -> Result<InputTensor> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(Error::Classifier("cannot classify an empty frame".to_string()));
    }

    let image = DynamicImage::ImageRgba8(frame.0.clone());
    let resized = letterbox(&image, size);

    Ok(rgb_to_tensor(&resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn channel(tensor: &InputTensor, c: usize) -> &[f32] {
        let plane = tensor.shape[2] * tensor.shape[3];
        &tensor.data[c * plane..(c + 1) * plane]
    }

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        Frame(RgbaImage::from_pixel(
            width,
            height,
            Rgba([rgb[0], rgb[1], rgb[2], 255]),
        ))
    }

    #[test]
    fn test_frame_to_tensor_square() {
        let tensor = frame_to_tensor(&solid(100, 100, [255, 0, 0]), 224).unwrap();

        assert_eq!(tensor.shape, [1, 3, 224, 224]);
        assert_eq!(channel(&tensor, 0)[0], 1.0);
        assert_eq!(channel(&tensor, 1)[0], 0.0);
        assert_eq!(channel(&tensor, 2)[0], 0.0);
    }

    #[test]
    fn test_frame_to_tensor_rectangle_is_centered() {
        let tensor = frame_to_tensor(&solid(200, 100, [255, 0, 0]), 224).unwrap();

        assert_eq!(tensor.shape, [1, 3, 224, 224]);

        let red = channel(&tensor, 0);
        assert_eq!(red[112 * 224 + 112], 1.0);
        // top rows are padding
        assert_eq!(red[0], 0.0);
    }

    #[test]
    fn test_frame_to_tensor_normalization() {
        let tensor = frame_to_tensor(&solid(100, 100, [128, 128, 128]), 224).unwrap();

        let expected = 128.0 / 255.0;
        for c in 0..3 {
            assert!((channel(&tensor, c)[0] - expected).abs() < 0.0001);
        }
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let frame = Frame(RgbaImage::new(0, 0));

        assert!(matches!(
            frame_to_tensor(&frame, 224),
            Err(Error::Classifier(_))
        ));
    }
}
