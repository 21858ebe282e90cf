use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader};
use ndarray::Array4;
use sha2::{Digest, Sha256};
use shared::{MODEL_INPUT_SIDE, accepted_extension};

use crate::error::InferenceError;

pub const INPUT_SHAPE: [usize; 4] = [1, MODEL_INPUT_SIDE as usize, MODEL_INPUT_SIDE as usize, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredFormat {
    Jpeg,
    Png,
}

impl DeclaredFormat {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match accepted_extension(file_name)? {
            "jpg" | "jpeg" => Some(DeclaredFormat::Jpeg),
            "png" => Some(DeclaredFormat::Png),
            _ => None,
        }
    }
}

/// Raw upload as received; lives for a single request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub format: DeclaredFormat,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, InferenceError> {
        let file_name = file_name.into();
        let format = DeclaredFormat::from_file_name(&file_name)
            .ok_or_else(|| InferenceError::UnsupportedExtension(file_name.clone()))?;
        if bytes.is_empty() {
            return Err(InferenceError::EmptyUpload);
        }
        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// NHWC batch of one, RGB, values in [0, 1].
#[derive(Debug, Clone)]
pub struct PreprocessedTensor {
    data: Array4<f32>,
}

impl PreprocessedTensor {
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    #[cfg(test)]
    pub fn view(&self) -> ndarray::ArrayView4<'_, f32> {
        self.data.view()
    }

    #[cfg(any(test, feature = "torch"))]
    pub fn as_slice(&self) -> Option<&[f32]> {
        self.data.as_slice()
    }

    pub fn has_model_shape(&self) -> bool {
        self.shape() == INPUT_SHAPE
    }
}

/// Decodes by sniffing the content; the extension alone is not trusted.
pub fn decode(upload: &UploadedImage) -> Result<DynamicImage, InferenceError> {
    let reader = ImageReader::new(Cursor::new(upload.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| InferenceError::Decode(e.to_string()))?;

    match reader.format() {
        Some(ImageFormat::Jpeg) | Some(ImageFormat::Png) => {}
        Some(other) => {
            return Err(InferenceError::Decode(format!(
                "{:?} images are not supported",
                other
            )));
        }
        None => {
            return Err(InferenceError::Decode(
                "file is not a JPEG or PNG image".to_string(),
            ));
        }
    }

    reader
        .decode()
        .map_err(|e| InferenceError::Decode(e.to_string()))
}

/// Force-resizes to the model input; aspect ratio is not preserved.
pub fn to_tensor(image: &DynamicImage) -> Result<PreprocessedTensor, InferenceError> {
    let rgb = image.to_rgb8();
    let resized = imageops::resize(&rgb, MODEL_INPUT_SIDE, MODEL_INPUT_SIDE, FilterType::CatmullRom);

    let scaled: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|value| f32::from(value) / 255.0)
        .collect();

    let [batch, height, width, channels] = INPUT_SHAPE;
    let len = scaled.len();
    // actual carries the flat length when the buffer cannot be reshaped
    let data = Array4::from_shape_vec((batch, height, width, channels), scaled).map_err(|_| {
        InferenceError::ShapeMismatch {
            expected: INPUT_SHAPE,
            actual: vec![len],
        }
    })?;

    Ok(PreprocessedTensor { data })
}

pub fn preprocess(upload: &UploadedImage) -> Result<PreprocessedTensor, InferenceError> {
    let image = decode(upload)?;
    log::debug!(
        "Decoded {} ({}x{}, {:?})",
        upload.file_name,
        image.width(),
        image.height(),
        image.color()
    );
    to_tensor(&image)
}


#[cfg(test)]
mod tests {
    use super::test_images::*;
    use super::*;
    use image::{RgbImage, Rgba, RgbaImage};

    fn assert_model_ready(tensor: &PreprocessedTensor) {
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert!(tensor.has_model_shape());
        assert!(tensor.view().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn rgb_jpeg_is_resized_to_model_input() {
        let upload = UploadedImage::new("fundus.jpg", rgb_jpeg(512, 512)).unwrap();
        let tensor = preprocess(&upload).unwrap();
        assert_model_ready(&tensor);
    }

    #[test]
    fn grayscale_png_becomes_three_channels() {
        let upload = UploadedImage::new("gray.png", gray_png(300, 200)).unwrap();
        let tensor = preprocess(&upload).unwrap();
        assert_model_ready(&tensor);
        let view = tensor.view();
        for (x, y) in [(0, 0), (100, 50), (223, 223)] {
            let r = view[[0, y, x, 0]];
            assert_eq!(r, view[[0, y, x, 1]]);
            assert_eq!(r, view[[0, y, x, 2]]);
        }
    }

    #[test]
    fn every_color_mode_reaches_model_shape() {
        let sources = [
            rgba_png(17, 900),
            rgb_jpeg(1, 1),
            rgb_jpeg(1024, 300),
            gray_alpha_png(40, 30),
            gray16_png(300, 120),
            rgb16_png(64, 200),
            PALETTE_PNG.to_vec(),
        ];
        for bytes in sources {
            let upload = UploadedImage::new("scan.png", bytes).unwrap();
            assert_model_ready(&preprocess(&upload).unwrap());
        }
    }

    #[test]
    fn palette_png_is_expanded_to_rgb() {
        let upload = UploadedImage::new("palette.png", PALETTE_PNG.to_vec()).unwrap();
        let image = decode(&upload).unwrap();
        // row 0 starts with index 0 (red)
        assert_eq!(image.to_rgb8().get_pixel(0, 0).0, [255, 0, 0]);
        assert_model_ready(&to_tensor(&image).unwrap());
    }

    #[test]
    fn sixteen_bit_white_scales_to_one() {
        let img: image::ImageBuffer<image::Rgb<u16>, Vec<u16>> =
            image::ImageBuffer::from_pixel(30, 30, image::Rgb([u16::MAX; 3]));
        let upload = UploadedImage::new("deep.png", encode(&DynamicImage::ImageRgb16(img), ImageFormat::Png)).unwrap();
        let tensor = preprocess(&upload).unwrap();
        assert!(tensor.as_slice().unwrap().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn pixel_values_are_divided_by_255() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 80, image::Rgb([255, 255, 255])));
        let tensor = to_tensor(&white).unwrap();
        assert!(tensor.view().iter().all(|&v| v == 1.0));

        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 10, image::Rgb([0, 0, 0])));
        let tensor = to_tensor(&black).unwrap();
        assert!(tensor.view().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn channel_order_is_rgb() {
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, image::Rgb([255, 0, 0])));
        let tensor = to_tensor(&red).unwrap();
        let view = tensor.view();
        assert_eq!(view[[0, 10, 10, 0]], 1.0);
        assert_eq!(view[[0, 10, 10, 1]], 0.0);
        assert_eq!(view[[0, 10, 10, 2]], 0.0);
    }

    #[test]
    fn text_renamed_to_jpg_fails_to_decode() {
        let upload = UploadedImage::new("notes.jpg", b"just some plain text".to_vec()).unwrap();
        assert!(matches!(preprocess(&upload), Err(InferenceError::Decode(_))));
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let mut bytes = gray_png(64, 64);
        bytes.truncate(40);
        let upload = UploadedImage::new("cut.png", bytes).unwrap();
        assert!(matches!(preprocess(&upload), Err(InferenceError::Decode(_))));
    }

    #[test]
    fn gif_content_is_rejected_even_with_png_name() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255])));
        let upload = UploadedImage::new("sneaky.png", encode(&img, ImageFormat::Gif)).unwrap();
        assert!(matches!(decode(&upload), Err(InferenceError::Decode(_))));
    }

    #[test]
    fn upload_checks_extension_and_size() {
        assert!(matches!(
            UploadedImage::new("scan.bmp", vec![1, 2, 3]),
            Err(InferenceError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            UploadedImage::new("scan.PNG", Vec::new()),
            Err(InferenceError::EmptyUpload)
        ));
        assert_eq!(
            UploadedImage::new("scan.JPEG", vec![0]).unwrap().format,
            DeclaredFormat::Jpeg
        );
    }

    #[test]
    fn declared_format_agrees_with_shared_extension_rule() {
        for name in [".png", "eye.PNG", "a.b.jpg", "scan.jpeg", "notes.txt", "png", "scan."] {
            assert_eq!(
                DeclaredFormat::from_file_name(name).is_some(),
                shared::has_accepted_extension(name),
                "{}",
                name
            );
        }
        assert_eq!(DeclaredFormat::from_file_name(".png"), Some(DeclaredFormat::Png));
    }

    #[test]
    fn digest_is_stable() {
        let upload = UploadedImage::new("a.png", b"abc".to_vec()).unwrap();
        assert_eq!(
            upload.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
