use image::{GrayImage, ImageBuffer, Luma, Rgba};

/// Converts a screenshot to the grayscale image handed to Tesseract.
///
/// With a threshold, the image is binarized: pixels darker than the
/// threshold become black (text), everything else white (card background).
/// Without one, plain luminance is used and Tesseract binarizes itself.
pub fn prepare_for_ocr(img: &ImageBuffer<Rgba<u8>, Vec<u8>>, threshold: Option<u8>) -> GrayImage {
    let gray = image::imageops::grayscale(img);
    match threshold {
        Some(t) => threshold_dark_pixels(&gray, t),
        None => gray,
    }
}

/// Binarizes a grayscale image, keeping dark pixels as black text.
///
/// Recommended thresholds:
/// - Light card, dark text: 150
/// - Low-contrast captures: 180
pub fn threshold_dark_pixels(img: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let value = if pixel[0] < threshold { 0u8 } else { 255u8 };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}
