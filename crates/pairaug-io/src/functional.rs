use std::path::Path;

use pairaug_image::{Image, ImageSize};
use pairaug_imgproc::color::{rgb_from_gray, rgb_from_rgba};

use crate::error::IoError;

/// File extensions, lowercase, that the readers and writers accept.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Background used when flattening images with an alpha channel.
const ALPHA_BACKGROUND: [u8; 3] = [255, 255, 255];

/// A generic image type that can be any of the supported image layouts.
///
/// Higher bit depths are converted to 8 bit on decode.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    Gray8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// Normalize the image to exactly three channels.
    ///
    /// Grayscale is broadcast to all channels and alpha is composited over white.
    pub fn into_rgb8(self) -> Result<Image<u8, 3>, IoError> {
        let rgb = match self {
            GenericImage::Rgb8(img) => img,
            GenericImage::Gray8(img) => {
                let mut rgb = Image::from_size_val(img.size(), 0u8)?;
                rgb_from_gray(&img, &mut rgb)?;
                rgb
            }
            GenericImage::Rgba8(img) => {
                let mut rgb = Image::from_size_val(img.size(), 0u8)?;
                rgb_from_rgba(&img, &mut rgb, Some(ALPHA_BACKGROUND))?;
                rgb
            }
        };
        Ok(rgb)
    }
}

/// Whether the path ends with one of the [`IMAGE_EXTENSIONS`], ignoring case.
///
/// # Example
///
/// ```
/// use pairaug_io::functional::has_image_extension;
///
/// assert!(has_image_extension("photos/cat.JPG"));
/// assert!(!has_image_extension("notes.txt"));
/// ```
pub fn has_image_extension(file_path: impl AsRef<Path>) -> bool {
    file_path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn check_extension(file_path: &Path) -> Result<(), IoError> {
    if !has_image_extension(file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }
    Ok(())
}

/// Reads an image from the given file path.
///
/// The method reads any format supported by the image crate for the accepted extensions,
/// keeping the channel layout of the file.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
///
/// # Errors
///
/// Returns an error if the file does not exist, has an unsupported extension or cannot be
/// decoded.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    check_extension(file_path)?;

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} ({}, {:?})",
        file_path.display(),
        size,
        img.color()
    );

    let color = img.color();
    let image = if color.has_alpha() {
        GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
    } else if color.channel_count() == 1 {
        GenericImage::Gray8(Image::new(size, img.into_luma8().into_raw())?)
    } else {
        GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?)
    };

    Ok(image)
}

/// Reads an image from the given file path as 8-bit RGB.
///
/// Grayscale images are broadcast to three channels and images with an alpha channel are
/// composited over a white background.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image with three channels.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    read_image_any(file_path)?.into_rgb8()
}

/// Encodes an RGB image into the format named by the extension of `file_path`.
///
/// Nothing is written; the returned bytes are the content of the file
/// [`write_image_rgb8`] would create.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_io::functional::encode_image_rgb8;
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 4 }, 0).unwrap();
/// let bytes = encode_image_rgb8("out.png", &image).unwrap();
///
/// assert!(bytes.starts_with(b"\x89PNG"));
/// ```
pub fn encode_image_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<Vec<u8>, IoError> {
    let file_path = file_path.as_ref();
    check_extension(file_path)?;

    let encode_error = |e| IoError::ImageEncodeError(file_path.to_path_buf(), e);
    let format = image::ImageFormat::from_path(file_path).map_err(encode_error)?;

    let mut bytes = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut bytes,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::Rgb8,
        format,
    )
    .map_err(encode_error)?;

    Ok(bytes.into_inner())
}

/// Writes an RGB image to the given file path.
///
/// The encoder is picked from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output file, ending in one of the [`IMAGE_EXTENSIONS`].
/// * `image` - The image to write.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let bytes = encode_image_rgb8(file_path, image)?;
    std::fs::write(file_path, bytes)?;
    Ok(())
}
