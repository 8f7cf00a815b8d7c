use pairaug_image::{ImageError, ImageSize};

/// An error type for the pair augmentation.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AugmentError {
    /// One of the input images has no pixels.
    #[error("The {0} image is empty ({1})")]
    EmptyImage(&'static str, ImageSize),

    /// An augmentation parameter is out of range.
    #[error("Invalid augmentation parameter `{0}`: {1}")]
    InvalidParameter(&'static str, String),

    /// The crop size truncated to zero pixels.
    #[error("The {0} crop of a {1} canvas at canvas scale {2} is empty")]
    ZeroCropSize(&'static str, ImageSize, f64),

    /// The square crop does not fit in the source canvas.
    #[error("A crop of {0}px does not fit in the {1} source canvas")]
    CropExceedsCanvas(usize, ImageSize),

    /// Zooming out would allocate a canvas larger than the pixel limit.
    #[error("The zoomed out {0} canvas of {1} exceeds the pixel limit")]
    CanvasTooLarge(&'static str, ImageSize),

    /// Error from an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),
}
