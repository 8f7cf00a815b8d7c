use pairaug_image::ImageError;

/// An error type for the sketch conversion.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SketchError {
    /// The input image has no pixels.
    #[error("Cannot sketch an empty image ({0}x{1})")]
    EmptyImage(usize, usize),

    /// A conversion parameter is out of range.
    #[error("Invalid sketch parameter `{0}`: {1}")]
    InvalidParameter(&'static str, String),

    /// Error from an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),
}
