/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two image sizes do not agree.
    #[error("Invalid image size: got {0}x{1}, expected {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel value cannot be cast to the requested type.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a region does not fit inside the image.
    #[error("Region {width}x{height} at ({x}, {y}) does not fit in a {cols}x{rows} image")]
    RegionOutOfBounds {
        /// Left coordinate of the region.
        x: usize,
        /// Top coordinate of the region.
        y: usize,
        /// Width of the region.
        width: usize,
        /// Height of the region.
        height: usize,
        /// Width of the image.
        cols: usize,
        /// Height of the image.
        rows: usize,
    },

    /// Error when an operation needs a non-empty image.
    #[error("Image has zero area ({0}x{1})")]
    EmptyImage(usize, usize),

    /// Error when the resize backend rejects the input.
    #[error("Resize failed: {0}")]
    ResizeError(String),

    /// Error when a filter kernel is empty or has an even length.
    #[error("Invalid kernel length: {0}")]
    InvalidKernelLength(usize),

    /// Error when an operation does not support the number of channels.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),
}
