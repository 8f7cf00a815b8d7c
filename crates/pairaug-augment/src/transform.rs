use pairaug_image::ImageSize;

/// A square window: top-left corner and side length, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    /// Left coordinate.
    pub x: usize,
    /// Top coordinate.
    pub y: usize,
    /// Side length.
    pub size: usize,
}

impl CropWindow {
    /// Whether the window lies entirely inside a canvas of `canvas` size.
    pub fn fits_in(&self, canvas: ImageSize) -> bool {
        self.x + self.size <= canvas.width && self.y + self.size <= canvas.height
    }

    /// The window position as a fraction of the canvas size, `(x / width, y / height)`.
    pub fn relative_offset(&self, canvas: ImageSize) -> (f64, f64) {
        (
            self.x as f64 / canvas.width as f64,
            self.y as f64 / canvas.height as f64,
        )
    }
}

/// The random draw applied to both images of a pair.
///
/// Angle, flip and scale are shared. The crop windows hold the same relative region expressed
/// in each image's own canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrespondenceTransform {
    /// Rotation in degrees, counter-clockwise.
    pub angle: f32,
    /// Whether both images were mirrored left to right.
    pub flip: bool,
    /// The sampled zoom scale.
    pub scale: f64,
    /// `1 / scale`; canvases grow by this factor when it exceeds one.
    pub canvas_scale: f64,
    /// Crop window in the source canvas.
    pub source_crop: CropWindow,
    /// Crop window in the target canvas.
    pub target_crop: CropWindow,
    /// Size of the source canvas the crop was taken from.
    pub source_canvas: ImageSize,
    /// Size of the target canvas the crop was taken from.
    pub target_canvas: ImageSize,
}

/// Map a source crop offset onto the target image along one axis.
///
/// Computed as `source_offset * target_len / source_len` with integer floor division, from
/// the original, un-augmented lengths of the two images.
///
/// # Example
///
/// ```
/// use pairaug_augment::target_offset;
///
/// // a target twice the resolution of the source
/// assert_eq!(target_offset(37, 512, 1024), 74);
/// assert_eq!(target_offset(37, 1024, 512), 18);
/// ```
pub fn target_offset(source_offset: usize, source_len: usize, target_len: usize) -> usize {
    if source_len == 0 {
        return 0;
    }
    source_offset * target_len / source_len
}
